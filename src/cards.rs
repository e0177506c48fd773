//! Video cards: a pure model per video, and the widgets that draw it

use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Rect, Sense, TextFormat, Ui, Vec2,
    text::{LayoutJob, TextWrapping},
};

use crate::format::{abbreviate_number, format_duration};
use crate::model::Video;
use crate::router::Route;
use crate::thumbnail::ThumbnailCache;

const PLACEHOLDER: Color32 = Color32::from_rgb(30, 41, 59);
const TEXT: Color32 = Color32::WHITE;
const MUTED: Color32 = Color32::from_gray(170);

/// Everything a card shows, with absent fields already left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardModel {
    pub video_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    /// Duration badge text; absent for unknown or zero length
    pub duration: Option<String>,
    pub author_name: Option<String>,
    pub avatar_url: Option<String>,
    pub verified: bool,
    /// e.g. "1.5K views"
    pub views: Option<String>,
    pub published: Option<String>,
    pub description: Option<String>,
    pub live: bool,
}

impl CardModel {
    pub fn from_video(video: &Video) -> Self {
        let author = video.author.as_ref();
        Self {
            video_id: video.video_id.clone(),
            title: video.title.clone().unwrap_or_default(),
            thumbnail_url: video.thumbnail_url().map(str::to_owned),
            duration: video
                .length_seconds
                .filter(|secs| *secs > 0)
                .map(format_duration),
            author_name: author.and_then(|a| a.title.clone()),
            avatar_url: author.and_then(|a| a.avatar_url()).map(str::to_owned),
            verified: author.is_some_and(|a| a.is_verified()),
            views: video
                .stats
                .views
                .map(|v| format!("{} views", abbreviate_number(v))),
            published: video.published_time_text.clone().filter(|s| !s.is_empty()),
            description: video.description_snippet.clone().filter(|s| !s.is_empty()),
            live: video.is_live_now,
        }
    }

    /// Route the card opens; cards without an id are not clickable
    pub fn target(&self) -> Option<Route> {
        (!self.video_id.is_empty()).then(|| Route::Video(self.video_id.clone()))
    }

    /// "views · published", whichever parts exist
    pub fn meta_line(&self) -> Option<String> {
        let parts: Vec<&str> = [self.views.as_deref(), self.published.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

/// Grid card used by the feed
pub fn video_card(ui: &mut Ui, thumbs: &mut ThumbnailCache, card: &CardModel, width: f32) -> bool {
    clickable(ui, card, |ui| {
        ui.vertical(|ui| {
            ui.set_width(width);
            thumbnail(ui, thumbs, card, Vec2::new(width, width * 9.0 / 16.0));
            ui.add_space(8.0);
            ui.horizontal_top(|ui| {
                if let Some(url) = &card.avatar_url {
                    avatar(ui, thumbs, url, 36.0);
                }
                ui.vertical(|ui| {
                    clamped_label(ui, &card.title, 2, 14.0, TEXT);
                    author_line(ui, card, 12.0);
                    if let Some(meta) = card.meta_line() {
                        clamped_label(ui, &meta, 1, 12.0, MUTED);
                    }
                });
            });
        });
    })
}

/// Wide row used by search results
pub fn search_result_card(ui: &mut Ui, thumbs: &mut ThumbnailCache, card: &CardModel) -> bool {
    clickable(ui, card, |ui| {
        ui.horizontal_top(|ui| {
            thumbnail(ui, thumbs, card, Vec2::new(320.0, 180.0));
            ui.add_space(16.0);
            ui.vertical(|ui| {
                clamped_label(ui, &card.title, 2, 20.0, TEXT);
                if let Some(description) = &card.description {
                    clamped_label(ui, description, 2, 13.0, MUTED);
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if let Some(url) = &card.avatar_url {
                        avatar(ui, thumbs, url, 24.0);
                    }
                    author_line(ui, card, 13.0);
                });
                if let Some(meta) = card.meta_line() {
                    clamped_label(ui, &meta, 1, 12.0, MUTED);
                }
            });
        });
    })
}

/// Compact row used in the related-videos rail
pub fn suggestion_card(ui: &mut Ui, thumbs: &mut ThumbnailCache, card: &CardModel) -> bool {
    clickable(ui, card, |ui| {
        ui.horizontal_top(|ui| {
            thumbnail(ui, thumbs, card, Vec2::new(168.0, 94.0));
            ui.vertical(|ui| {
                clamped_label(ui, &card.title, 2, 13.0, TEXT);
                author_line(ui, card, 12.0);
                if let Some(meta) = card.meta_line() {
                    clamped_label(ui, &meta, 1, 12.0, MUTED);
                }
            });
        });
    })
}

/// Activity indicator shown while requests are in flight
pub fn loader(ui: &mut Ui) {
    ui.add(egui::Spinner::new().size(16.0).color(Color32::RED));
}

fn clickable(ui: &mut Ui, card: &CardModel, add_contents: impl FnOnce(&mut Ui)) -> bool {
    // the whole card is the hit area
    let response = ui.scope(add_contents).response;
    if card.target().is_none() {
        return false;
    }
    response
        .interact(Sense::click())
        .on_hover_cursor(CursorIcon::PointingHand)
        .clicked()
}

/// Thumbnail (or a placeholder) with the duration badge in the corner
fn thumbnail(ui: &mut Ui, thumbs: &mut ThumbnailCache, card: &CardModel, size: Vec2) -> Rect {
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let texture = card
        .thumbnail_url
        .as_deref()
        .and_then(|url| thumbs.get(ui.ctx(), url));
    match texture {
        Some(tex) => {
            egui::Image::new(&tex).rounding(8.0).paint_at(ui, rect);
        }
        None => {
            ui.painter().rect_filled(rect, 8.0, PLACEHOLDER);
        }
    }

    // length badge, or LIVE for streams without one
    if let Some(duration) = &card.duration {
        badge(ui, rect, duration, Color32::BLACK);
    } else if card.live {
        badge(ui, rect, "LIVE", Color32::RED);
    }
    rect
}

fn badge(ui: &Ui, rect: Rect, text: &str, fill: Color32) {
    let painter = ui.painter();
    let galley = painter.layout_no_wrap(text.to_owned(), FontId::proportional(11.0), TEXT);
    // bottom-right corner, inset a little
    let anchor = rect.right_bottom() - Vec2::splat(8.0);
    let text_rect = Align2::RIGHT_BOTTOM.anchor_size(anchor, galley.size());
    painter.rect_filled(text_rect.expand2(Vec2::new(6.0, 3.0)), 4.0, fill);
    painter.galley(text_rect.min, galley, TEXT);
}

fn avatar(ui: &mut Ui, thumbs: &mut ThumbnailCache, url: &str, diameter: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(diameter), Sense::hover());
    match thumbs.get(ui.ctx(), url) {
        Some(tex) => {
            egui::Image::new(&tex)
                .rounding(diameter / 2.0)
                .paint_at(ui, rect);
        }
        None => {
            ui.painter()
                .circle_filled(rect.center(), diameter / 2.0, PLACEHOLDER);
        }
    }
}

fn author_line(ui: &mut Ui, card: &CardModel, size: f32) {
    let Some(name) = &card.author_name else {
        return;
    };
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(egui::RichText::new(name).size(size).color(MUTED));
        if card.verified {
            ui.label(egui::RichText::new("✔").size(size - 2.0).color(MUTED));
        }
    });
}

/// Label cut to `rows` lines with an ellipsis
pub fn clamped_label(ui: &mut Ui, text: &str, rows: usize, size: f32, color: Color32) {
    let mut job = LayoutJob::single_section(
        text.to_owned(),
        TextFormat::simple(FontId::proportional(size), color),
    );
    job.wrap = TextWrapping {
        max_width: ui.available_width(),
        max_rows: rows,
        break_anywhere: false,
        overflow_character: Some('…'),
    };
    ui.label(job);
}
