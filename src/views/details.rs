//! Watch page: player, video metadata and related videos

use eframe::egui::{self, Align, Color32, Layout, RichText, Sense, Ui, Vec2};

use super::{ViewContext, failure_notice};
use crate::cards::{CardModel, clamped_label, suggestion_card};
use crate::config::PlayerConfig;
use crate::fetch::Slot;
use crate::format::abbreviate_number;
use crate::model::{ContentList, VideoDetails};
use crate::player::{self, watch_url};
use crate::router::Route;
use crate::state::{LayoutMode, SharedUiState};
use crate::thumbnail::ThumbnailCache;

const RAIL_WIDTH: f32 = 400.0;

pub struct DetailsView {
    id: String,
    details: Slot<VideoDetails>,
    related: Slot<ContentList>,
    /// Set once playback was started for the current id
    played: bool,
}

impl DetailsView {
    pub fn mount(ctx: &ViewContext, state: &mut SharedUiState, id: &str) -> Self {
        state.set_layout(LayoutMode::Watch);
        let mut view = Self {
            id: id.to_string(),
            details: Slot::new("details"),
            related: Slot::new("related"),
            played: false,
        };
        view.fetch(ctx);
        view
    }

    pub fn set_id(&mut self, ctx: &ViewContext, id: &str) {
        if self.id != id {
            self.id = id.to_string();
            self.played = false;
            self.fetch(ctx);
        }
    }

    /// URL handed to the player
    pub fn player_source(&self) -> String {
        watch_url(&self.id)
    }

    pub fn poll(&mut self) -> bool {
        let details = self.details.poll();
        let related = self.related.poll();
        details || related
    }

    pub fn details(&self) -> Option<&VideoDetails> {
        self.details.state().ready()
    }

    pub fn related_cards(&self) -> Vec<CardModel> {
        self.related
            .state()
            .ready()
            .map(|list| list.videos().map(CardModel::from_video).collect())
            .unwrap_or_default()
    }

    /// Launch playback in the background
    pub fn play(&mut self, ctx: &ViewContext, config: &PlayerConfig) {
        self.played = true;
        let url = self.player_source();
        let config = config.clone();
        ctx.runtime.spawn(async move {
            if let Err(err) = player::play(url, config).await {
                tracing::warn!(error = %err, "playback failed");
            }
        });
    }

    /// Start playback once per video when autoplay is on
    pub fn autoplay(&mut self, ctx: &ViewContext, config: &PlayerConfig) {
        if config.autoplay && !self.played {
            self.play(ctx, config);
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        thumbs: &mut ThumbnailCache,
        view_ctx: &ViewContext,
        player_config: &PlayerConfig,
    ) -> Option<Route> {
        let mut target = None;
        // related rail beside the player when wide, below it otherwise
        let wide = ui.available_width() > 1000.0;
        if wide {
            let main_width = ui.available_width() - RAIL_WIDTH - 16.0;
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.set_width(main_width);
                    egui::ScrollArea::vertical()
                        .id_source("details_main")
                        .show(ui, |ui| self.show_main(ui, thumbs, view_ctx, player_config));
                });
                ui.vertical(|ui| {
                    ui.set_width(RAIL_WIDTH);
                    egui::ScrollArea::vertical()
                        .id_source("details_rail")
                        .show(ui, |ui| target = self.show_related(ui, thumbs));
                });
            });
        } else {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_main(ui, thumbs, view_ctx, player_config);
                ui.add_space(16.0);
                target = self.show_related(ui, thumbs);
            });
        }
        target
    }

    fn show_main(
        &mut self,
        ui: &mut Ui,
        thumbs: &mut ThumbnailCache,
        view_ctx: &ViewContext,
        player_config: &PlayerConfig,
    ) {
        let width = ui.available_width();
        let poster = self
            .details()
            .and_then(|d| d.poster_url())
            .and_then(|url| thumbs.get(ui.ctx(), url));

        // player panel: poster with a play button over it
        let (rect, response) = ui.allocate_exact_size(Vec2::new(width, width * 9.0 / 16.0), Sense::click());
        match poster {
            Some(tex) => {
                egui::Image::new(&tex).paint_at(ui, rect);
            }
            None => {
                ui.painter().rect_filled(rect, 0.0, Color32::BLACK);
            }
        }
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "▶",
            egui::FontId::proportional(64.0),
            Color32::from_white_alpha(220),
        );
        let response = response.on_hover_text(self.player_source());
        if response.clicked() {
            self.play(view_ctx, player_config);
        }

        failure_notice(ui, self.details.state());
        let Some(details) = self.details() else {
            return;
        };

        ui.add_space(12.0);
        clamped_label(ui, details.title.as_deref().unwrap_or_default(), 2, 20.0, Color32::WHITE);
        ui.add_space(8.0);

        // channel block on the left, stat pills on the right
        ui.horizontal(|ui| {
            if let Some(author) = &details.author {
                if let Some(tex) = author.avatar_url().and_then(|url| thumbs.get(ui.ctx(), url)) {
                    ui.add(egui::Image::new(&tex).fit_to_exact_size(Vec2::splat(44.0)).rounding(22.0));
                }
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if let Some(title) = &author.title {
                            ui.label(RichText::new(title).strong());
                        }
                        if author.is_verified() {
                            ui.label(RichText::new("✔").color(Color32::from_gray(150)));
                        }
                    });
                    if let Some(subscribers) = &author.stats.subscribers_text {
                        ui.label(RichText::new(subscribers).color(Color32::from_gray(170)));
                    }
                });
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                for text in stat_pills(details).into_iter().rev() {
                    ui.add(egui::Button::new(text).rounding(16.0).sense(Sense::hover()));
                }
            });
        });

        if let Some(date) = &details.publish_date {
            ui.label(RichText::new(date).color(Color32::from_gray(170)));
        }
        if let Some(description) = &details.description {
            ui.add_space(8.0);
            ui.label(description);
        }
    }

    fn show_related(&self, ui: &mut Ui, thumbs: &mut ThumbnailCache) -> Option<Route> {
        failure_notice(ui, self.related.state());
        let mut target = None;
        for card in self.related_cards() {
            if suggestion_card(ui, thumbs, &card) {
                target = card.target();
            }
            ui.add_space(8.0);
        }
        target
    }

    /// Details and related videos are requested in parallel
    fn fetch(&mut self, ctx: &ViewContext) {
        let source = ctx.source.clone();
        let id = self.id.clone();
        self.details
            .request(&ctx.runtime, &ctx.loading, async move { source.video_details(&id).await });

        let source = ctx.source.clone();
        let id = self.id.clone();
        self.related
            .request(&ctx.runtime, &ctx.loading, async move { source.related_contents(&id).await });
    }
}

/// Likes (only when the API reports them) and views
pub fn stat_pills(details: &VideoDetails) -> Vec<String> {
    let mut pills = Vec::new();
    if let Some(likes) = details.stats.likes {
        pills.push(format!("👍 {} Likes", abbreviate_number(likes)));
    }
    if let Some(views) = details.stats.views {
        pills.push(format!("{} Views", abbreviate_number(views)));
    }
    pills
}
