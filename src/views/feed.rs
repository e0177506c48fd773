//! Landing page: a grid of videos for the selected category

use eframe::egui::{self, Ui};

use super::{ViewContext, failure_notice};
use crate::cards::{CardModel, video_card};
use crate::fetch::Slot;
use crate::model::ContentList;
use crate::router::Route;
use crate::state::{FeedSnapshot, LayoutMode, SharedUiState};
use crate::thumbnail::ThumbnailCache;

const MIN_CARD_WIDTH: f32 = 280.0;
const MAX_COLUMNS: usize = 4;
const GAP: f32 = 16.0;

pub struct FeedView {
    category: String,
    results: Slot<ContentList>,
}

impl FeedView {
    /// Show the feed for the selected category, reusing the last list when
    /// it belongs to the same category
    pub fn mount(ctx: &ViewContext, state: &mut SharedUiState) -> Self {
        state.set_layout(LayoutMode::Browse);
        let mut view = Self {
            category: state.selected_category().to_string(),
            results: Slot::new("feed"),
        };
        // reuse the last list only if it was fetched for this category
        match state.last_feed() {
            Some(snapshot) if snapshot.category == view.category => {
                view.results.seed(snapshot.results.clone());
            }
            _ => view.fetch(ctx),
        }
        view
    }

    /// Refetch when the selected category changed
    pub fn sync(&mut self, ctx: &ViewContext, state: &SharedUiState) {
        if state.selected_category() != self.category {
            self.category = state.selected_category().to_string();
            self.fetch(ctx);
        }
    }

    /// Take arrived results and publish them as the last feed
    pub fn poll(&mut self, state: &mut SharedUiState) {
        if !self.results.poll() {
            return;
        }
        if let Some(results) = self.results.state().ready() {
            state.publish_feed(FeedSnapshot {
                category: self.category.clone(),
                results: results.clone(),
            });
        }
    }

    pub fn cards(&self) -> Vec<CardModel> {
        self.results
            .state()
            .ready()
            .map(|list| list.videos().map(CardModel::from_video).collect())
            .unwrap_or_default()
    }

    pub fn show(&self, ui: &mut Ui, thumbs: &mut ThumbnailCache) -> Option<Route> {
        failure_notice(ui, self.results.state());

        let cards = self.cards();
        let mut target = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // fit as many columns as the width allows, sharing the gaps
                let columns = column_count(ui.available_width());
                let width = (ui.available_width() - GAP * (columns as f32 - 1.0)) / columns as f32;
                egui::Grid::new("feed_grid")
                    .spacing([GAP, GAP])
                    .show(ui, |ui| {
                        for row in cards.chunks(columns) {
                            for card in row {
                                if video_card(ui, thumbs, card, width) {
                                    target = card.target();
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        target
    }

    fn fetch(&mut self, ctx: &ViewContext) {
        let source = ctx.source.clone();
        let category = self.category.clone();
        self.results
            .request(&ctx.runtime, &ctx.loading, async move { source.search(&category).await });
    }
}

/// 1 to 4 columns depending on the available width
pub fn column_count(width: f32) -> usize {
    ((width + GAP) / (MIN_CARD_WIDTH + GAP)).floor().clamp(1.0, MAX_COLUMNS as f32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{MockSource, context, list_for, until};
    use std::sync::Arc;

    #[test]
    fn columns_follow_width() {
        assert_eq!(column_count(200.0), 1);
        assert_eq!(column_count(600.0), 2);
        assert_eq!(column_count(900.0), 3);
        assert_eq!(column_count(3000.0), 4);
    }

    #[tokio::test]
    async fn fetches_selected_category_and_publishes_it() {
        let source = Arc::new(MockSource::default());
        let ctx = context(&source);
        let mut state = SharedUiState::default();
        state.set_layout(LayoutMode::Watch);
        state.select_category("Music");

        let mut feed = FeedView::mount(&ctx, &mut state);
        assert_eq!(state.layout(), LayoutMode::Browse);

        until(|| {
            feed.poll(&mut state);
            state.last_feed().is_some()
        })
        .await;

        assert_eq!(source.calls(), vec!["search:Music"]);
        let snapshot = state.last_feed().unwrap();
        assert_eq!(snapshot.category, "Music");
        let ids: Vec<String> = feed.cards().into_iter().map(|c| c.video_id).collect();
        assert_eq!(ids, vec!["Music"], "channel rows are skipped");
    }

    #[tokio::test]
    async fn reuses_snapshot_of_same_category() {
        let source = Arc::new(MockSource::default());
        let ctx = context(&source);
        let mut state = SharedUiState::default();
        state.publish_feed(FeedSnapshot {
            category: "New".to_string(),
            results: list_for("cached"),
        });

        let feed = FeedView::mount(&ctx, &mut state);
        assert!(source.calls().is_empty());
        assert_eq!(feed.cards()[0].video_id, "cached");
        assert!(!ctx.loading.is_loading());
    }

    #[tokio::test]
    async fn snapshot_of_other_category_is_not_reused() {
        let source = Arc::new(MockSource::default());
        let ctx = context(&source);
        let mut state = SharedUiState::default();
        state.publish_feed(FeedSnapshot {
            category: "Gaming".to_string(),
            results: list_for("cached"),
        });

        let mut feed = FeedView::mount(&ctx, &mut state);
        until(|| {
            feed.poll(&mut state);
            !feed.cards().is_empty()
        })
        .await;
        assert_eq!(source.calls(), vec!["search:New"]);
        assert_eq!(feed.cards()[0].video_id, "New");
    }

    #[tokio::test]
    async fn category_change_refetches() {
        let source = Arc::new(MockSource::default());
        let ctx = context(&source);
        let mut state = SharedUiState::default();
        let mut feed = FeedView::mount(&ctx, &mut state);

        state.select_category("Sports");
        feed.sync(&ctx, &state);
        feed.sync(&ctx, &state);
        assert_eq!(feed.category, "Sports");

        until(|| {
            feed.poll(&mut state);
            state.last_feed().is_some_and(|s| s.category == "Sports")
        })
        .await;
        assert_eq!(feed.cards()[0].video_id, "Sports");
        let calls = source.calls();
        assert_eq!(calls.last().map(String::as_str), Some("search:Sports"));
        assert_eq!(calls.iter().filter(|c| *c == "search:Sports").count(), 1);
    }
}
