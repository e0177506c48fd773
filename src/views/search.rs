//! Search results page for the query in the route

use eframe::egui::{self, RichText, Ui};

use super::{ViewContext, failure_notice};
use crate::cards::{CardModel, search_result_card};
use crate::fetch::Slot;
use crate::model::ContentList;
use crate::router::Route;
use crate::state::{LayoutMode, SharedUiState};
use crate::thumbnail::ThumbnailCache;

/// Vertical list of results for one query
pub struct SearchView {
    query: String,
    results: Slot<ContentList>,
}

impl SearchView {
    pub fn mount(ctx: &ViewContext, state: &mut SharedUiState, query: &str) -> Self {
        state.set_layout(LayoutMode::Browse);
        let mut view = Self {
            query: query.to_string(),
            results: Slot::new("search"),
        };
        view.fetch(ctx);
        view
    }

    /// Switch to another query; the previous request is superseded
    pub fn set_query(&mut self, ctx: &ViewContext, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.fetch(ctx);
        }
    }

    #[cfg(test)]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn poll(&mut self) -> bool {
        self.results.poll()
    }

    pub fn cards(&self) -> Vec<CardModel> {
        self.results
            .state()
            .ready()
            .map(|list| list.videos().map(CardModel::from_video).collect())
            .unwrap_or_default()
    }

    pub fn show(&self, ui: &mut Ui, thumbs: &mut ThumbnailCache) -> Option<Route> {
        // heading with the query
        ui.label(RichText::new(format!("Results for \"{}\"", self.query)).size(16.0));
        failure_notice(ui, self.results.state());

        let mut target = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // one row per video; channels and playlists are skipped
                for card in self.cards() {
                    if search_result_card(ui, thumbs, &card) {
                        target = card.target();
                    }
                    ui.add_space(12.0);
                }
            });
        target
    }

    fn fetch(&mut self, ctx: &ViewContext) {
        let source = ctx.source.clone();
        let query = self.query.clone();
        self.results
            .request(&ctx.runtime, &ctx.loading, async move { source.search(&query).await });
    }
}
