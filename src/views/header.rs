//! Top bar: menu toggle, logo, search box and loader

use eframe::egui::{self, Color32, Key, RichText, Ui};

use crate::cards::loader;
use crate::router::{Route, Router};
use crate::state::SharedUiState;

#[derive(Debug, Default)]
pub struct Header {
    /// Text typed into the search box, kept until the next submit
    search_text: String,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the box contents, e.g. with the query of the route shown
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Route a submit leads to; blank text goes nowhere
    pub fn submit(&self) -> Option<Route> {
        let query = self.search_text.trim();
        (!query.is_empty()).then(|| Route::SearchResult(query.to_string()))
    }

    /// The mobile menu toggle is hidden on video pages
    pub fn shows_menu_toggle(route: &Route) -> bool {
        route.page_name() != Some("video")
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut SharedUiState, router: &mut Router, narrow: bool) {
        ui.horizontal(|ui| {
            // hamburger only in the narrow layout, never on the watch page
            if narrow && Self::shows_menu_toggle(router.current()) {
                let icon = if state.mobile_menu() { "✖" } else { "☰" };
                if ui.button(RichText::new(icon).size(18.0)).clicked() {
                    state.toggle_mobile_menu();
                }
            }

            if router.can_go_back() && ui.button("⬅").on_hover_text("Back").clicked() {
                router.back();
            }

            let logo = ui.add(
                egui::Label::new(RichText::new("▶ TubeBrowser").size(20.0).strong().color(Color32::RED))
                    .sense(egui::Sense::click()),
            );
            if logo.clicked() {
                router.navigate(Route::Feed);
            }

            ui.add_space(16.0);

            // search box takes what is left, within limits
            let search_width = (ui.available_width() - 120.0).clamp(120.0, 560.0);
            let field = ui.add(
                egui::TextEdit::singleline(&mut self.search_text)
                    .hint_text("Search")
                    .desired_width(search_width),
            );
            // Enter leaves the field, so check focus loss plus the key
            let entered = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            let clicked = ui.button("🔍").clicked();

            if entered || clicked {
                if let Some(route) = self.submit() {
                    router.navigate(route);
                }
            }

            if state.loading() {
                loader(ui);
            }
        });
    }
}
