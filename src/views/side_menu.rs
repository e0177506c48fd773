//! Category list on the left of the browse layout

use eframe::egui::{self, Color32, RichText, Ui};

use crate::categories::{Category, CategoryKind};
use crate::router::Route;
use crate::state::SharedUiState;

/// Apply a click on an entry; menu placeholders do nothing
pub fn click(category: &Category, state: &mut SharedUiState) -> Option<Route> {
    match category.kind {
        CategoryKind::Home | CategoryKind::Category => {
            state.select_category(&category.name);
            state.set_mobile_menu(false);
            Some(Route::Feed)
        }
        CategoryKind::Menu => None,
    }
}

/// Draw the category list; returns the route to go to after a click
pub fn show(ui: &mut Ui, categories: &[Category], state: &mut SharedUiState) -> Option<Route> {
    let mut target = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for category in categories {
                let selected = state.selected_category() == category.name;
                let text = RichText::new(format!("{}  {}", category.icon, category.label())).size(14.0);
                let entry = ui.add_sized(
                    [ui.available_width(), 36.0],
                    egui::SelectableLabel::new(selected, text),
                );
                if entry.clicked() {
                    if let Some(route) = click(category, state) {
                        target = Some(route);
                    }
                }
                // a rule after the last home-feed category
                if category.divider {
                    ui.separator();
                }
            }
            // footer
            ui.separator();
            ui.label(RichText::new("TubeBrowser").size(12.0).color(Color32::from_gray(120)));
        });
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories;

    fn entry(kind: CategoryKind, name: &str) -> Category {
        Category {
            name: name.to_string(),
            icon: String::new(),
            kind,
            divider: false,
        }
    }

    #[test]
    fn category_click_selects_and_goes_home() {
        let mut state = SharedUiState::default();
        state.set_mobile_menu(true);

        let route = click(&entry(CategoryKind::Category, "Gaming"), &mut state);
        assert_eq!(route, Some(Route::Feed));
        assert_eq!(state.selected_category(), "Gaming");
        assert!(!state.mobile_menu());
    }

    #[test]
    fn home_click_selects_its_name() {
        let mut state = SharedUiState::default();
        state.select_category("Music");
        let route = click(&entry(CategoryKind::Home, "New"), &mut state);
        assert_eq!(route, Some(Route::Feed));
        assert_eq!(state.selected_category(), "New");
    }

    #[test]
    fn menu_entries_are_inert() {
        let mut state = SharedUiState::default();
        state.select_category("Music");
        assert_eq!(click(&entry(CategoryKind::Menu, "Settings"), &mut state), None);
        assert_eq!(state.selected_category(), "Music");
    }

    #[test]
    fn renders_embedded_categories() {
        let ctx = egui::Context::default();
        let list = categories::load().unwrap();
        let mut state = SharedUiState::default();
        let mut route = Some(Route::Feed);
        let _ = ctx.run(Default::default(), |ctx| {
            egui::SidePanel::left("menu").show(ctx, |ui| {
                route = show(ui, &list, &mut state);
            });
        });
        assert_eq!(route, None);
    }

    fn frame(ctx: &egui::Context, events: Vec<egui::Event>, list: &[Category], state: &mut SharedUiState) -> Option<Route> {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut route = None;
        let _ = ctx.run(input, |ctx| {
            egui::SidePanel::left("menu").show(ctx, |ui| {
                route = show(ui, list, state);
            });
        });
        route
    }

    #[test]
    fn clicking_first_entry_selects_home_feed() {
        let ctx = egui::Context::default();
        let list = categories::load().unwrap();
        let mut state = SharedUiState::default();
        state.select_category("Music");
        state.set_mobile_menu(true);

        let pos = egui::pos2(60.0, 20.0);
        let press = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: Default::default(),
        };
        assert_eq!(frame(&ctx, vec![egui::Event::PointerMoved(pos)], &list, &mut state), None);
        assert_eq!(frame(&ctx, vec![press(true)], &list, &mut state), None);
        let route = frame(&ctx, vec![press(false)], &list, &mut state);

        assert_eq!(route, Some(Route::Feed));
        assert_eq!(state.selected_category(), list[0].name);
        assert!(!state.mobile_menu());
    }
}
