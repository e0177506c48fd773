//! Static side-menu entries, embedded from `assets/categories.json`

use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::error::CategoryError;

const CATEGORIES_FILE: &str = "categories.json";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

/// How clicking an entry behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// The default feed, shown as "Home"
    Home,
    /// Selects a feed category
    Category,
    /// Placeholder entry with no action
    Menu,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Draw a separator after this entry
    #[serde(default)]
    pub divider: bool,
}

impl Category {
    /// Text shown in the menu
    pub fn label(&self) -> &str {
        match self.kind {
            CategoryKind::Home => "Home",
            _ => &self.name,
        }
    }
}

/// Load the embedded category list
pub fn load() -> Result<Vec<Category>, CategoryError> {
    let file = Asset::get(CATEGORIES_FILE).ok_or(CategoryError::MissingAsset(CATEGORIES_FILE))?;
    Ok(serde_json::from_slice(&file.data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_list_starts_with_home() {
        let categories = load().unwrap();
        let first = &categories[0];
        assert_eq!(first.kind, CategoryKind::Home);
        assert_eq!(first.name, "New");
        assert_eq!(first.label(), "Home");
    }

    #[test]
    fn embedded_list_has_one_divider_before_menu_entries() {
        let categories = load().unwrap();
        let divider = categories.iter().position(|c| c.divider).unwrap();
        assert_eq!(categories.iter().filter(|c| c.divider).count(), 1);
        assert!(categories[..=divider].iter().all(|c| c.kind != CategoryKind::Menu));
        assert!(categories[divider + 1..].iter().all(|c| c.kind == CategoryKind::Menu));
    }

    #[test]
    fn category_label_is_its_name() {
        let music: Category =
            serde_json::from_str(r#"{ "name": "Music", "icon": "🎵", "type": "category" }"#).unwrap();
        assert_eq!(music.label(), "Music");
        assert!(!music.divider);
    }
}
