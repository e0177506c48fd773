//! Application-wide UI state shared by the shell and the views

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::ContentList;

/// Category the feed opens on
pub const DEFAULT_CATEGORY: &str = "New";

/// Counts in-flight requests; loading is shown while the count is non-zero
#[derive(Clone, Debug, Default)]
pub struct LoadingTracker {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one request as started; it ends when the guard drops
    pub fn begin(&self) -> LoadingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }
}

/// Holds one slot of the loading count
#[derive(Debug)]
#[must_use = "loading ends as soon as the guard is dropped"]
pub struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Which page layout the window is in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Side menu plus a list or grid
    #[default]
    Browse,
    /// Player page, no side menu
    Watch,
}

/// Last list the feed displayed, tagged with its category
#[derive(Clone, Debug, PartialEq)]
pub struct FeedSnapshot {
    pub category: String,
    pub results: ContentList,
}

/// State visible to every part of the window
#[derive(Debug)]
pub struct SharedUiState {
    loading: LoadingTracker,
    mobile_menu: bool,
    selected_category: String,
    last_feed: Option<FeedSnapshot>,
    layout: LayoutMode,
}

impl Default for SharedUiState {
    fn default() -> Self {
        Self {
            loading: LoadingTracker::new(),
            mobile_menu: false,
            selected_category: DEFAULT_CATEGORY.to_string(),
            last_feed: None,
            layout: LayoutMode::Browse,
        }
    }
}

impl SharedUiState {
    /// State whose loading flag follows an existing tracker
    pub fn with_loading(loading: LoadingTracker) -> Self {
        Self {
            loading,
            ..Self::default()
        }
    }

    pub fn loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn mobile_menu(&self) -> bool {
        self.mobile_menu
    }

    pub fn set_mobile_menu(&mut self, open: bool) {
        self.mobile_menu = open;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu = !self.mobile_menu;
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn select_category(&mut self, name: &str) {
        if self.selected_category != name {
            tracing::debug!(category = name, "category selected");
            self.selected_category = name.to_string();
        }
    }

    pub fn last_feed(&self) -> Option<&FeedSnapshot> {
        self.last_feed.as_ref()
    }

    pub fn publish_feed(&mut self, snapshot: FeedSnapshot) {
        self.last_feed = Some(snapshot);
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        self.layout = layout;
    }
}
