//! Pages and the navigation shell around them

pub mod details;
pub mod feed;
pub mod header;
pub mod search;
pub mod side_menu;

use std::sync::Arc;
use tokio::runtime::Handle;

use crate::api::VideoSource;
use crate::config::PlayerConfig;
use crate::fetch::Loadable;
use crate::router::Route;
use crate::state::{LoadingTracker, SharedUiState};
use crate::thumbnail::ThumbnailCache;

pub use details::DetailsView;
pub use feed::FeedView;
pub use header::Header;
pub use search::SearchView;

/// What a view needs to issue requests
#[derive(Clone)]
pub struct ViewContext {
    pub source: Arc<dyn VideoSource>,
    pub runtime: Handle,
    pub loading: LoadingTracker,
}

/// The mounted page; replacing it drops the old view and aborts its requests
pub enum Page {
    Feed(FeedView),
    Search(SearchView),
    Details(DetailsView),
}

impl Page {
    pub fn mount(route: &Route, ctx: &ViewContext, state: &mut SharedUiState) -> Self {
        match route {
            Route::Feed => Page::Feed(FeedView::mount(ctx, state)),
            Route::SearchResult(query) => Page::Search(SearchView::mount(ctx, state, query)),
            Route::Video(id) => Page::Details(DetailsView::mount(ctx, state, id)),
        }
    }

    /// Follow the current route: update parameters in place, or remount
    /// when the route points at another kind of page
    pub fn sync(&mut self, route: &Route, ctx: &ViewContext, state: &mut SharedUiState) {
        let remount = match (route, &mut *self) {
            (Route::Feed, Page::Feed(view)) => {
                view.sync(ctx, state);
                false
            }
            (Route::SearchResult(query), Page::Search(view)) => {
                view.set_query(ctx, query);
                false
            }
            (Route::Video(id), Page::Details(view)) => {
                view.set_id(ctx, id);
                false
            }
            _ => true,
        };
        if remount {
            tracing::debug!(route = %route, "mounting page");
            *self = Page::mount(route, ctx, state);
        }
    }

    pub fn poll(&mut self, state: &mut SharedUiState) {
        match self {
            Page::Feed(view) => view.poll(state),
            Page::Search(view) => {
                view.poll();
            }
            Page::Details(view) => {
                view.poll();
            }
        }
    }

    pub fn show(
        &mut self,
        ui: &mut eframe::egui::Ui,
        thumbs: &mut ThumbnailCache,
        ctx: &ViewContext,
        player: &PlayerConfig,
    ) -> Option<Route> {
        match self {
            Page::Feed(view) => view.show(ui, thumbs),
            Page::Search(view) => view.show(ui, thumbs),
            Page::Details(view) => view.show(ui, thumbs, ctx, player),
        }
    }
}

/// Muted one-line notice for a failed request
pub(crate) fn failure_notice<T>(ui: &mut eframe::egui::Ui, state: &Loadable<T>) {
    if let Loadable::Failed(message) = state {
        ui.label(
            eframe::egui::RichText::new(format!("Could not load: {message}"))
                .color(eframe::egui::Color32::from_gray(140)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MockSource, context, until};
    use super::*;
    use crate::state::LayoutMode;

    #[tokio::test]
    async fn direct_video_route_mounts_details_with_two_requests() {
        let source = Arc::new(MockSource::default());
        let ctx = context(&source);
        let mut state = SharedUiState::default();
        let route = Route::parse("/video/abc123").unwrap();

        let mut page = Page::mount(&route, &ctx, &mut state);
        match &page {
            Page::Details(view) => assert_eq!(view.player_source(), "https://www.youtube.com/watch?v=abc123"),
            _ => panic!("expected the details page"),
        }
        until(|| {
            page.poll(&mut state);
            source.calls().len() == 2 && !ctx.loading.is_loading()
        })
        .await;

        let mut calls = source.calls();
        calls.sort();
        assert_eq!(calls, vec!["details:abc123", "related:abc123"]);
        assert_eq!(state.layout(), LayoutMode::Watch);
    }

    #[tokio::test]
    async fn sync_keeps_page_for_same_kind_and_remounts_otherwise() {
        let source = Arc::new(MockSource::default());
        let ctx = context(&source);
        let mut state = SharedUiState::default();

        let mut page = Page::mount(&Route::SearchResult("cats".into()), &ctx, &mut state);
        page.sync(&Route::SearchResult("dogs".into()), &ctx, &mut state);
        match &page {
            Page::Search(view) => assert_eq!(view.query(), "dogs"),
            _ => panic!("expected the search page"),
        }

        page.sync(&Route::Feed, &ctx, &mut state);
        assert!(matches!(page, Page::Feed(_)));
        assert_eq!(state.layout(), LayoutMode::Browse);

        until(|| {
            page.poll(&mut state);
            state.last_feed().is_some()
        })
        .await;
        assert!(source.calls().contains(&"search:New".to_string()));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted `VideoSource` that records every call

    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::sync::Notify;

    use super::ViewContext;
    use crate::api::VideoSource;
    use crate::error::ApiError;
    use crate::model::{ContentList, VideoDetails};
    use crate::state::LoadingTracker;

    #[derive(Default)]
    pub struct MockSource {
        pub calls: Mutex<Vec<String>>,
        /// Calls named here wait until the gate is notified
        gates: Mutex<HashMap<String, Arc<Notify>>>,
    }

    impl MockSource {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Hold back the response for `call` until the returned handle fires
        pub fn gate(&self, call: &str) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            self.gates
                .lock()
                .unwrap()
                .insert(call.to_string(), Arc::clone(&notify));
            notify
        }

        async fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call.clone());
            let gate = self.gates.lock().unwrap().get(&call).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }
    }

    /// A list with one video whose id and title are `tag`, plus a channel row
    pub fn list_for(tag: &str) -> ContentList {
        serde_json::from_value(json!({
            "contents": [
                { "type": "video", "video": { "videoId": tag, "title": tag } },
                { "type": "channel" }
            ]
        }))
        .unwrap()
    }

    #[async_trait]
    impl VideoSource for MockSource {
        async fn search(&self, query: &str) -> Result<ContentList, ApiError> {
            self.record(format!("search:{query}")).await;
            if query == "broken" {
                return Err(ApiError::Status {
                    status: 500,
                    message: "upstream".to_string(),
                });
            }
            Ok(list_for(query))
        }

        async fn video_details(&self, id: &str) -> Result<VideoDetails, ApiError> {
            self.record(format!("details:{id}")).await;
            Ok(serde_json::from_value(json!({
                "videoId": id,
                "title": format!("Video {id}"),
                "stats": { "views": 1500 }
            }))
            .unwrap())
        }

        async fn related_contents(&self, id: &str) -> Result<ContentList, ApiError> {
            self.record(format!("related:{id}")).await;
            Ok(list_for(&format!("related-{id}")))
        }
    }

    pub fn context(source: &Arc<MockSource>) -> ViewContext {
        ViewContext {
            source: Arc::clone(source) as Arc<dyn VideoSource>,
            runtime: Handle::current(),
            loading: LoadingTracker::new(),
        }
    }

    /// Poll until `done` holds, giving spawned tasks time to run
    pub async fn until(mut done: impl FnMut() -> bool) {
        for _ in 0..200 {
            if done() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition never became true");
    }
}
