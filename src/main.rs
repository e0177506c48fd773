//! Main application for the video browser GUI

// Client for the video metadata API
mod api;
// Video card widgets
mod cards;
// Side-menu entries embedded at build time
mod categories;
// Config file and environment overrides
mod config;
mod error;
// Per-view request tracking
mod fetch;
mod format;
// Data models for API responses
mod model;
// External playback
mod player;
mod router;
// State shared by the shell and the pages
mod state;
// Thumbnail fetching and texture memo
mod thumbnail;
mod views;

use categories::Category;
use config::Config;
use router::{Route, Router};
use state::{LayoutMode, SharedUiState};
use thumbnail::ThumbnailCache;
use views::{Header, Page, ViewContext, side_menu};

// eframe/egui for GUI application framework
use eframe::{App, Frame, egui};
use egui::Visuals;
// OnceCell for single-time runtime initialization
use once_cell::sync::OnceCell;
use std::{sync::Arc, time::Duration};
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Global Tokio runtime stored in a OnceCell for lazy init
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/// Windows narrower than this hide the side menu behind the menu toggle
const NARROW_WIDTH: f32 = 768.0;
const SIDE_MENU_WIDTH: f32 = 240.0;

/// Program entry point: loads config, starts logging and the runtime, then the GUI
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (
            Config::default().with_api_key_override(std::env::var(config::API_KEY_ENV).ok()),
            Some(err),
        ),
    };
    init_logging(&config.log.filter);
    if let Some(err) = config_error {
        warn!(error = %err, "config unusable, continuing with defaults");
    }

    let rt = RUNTIME.get_or_try_init(|| Runtime::new().map(Arc::new))?;
    let categories = categories::load()?;
    let client = api::ApiClient::new(&config.api)?;
    let initial = initial_route(std::env::args().nth(1));
    info!(base_url = %config.api.base_url, route = %initial, "starting");

    let view_ctx = ViewContext {
        source: Arc::new(client),
        runtime: rt.handle().clone(),
        loading: state::LoadingTracker::new(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([420.0, 480.0])
            .with_title("TubeBrowser"),
        ..Default::default()
    };
    eframe::run_native(
        "TubeBrowser",
        options,
        Box::new(move |cc| {
            // Use dark theme visuals
            cc.egui_ctx.set_visuals(Visuals::dark());
            Box::new(TubeApp::new(config, categories, view_ctx, initial))
        }),
    )?;
    Ok(())
}

/// `RUST_LOG` wins over the configured filter
fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Page to open on: a path like `/video/<id>` given on the command line, else the feed
fn initial_route(arg: Option<String>) -> Route {
    let Some(path) = arg else {
        return Route::Feed;
    };
    Route::parse(&path).unwrap_or_else(|| {
        warn!(%path, "unknown start path, opening the feed");
        Route::Feed
    })
}

/// Application state for the GUI
struct TubeApp {
    config: Config,
    /// Loading, menu, category and layout state seen by every panel
    state: SharedUiState,
    router: Router,
    header: Header,
    categories: Vec<Category>,
    view_ctx: ViewContext,
    /// Page mounted for the current route
    page: Page,
    /// Cached textures for thumbnails and avatars
    thumbnails: ThumbnailCache,
}

impl TubeApp {
    fn new(config: Config, categories: Vec<Category>, view_ctx: ViewContext, initial: Route) -> Self {
        let mut state = SharedUiState::with_loading(view_ctx.loading.clone());
        let router = Router::new(initial);
        let page = Page::mount(router.current(), &view_ctx, &mut state);
        let thumbnails = ThumbnailCache::new(view_ctx.runtime.clone());
        let mut app = Self {
            config,
            state,
            router,
            header: Header::new(),
            categories,
            view_ctx,
            page,
            thumbnails,
        };
        app.follow_search_route();
        app
    }

    /// Show the query of a search page in the search box
    fn follow_search_route(&mut self) {
        if let Route::SearchResult(query) = self.router.current() {
            self.header.set_search_text(query.clone());
        }
    }
}

/// GUI update loop: called each frame to redraw and handle interactions
impl App for TubeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Take arrived API responses and decoded thumbnails
        self.page.poll(&mut self.state);
        self.thumbnails.drain(ctx);

        let narrow = ctx.screen_rect().width() < NARROW_WIDTH;
        // Route at the start of the frame, to spot navigation below
        let shown = self.router.current().clone();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.header.show(ui, &mut self.state, &mut self.router, narrow);
        });

        let menu_visible =
            self.state.layout() == LayoutMode::Browse && (!narrow || self.state.mobile_menu());
        if menu_visible {
            egui::SidePanel::left("side_menu")
                .exact_width(SIDE_MENU_WIDTH)
                .resizable(false)
                .show(ctx, |ui| {
                    if let Some(route) = side_menu::show(ui, &self.categories, &mut self.state) {
                        self.router.navigate(route);
                    }
                });
        }

        let target = egui::CentralPanel::default()
            .show(ctx, |ui| {
                self.page
                    .show(ui, &mut self.thumbnails, &self.view_ctx, &self.config.player)
            })
            .inner;
        if let Some(route) = target {
            self.router.navigate(route);
        }

        // Back or forward onto a search page refills the search box
        if self.router.current() != &shown {
            self.follow_search_route();
        }

        // Mount or update the page for wherever navigation led this frame
        self.page
            .sync(self.router.current(), &self.view_ctx, &mut self.state);
        if let Page::Details(view) = &mut self.page {
            view.autoplay(&self.view_ctx, &self.config.player);
        }

        // Request periodic repaint so responses show up without input
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_path_picks_the_first_page() {
        assert_eq!(initial_route(None), Route::Feed);
        assert_eq!(
            initial_route(Some("/video/dQw4w9WgXcQ".to_string())),
            Route::Video("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            initial_route(Some("/searchResult/lofi%20beats".to_string())),
            Route::SearchResult("lofi beats".to_string())
        );
        assert_eq!(initial_route(Some("/channel/abc".to_string())), Route::Feed);
    }
}
