//! Routes between the three pages and the navigation history

use std::fmt;

/// A page the window can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Feed,
    /// `/searchResult/:query`
    SearchResult(String),
    /// `/video/:id`
    Video(String),
}

impl Route {
    /// Parse a path; unknown paths and empty parameters yield `None`
    pub fn parse(path: &str) -> Option<Route> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let route = match (segments.next(), segments.next()) {
            (None, _) => Route::Feed,
            (Some("searchResult"), Some(query)) => Route::SearchResult(decode(query)?),
            (Some("video"), Some(id)) => Route::Video(decode(id)?),
            _ => return None,
        };
        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    /// Path with the parameter URL-encoded
    pub fn path(&self) -> String {
        match self {
            Route::Feed => "/".to_string(),
            Route::SearchResult(query) => format!("/searchResult/{}", urlencoding::encode(query)),
            Route::Video(id) => format!("/video/{}", urlencoding::encode(id)),
        }
    }

    /// First path segment, as the header uses it
    pub fn page_name(&self) -> Option<&'static str> {
        match self {
            Route::Feed => None,
            Route::SearchResult(_) => Some("searchResult"),
            Route::Video(_) => Some("video"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn decode(segment: &str) -> Option<String> {
    let decoded = urlencoding::decode(segment).ok()?.into_owned();
    (!decoded.is_empty()).then_some(decoded)
}

/// Current route plus the routes visited before it
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
    current: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Feed)
    }
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            history: Vec::new(),
            current: initial,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Go to a route; navigating to the current route is a no-op
    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::info!(from = %self.current, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Return to the previous route; false when there is none
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                tracing::info!(from = %self.current, to = %previous, "back");
                self.current = previous;
                true
            }
            None => false,
        }
    }
}
