//! Maps request paths to the views mounted for them.

use crate::layout::View;
use crate::welcome;

/// Builds the view mounted for a route.
pub type ViewFactory = fn() -> View;

/// A registered path and the view it mounts.
#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    factory: ViewFactory,
}

impl Route {
    /// The path this route matches.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds the view of this route.
    pub fn mount(&self) -> View {
        (self.factory)()
    }
}

/// An ordered table of routes.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Creates a router with no routes.
    pub fn new() -> Router {
        Self { routes: Vec::new() }
    }

    /// Registers `factory` for `path`, replacing any previous registration.
    pub fn route(mut self, path: impl Into<String>, factory: ViewFactory) -> Router {
        let path = path.into();

        match self.routes.iter_mut().find(|r| r.path == path) {
            Some(route) => route.factory = factory,
            None => self.routes.push(Route { path, factory }),
        }

        self
    }

    /// Finds the route matching `path`.
    ///
    /// The query string and the fragment are ignored; an empty path is the
    /// root path. Matching is otherwise exact.
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Mounts the view registered for `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<View> {
        self.find(path).map(Route::mount)
    }

    /// The registered paths, in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(Route::path)
    }
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];

    if path.is_empty() { "/" } else { path }
}

/// The routing table of the tracker.
pub fn app_router() -> Router {
    Router::new().route("/", welcome::welcome_view)
}
