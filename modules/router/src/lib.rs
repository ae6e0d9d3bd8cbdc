// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Static route table of the shell.
//!
//! Maps a location to one of the three page views. Matching follows the
//! defaults of a history-mode router: query and fragment are ignored, a
//! trailing slash is tolerated and paths compare case-insensitively.

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

pub mod history;

/// The page views the shell can display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Gps,
    Gyroscope,
}

impl View {
    /// Human readable title of the view.
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Gps => "GPS",
            View::Gyroscope => "Gyroscope",
        }
    }
}

/// A single entry of the route table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
}

/// The routes registered by the shell, in registration order.
pub const ROUTES: [Route; 3] = [
    Route {
        path: "/",
        name: "Home",
        view: View::Home,
    },
    Route {
        path: "/gps",
        name: "Gps",
        view: View::Gps,
    },
    Route {
        path: "/gyroscope",
        name: "Gyroscope",
        view: View::Gyroscope,
    },
];

/// Errors reported when building a [`Router`] from an invalid table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route path `{0}` is registered more than once")]
    DuplicatePath(&'static str),
    #[error("route name `{0}` is registered more than once")]
    DuplicateName(&'static str),
    #[error("route path `{0}` is not root-relative")]
    NotRootRelative(&'static str),
}

/// Resolves locations to [`Route`]s.
#[derive(Clone, Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Creates a router over `routes`.
    ///
    /// Paths must start with `/` and be unique after normalization, names must
    /// be unique.
    pub fn new(routes: &[Route]) -> Result<Self, RouteError> {
        let mut paths = HashSet::new();
        let mut names = HashSet::new();
        for route in routes {
            if !route.path.starts_with('/') {
                return Err(RouteError::NotRootRelative(route.path));
            }
            if !paths.insert(normalize(route.path)) {
                return Err(RouteError::DuplicatePath(route.path));
            }
            if !names.insert(route.name) {
                return Err(RouteError::DuplicateName(route.name));
            }
        }
        Ok(Router {
            routes: routes.to_vec(),
        })
    }

    /// Returns the registered routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolves `location` to its route, `None` when nothing matches.
    pub fn resolve(&self, location: &str) -> Option<&Route> {
        let path = normalize(location);
        let route = self.routes.iter().find(|r| normalize(r.path) == path);
        debug!("Resolved location {} to {:?}", location, route.map(|r| r.name));
        route
    }

    /// Looks a route up by its name.
    pub fn resolve_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }
}

impl Default for Router {
    fn default() -> Self {
        Router {
            routes: ROUTES.to_vec(),
        }
    }
}

/// Strips query and fragment, a single trailing slash and folds ASCII case.
fn normalize(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    let path = match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    };
    if path.is_empty() {
        return "/".to_string();
    }
    path.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn normalize_locations() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/GPS/"), "/gps");
        assert_eq!(normalize("/gps?x=1#top"), "/gps");
        assert_eq!(normalize("/?tab=1"), "/");
        assert_eq!(normalize("/gps//"), "/gps/");
    }
}
