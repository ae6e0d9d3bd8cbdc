use crate::{Route, Router};
use tracing::debug;

/// Session history on top of a [`Router`].
///
/// Works like the browser history stack: pushing a location drops every
/// entry ahead of the current one. Locations that match no route are still
/// recorded, [`Navigator::current_route`] then yields `None`.
#[derive(Clone, Debug)]
pub struct Navigator {
    router: Router,
    entries: Vec<String>,
    index: usize,
}

impl Navigator {
    /// Creates a navigator starting at `initial`.
    pub fn new(router: Router, initial: &str) -> Self {
        Navigator {
            router,
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Navigates to `location` and returns the matched route.
    pub fn push(&mut self, location: &str) -> Option<&Route> {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index = self.entries.len() - 1;
        debug!("Pushed location {}", location);
        self.current_route()
    }

    /// Replaces the current entry with `location` and returns the matched route.
    pub fn replace(&mut self, location: &str) -> Option<&Route> {
        self.entries[self.index] = location.to_string();
        debug!("Replaced location with {}", location);
        self.current_route()
    }

    /// Goes one entry back. Returns `false` when already at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Goes one entry forward. Returns `false` when already at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn current_location(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.router.resolve(&self.entries[self.index])
    }
}
