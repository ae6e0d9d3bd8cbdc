//! Plain text renderings of the pages.

use common::position::PositionResult;
use router::{Router, View};

pub fn home(router: &Router) -> String {
    let mut page = format!("{}\n", View::Home.title());
    for route in router.routes().iter().filter(|r| r.view != View::Home) {
        page.push_str(&format!("  {} -> {}\n", route.view.title(), route.path));
    }
    page
}

pub fn gps(position: &PositionResult) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(position)?;
    Ok(format!("{}\n{}", View::Gps.title(), json))
}

// Device orientation needs a browser host, the headless shell has none.
pub fn gyroscope() -> String {
    format!("{}\n  orientation sensors unavailable", View::Gyroscope.title())
}
