use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial viewport size the detail view scales images into.
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl UiConfig {
    pub fn new() -> Self {
        let viewport_width = env::var("DEJAVU_VIEWPORT_WIDTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1280.0);

        let viewport_height = env::var("DEJAVU_VIEWPORT_HEIGHT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(720.0);

        Self {
            viewport_width,
            viewport_height,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::new()
    }
}
