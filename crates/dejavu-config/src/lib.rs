use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::ui::UiConfig;

pub mod network;
pub mod ui;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub ui: UiConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            network: NetworkConfig::new(),
            ui: UiConfig::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
