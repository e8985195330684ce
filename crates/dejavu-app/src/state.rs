use std::sync::Arc;

use dejavu_api::{FetchedImage, ImageFetchError, QueryError};
use dejavu_config::Config;
use dejavu_core::fetch::FetchRegistry;
use dejavu_types::{Match, Selection};
use tokio::sync::RwLock;

/// keyword -> matches. Process-wide; survives navigations within a session.
pub type SearchCache = FetchRegistry<String, Vec<Match>, QueryError>;

/// (image_id, text_ids) -> fetched image.
pub type ImageCache = FetchRegistry<Selection, FetchedImage, ImageFetchError>;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub searches: SearchCache,
    pub images: ImageCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            searches: SearchCache::new(),
            images: ImageCache::new(),
        }
    }
}
