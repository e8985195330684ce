use dejavu_types::{Match, PixelSize, Selection};

pub mod client;

pub use client::HttpBackend;

/// Search/image provider interface. The backend is a black box reached over
/// HTTP in production; tests script this seam instead.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Ranked matches for a keyword. An empty keyword is a legal request.
    /// A response is accepted only as a complete well-formed sequence of
    /// matches or rejected wholesale.
    async fn search(&self, keyword: &str) -> Result<Vec<Match>, QueryError>;

    /// The rendered image for a selection; the selection's text ids are
    /// advisory and forwarded for backend-side highlighting.
    async fn fetch_image(&self, selection: &Selection) -> Result<FetchedImage, ImageFetchError>;
}

/// One fetched image, with its native dimensions probed from the bytes.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub native: PixelSize,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed search response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ImageFetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("image fetch returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("unreadable image payload: {0}")]
    Undecodable(#[from] image::ImageError),
}
