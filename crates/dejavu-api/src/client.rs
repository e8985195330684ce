use std::time::Duration;

use dejavu_core::route;
use dejavu_types::{Match, PixelSize, Selection};
use reqwest::header;

use crate::{FetchedImage, ImageFetchError, QueryError, SearchBackend};

/// Reqwest-backed Dejavu client.
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl SearchBackend for HttpBackend {
    async fn search(&self, keyword: &str) -> Result<Vec<Match>, QueryError> {
        let url = format!("{}{}", self.base_url, route::api_search_path(keyword));
        tracing::debug!("search request: {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status));
        }

        let body = response.text().await?;
        let matches: Vec<Match> = serde_json::from_str(&body)?;
        tracing::debug!("search returned {} matches", matches.len());
        Ok(matches)
    }

    async fn fetch_image(&self, selection: &Selection) -> Result<FetchedImage, ImageFetchError> {
        let url = format!("{}{}", self.base_url, route::api_image_path(selection));
        tracing::debug!("image request: {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;
        let decoded = image::load_from_memory(&bytes)?;
        let (width, height) = image::GenericImageView::dimensions(&decoded);
        let native = PixelSize { width, height };

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
            native,
        })
    }
}
