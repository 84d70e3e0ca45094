//! Location lookup client - regions and communes from an external API.
//!
//! Responses are passed through verbatim; this service never parses them.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Pass-through lookups against the location service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    /// Raw regions list
    async fn regions(&self) -> AppResult<String>;

    /// Raw communes list for one region code
    async fn communes(&self, region_code: &str) -> AppResult<String>;
}

/// Reqwest-backed [`LocationDirectory`].
pub struct HttpLocationDirectory {
    client: Client,
    base_url: Url,
}

impl HttpLocationDirectory {
    /// Build a client for `config.location_api_url` with the configured timeout.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let base_url = Url::parse(&config.location_api_url).map_err(|e| {
            AppError::internal(format!(
                "Invalid LOCATION_API_URL {}: {}",
                config.location_api_url, e
            ))
        })?;
        let client = Client::builder()
            .timeout(config.location_api_timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    async fn fetch_text(&self, url: Url) -> AppResult<String> {
        tracing::debug!(%url, "Fetching from location service");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(format!("responded with {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::upstream(e.to_string()))
    }
}

#[async_trait]
impl LocationDirectory for HttpLocationDirectory {
    async fn regions(&self) -> AppResult<String> {
        self.fetch_text(regions_url(&self.base_url)?).await
    }

    async fn communes(&self, region_code: &str) -> AppResult<String> {
        self.fetch_text(communes_url(&self.base_url, region_code)?)
            .await
    }
}

/// `{base}/regiones`
fn regions_url(base: &Url) -> AppResult<Url> {
    with_segments(base, &["regiones"])
}

/// `{base}/regiones/{code}/comunas`, with the code percent-encoded.
///
/// `.` and `..` are rejected: the URL path normalization would drop them
/// and address a different resource.
fn communes_url(base: &Url, region_code: &str) -> AppResult<Url> {
    if matches!(region_code, "" | "." | "..") {
        return Err(AppError::validation(format!(
            "Invalid region code: {:?}",
            region_code
        )));
    }
    with_segments(base, &["regiones", region_code, "comunas"])
}

fn with_segments(base: &Url, segments: &[&str]) -> AppResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::internal(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
