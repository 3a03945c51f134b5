//! HTTP fetcher
//!
//! This module handles every network request the generator makes:
//! - Building the HTTP client from the fetch configuration
//! - GET requests for product pages, direct or through a relay
//! - GET requests for the product photo
//! - Error classification (transport, timeout, non-2xx)
//!
//! There are no retries; the client timeout is the only cancellation.

use crate::config::FetchConfig;
use crate::render::{decode_image, AssetError};
use crate::url::FetchRoute;
use crate::{PosterError, Result};
use image::RgbaImage;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A retrieved product page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Raw HTML body
    pub html: String,
    /// URL the page was served from, used to resolve relative references
    pub url: Url,
}

/// Error body returned by the relay on failure
#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use product_poster::config::FetchConfig;
/// use product_poster::fetcher::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> std::result::Result<Client, reqwest::Error> {
    client_builder(config).https_only(!config.allow_insecure).build()
}

/// Builds the client used for product photos
///
/// Storefronts still serve images over plain HTTP, so unlike the page
/// client this one accepts both schemes regardless of `allow_insecure`.
pub fn build_asset_client(config: &FetchConfig) -> std::result::Result<Client, reqwest::Error> {
    client_builder(config).build()
}

fn client_builder(config: &FetchConfig) -> ClientBuilder {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .gzip(true)
        .brotli(true)
}

fn classify(url: &Url, error: reqwest::Error) -> PosterError {
    if error.is_timeout() {
        PosterError::Timeout {
            url: url.to_string(),
        }
    } else {
        PosterError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Message for a non-2xx page response
///
/// The relay reports failures as `{error, url, timestamp}` JSON; its
/// `error` field is surfaced when present.
fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<RelayErrorBody>(body) {
        Ok(relay) => {
            tracing::debug!(
                "Relay error for {} at {}: {}",
                relay.url.as_deref().unwrap_or("?"),
                relay.timestamp.as_deref().unwrap_or("?"),
                relay.error
            );
            relay.error
        }
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

/// Fetches the HTML of a product page along `route`
///
/// # Errors
///
/// * `PosterError::Timeout` - No response within the configured timeout
/// * `PosterError::Http` - Transport failure
/// * `PosterError::Status` - Non-2xx response, with the relay's message if any
pub async fn fetch_page(client: &Client, route: &FetchRoute) -> Result<FetchedPage> {
    let target = route.target_url();
    let request = route.request_url();
    tracing::info!("Fetching {}", request);

    let response = client
        .get(request.clone())
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(|e| classify(target, e))?;

    let status = response.status();
    let final_url = match route {
        FetchRoute::Direct(_) => response.url().clone(),
        FetchRoute::Relay { target, .. } => target.clone(),
    };

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = failure_message(status, &body);
        tracing::warn!("Fetching {} failed with HTTP {}: {}", target, status.as_u16(), message);
        return Err(PosterError::Status {
            url: target.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    let html = response.text().await.map_err(|e| classify(target, e))?;
    tracing::debug!("Fetched {} bytes from {}", html.len(), final_url);

    Ok(FetchedPage {
        html,
        url: final_url,
    })
}

/// Downloads and decodes the image at `url`
pub async fn fetch_image(client: &Client, url: &str) -> std::result::Result<RgbaImage, AssetError> {
    tracing::debug!("Loading image {}", url);

    let response = client
        .get(url)
        .header(ACCEPT, "image/*")
        .send()
        .await
        .map_err(|e| AssetError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|e| AssetError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    decode_image(&bytes).map_err(|e| AssetError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
