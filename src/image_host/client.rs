//! File listing against the asset host's REST API.
//!
//! Pagination is passed straight through: callers choose `page` and `limit`
//! and get the host's `next`/`previous` links back untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DripcheckError, Result};

/// Asset host REST API root
const API_BASE_URL: &str = "https://api.uploadcare.com";
const ACCEPT_HEADER: &str = "application/vnd.uploadcare-v0.7+json";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 100;

/// One file as returned by the host
#[derive(Debug, Deserialize)]
struct HostFile {
    uuid: String,
    original_file_url: String,
    original_filename: String,
}

/// Files listing page as returned by the host
#[derive(Debug, Deserialize)]
struct HostFilesPage {
    results: Vec<HostFile>,
    next: Option<String>,
    previous: Option<String>,
    total: u64,
}

/// An image stored on the asset host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedImage {
    pub uuid: String,
    pub cdn_url: String,
    pub original_filename: String,
}

impl From<HostFile> for HostedImage {
    fn from(file: HostFile) -> Self {
        HostedImage {
            uuid: file.uuid,
            cdn_url: file.original_file_url,
            original_filename: file.original_filename,
        }
    }
}

/// One page of hosted images
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageListing {
    pub images: Vec<HostedImage>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub total: u64,
}

/// Authenticated client for the asset host
#[derive(Clone)]
pub struct ImageHostClient {
    client: reqwest::Client,
    base_url: String,
    public_key: String,
    secret_key: String,
}

impl fmt::Debug for ImageHostClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHostClient")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl ImageHostClient {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::with_base_url(API_BASE_URL, public_key, secret_key)
    }

    /// Client against a different API root (used by tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    fn authorization(&self) -> String {
        format!("Uploadcare.Simple {}:{}", self.public_key, self.secret_key)
    }

    /// Fetch one page of the file listing
    pub async fn list_files(&self, page: u32, limit: u32) -> Result<ImageListing> {
        let url = format!("{}/files/?limit={}&page={}", self.base_url, limit, page);
        log::debug!("Listing hosted images: page {}, limit {}", page, limit);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.authorization())
            .header("Accept", ACCEPT_HEADER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DripcheckError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let files: HostFilesPage = serde_json::from_str(&body)?;

        log::info!(
            "Fetched {} hosted images ({} total)",
            files.results.len(),
            files.total
        );

        Ok(ImageListing {
            images: files.results.into_iter().map(HostedImage::from).collect(),
            next: files.next,
            previous: files.previous,
            total: files.total,
        })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
