//! Product-details client.
//!
//! Release engineering publishes the current Firefox versions and the
//! localized builds as JSON. Every call here is a fresh fetch: there is no
//! cache and no retry, a failure surfaces as [`CheckError::Unavailable`].

mod types;

use std::sync::Arc;

use log::debug;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::{FIREFOX_PRIMARY_BUILDS_PATH, FIREFOX_VERSIONS_PATH};
use crate::error_handling::{CheckError, InitializationError};

use types::{PrimaryBuildsDocument, VersionsDocument};

pub use types::{LocaleBuilds, ProductVersionDirectory};

/// Fetches version data from a product-details base URL.
#[derive(Debug, Clone)]
pub struct ProductDetailsClient {
    base: Url,
    client: Arc<reqwest::Client>,
}

impl ProductDetailsClient {
    /// Creates a client for `base_url`. A trailing slash is added when missing
    /// so relative endpoint paths resolve beneath it.
    pub fn new(base_url: &str, client: Arc<reqwest::Client>) -> Result<Self, InitializationError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized).map_err(|e| InitializationError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetches `firefox_versions.json`: releng product key -> version.
    pub async fn fetch_versions(&self) -> Result<ProductVersionDirectory, CheckError> {
        let url = self.endpoint(FIREFOX_VERSIONS_PATH)?;
        let document: VersionsDocument = self.fetch_json(&url).await?;
        Ok(types::directory_from_document(document))
    }

    /// Fetches `firefox_primary_builds.json` and returns the builds per locale.
    pub async fn fetch_primary_builds(&self) -> Result<Vec<LocaleBuilds>, CheckError> {
        let url = self.endpoint(FIREFOX_PRIMARY_BUILDS_PATH)?;
        let document: PrimaryBuildsDocument = self.fetch_json(&url).await?;
        Ok(types::locales_from_document(document))
    }

    fn endpoint(&self, path: &str) -> Result<Url, CheckError> {
        self.base
            .join(path)
            .map_err(|e| unavailable(&self.base, e.to_string()))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CheckError> {
        debug!("Fetching product details from {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| unavailable(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(url, format!("HTTP status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(url, e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| unavailable(url, format!("invalid JSON: {e}")))
    }
}

fn unavailable(url: &Url, reason: String) -> CheckError {
    CheckError::Unavailable {
        url: url.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appends_trailing_slash() {
        let client = Arc::new(reqwest::Client::new());
        let details = ProductDetailsClient::new("https://example.org/1.0", client)
            .expect("valid base url");
        assert_eq!(details.base_url().as_str(), "https://example.org/1.0/");
        let endpoint = details.endpoint(FIREFOX_VERSIONS_PATH).unwrap();
        assert_eq!(
            endpoint.as_str(),
            "https://example.org/1.0/firefox_versions.json"
        );
    }

    #[test]
    fn test_new_rejects_garbage_url() {
        let client = Arc::new(reqwest::Client::new());
        let result = ProductDetailsClient::new("not a url", client);
        assert!(matches!(result, Err(InitializationError::InvalidUrl { .. })));
    }
}
