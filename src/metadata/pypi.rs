//! PyPI registry client for fetching Python package metadata

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::DEFAULT_REGISTRY_URL;
use crate::error::FetchError;
use crate::metadata::source::MetadataSource;
use crate::metadata::types::PackageMetadata;

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    base_url: String,
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL.to_string())
    }
}

impl PypiRegistry {
    pub fn new(base_url: String) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a registry client sharing an existing connection pool
    pub fn with_client(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PackageMetadata,
}

#[async_trait]
impl MetadataSource for PypiRegistry {
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata, FetchError> {
        let url = format!("{}/pypi/{}/json", self.base_url, package_name);
        debug!("Fetching PyPI metadata: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("PyPI API returned status {}: {}", status, url);
            return Err(FetchError::InvalidResponse(format!(
                "PyPI API returned status {}",
                status
            )));
        }

        let pypi_response: PypiResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse PyPI response for {}: {}", package_name, e);
            FetchError::InvalidResponse(e.to_string())
        })?;

        let mut metadata = pypi_response.info;
        if metadata.name.is_empty() {
            metadata.name = package_name.to_string();
        }

        debug!(
            "Found {} labeled URLs for package {} (home page: {:?})",
            metadata.project_urls.len(),
            package_name,
            metadata.home_page
        );

        Ok(metadata)
    }
}
