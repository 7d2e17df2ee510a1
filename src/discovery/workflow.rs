//! Raw workflow file retrieval from GitHub

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::{DEFAULT_RAW_CONTENT_URL, WorkflowConfig};
use crate::error::FetchError;
use crate::metadata::types::RepositoryRef;

/// Trait for fetching the documentation deployment workflow of a repository
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkflowSource: Send + Sync {
    /// Fetches the workflow text for `repository`
    ///
    /// # Returns
    /// * `Ok(String)` - Raw workflow text
    /// * `Err(FetchError)` - Missing file, non-2xx status or transport failure
    async fn fetch_workflow(&self, repository: &RepositoryRef) -> Result<String, FetchError>;
}

/// Reads workflow files from `raw.githubusercontent.com`
pub struct GitHubRawSource {
    client: Client,
    base_url: String,
    branch: String,
    path: String,
}

impl Default for GitHubRawSource {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_CONTENT_URL, &WorkflowConfig::default())
    }
}

impl GitHubRawSource {
    pub fn new(base_url: &str, workflow: &WorkflowConfig) -> Self {
        Self::with_client(Client::new(), base_url, workflow)
    }

    /// Creates a source sharing an existing connection pool
    pub fn with_client(client: Client, base_url: &str, workflow: &WorkflowConfig) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            branch: workflow.branch.clone(),
            path: workflow.path.trim_start_matches('/').to_string(),
        }
    }

    fn workflow_url(&self, repository: &RepositoryRef) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url, repository.organization, repository.repository, self.branch, self.path
        )
    }
}

#[async_trait]
impl WorkflowSource for GitHubRawSource {
    async fn fetch_workflow(&self, repository: &RepositoryRef) -> Result<String, FetchError> {
        let url = self.workflow_url(repository);
        debug!("Attempting to fetch workflow at: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }

        if !status.is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status {} for {}",
                status, url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        if let Some(content_type) = content_type.filter(|ct| !is_text_content(ct)) {
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected content type {} for {}",
                content_type, url
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        debug!("Fetched {} bytes of workflow text from {}", text.len(), url);
        Ok(text)
    }
}

fn is_text_content(content_type: &str) -> bool {
    content_type.starts_with("text/") || content_type.contains("yaml")
}
