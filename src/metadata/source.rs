//! Trait for fetching package metadata from a registry

#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;
use crate::metadata::types::PackageMetadata;

/// Trait for fetching the metadata record of a published package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetches the metadata record for a package
    ///
    /// # Arguments
    /// * `package_name` - The name of the package as published (e.g., "requests")
    ///
    /// # Returns
    /// * `Ok(PackageMetadata)` - Labeled URLs and home page of the package
    /// * `Err(FetchError)` - If the registry is unreachable or the response is malformed
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata, FetchError>;
}
