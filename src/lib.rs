//! Discover the Intersphinx inventory (`objects.inv`) of a published Python package.
//!
//! ```no_run
//! # async fn demo() {
//! if let Some(url) = pypi_docs_url::get_intersphinx_url("requests").await {
//!     println!("{url}");
//! }
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod resolver;

use tracing::warn;

use crate::config::ResolverConfig;
use crate::resolver::InventoryResolver;

/// Resolves the inventory URL of `package_name` with the default configuration.
///
/// Every failure collapses to `None`; details are only logged.
pub async fn get_intersphinx_url(package_name: &str) -> Option<String> {
    get_intersphinx_url_with(&ResolverConfig::default(), package_name).await
}

/// Same as [`get_intersphinx_url`] with an explicit configuration.
pub async fn get_intersphinx_url_with(
    config: &ResolverConfig,
    package_name: &str,
) -> Option<String> {
    let resolver = match InventoryResolver::from_config(config) {
        Ok(resolver) => resolver,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };

    resolver.resolve(package_name).await.into_url()
}
