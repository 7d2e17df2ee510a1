//! Package metadata layer
//! - types.rs: PackageMetadata and RepositoryRef records
//! - source.rs: MetadataSource trait definition
//! - pypi.rs: PyPI JSON API client

pub mod pypi;
pub mod source;
pub mod types;

pub use pypi::PypiRegistry;
pub use source::MetadataSource;
pub use types::{PackageMetadata, RepositoryRef};
