//! Inventory discovery layer
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Links    │────▶│ Candidates  │────▶│  Verifier   │
//! │  (extract)  │     │  (generate) │     │   (probe)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   ▲
//!        ▼                   │
//! ┌─────────────┐     ┌─────────────┐
//! │  Workflow   │────▶│   Subpath   │
//! │   (fetch)   │     │   (parse)   │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`links`]: documentation, fallback and repository links from metadata
//! - [`workflow`]: raw CI workflow retrieval
//! - [`subpath`]: deployment subpath extraction and stable selection
//! - [`candidates`]: ordered, deduplicated `objects.inv` candidates
//! - [`verifier`]: existence checks over candidates

pub mod candidates;
pub mod links;
pub mod subpath;
pub mod verifier;
pub mod workflow;

pub use candidates::{Candidate, CandidateSequence};
pub use links::{DocSource, DocumentationUrl, ExtractedLinks, LinkExtractor};
pub use subpath::SubpathParser;
pub use verifier::{HttpVerifier, Verifier};
pub use workflow::{GitHubRawSource, WorkflowSource};
