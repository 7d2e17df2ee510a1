//! Inventory resolution coordinator
//!
//! Groups the metadata source, workflow source and verifier and runs the
//! discovery stages in priority order:
//! 1. documentation links (rules 1-2)
//! 2. CI deployment subpath, when a GitHub repository is known (rule 3)
//! 3. bare home page, when nothing else pointed at docs (rule 4)
//!
//! Candidates accumulate in a single [`CandidateSequence`]; each stage only
//! probes what it added, so no URL is checked twice.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::{ResolverConfig, SubpathPolicy, USER_AGENT};
use crate::discovery::candidates::{
    Candidate, CandidateSequence, deployment_candidates, documentation_candidates,
    fallback_candidates,
};
use crate::discovery::links::LinkExtractor;
use crate::discovery::subpath::{SubpathParser, select_stable};
use crate::discovery::verifier::{HttpVerifier, Verifier, first_verified};
use crate::discovery::workflow::{GitHubRawSource, WorkflowSource};
use crate::error::ResolveError;
use crate::metadata::pypi::PypiRegistry;
use crate::metadata::source::MetadataSource;
use crate::metadata::types::RepositoryRef;

/// Outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(Candidate),
    NotFound,
}

impl Resolution {
    pub fn into_url(self) -> Option<String> {
        match self {
            Resolution::Found(candidate) => Some(candidate.into_string()),
            Resolution::NotFound => None,
        }
    }
}

/// Resolution outcome plus every candidate that was probed, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionReport {
    pub resolution: Resolution,
    pub probed: Vec<Candidate>,
}

pub struct InventoryResolver {
    metadata: Arc<dyn MetadataSource>,
    workflow: Arc<dyn WorkflowSource>,
    verifier: Arc<dyn Verifier>,
    links: LinkExtractor,
    subpaths: SubpathParser,
    policy: SubpathPolicy,
}

impl InventoryResolver {
    /// Create a new InventoryResolver with the given components
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        workflow: Arc<dyn WorkflowSource>,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        Self {
            metadata,
            workflow,
            verifier,
            links: LinkExtractor::new(),
            subpaths: SubpathParser::new(),
            policy: SubpathPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SubpathPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build HTTP-backed collaborators sharing one client
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ResolveError::HttpClient)?;

        Ok(Self::new(
            Arc::new(PypiRegistry::with_client(
                client.clone(),
                config.registry_url.clone(),
            )),
            Arc::new(GitHubRawSource::with_client(
                client.clone(),
                &config.raw_content_url,
                &config.workflow,
            )),
            Arc::new(HttpVerifier::new(client)),
        )
        .with_policy(config.workflow.subpath_policy))
    }

    pub async fn resolve(&self, package_name: &str) -> Resolution {
        self.resolve_with_trace(package_name).await.resolution
    }

    pub async fn resolve_with_trace(&self, package_name: &str) -> ResolutionReport {
        let mut probed = Vec::new();
        let resolution = match self.run(package_name, &mut probed).await {
            Some(candidate) => {
                info!("Found objects.inv for {} => {}", package_name, candidate);
                Resolution::Found(candidate)
            }
            None => {
                info!(
                    "No objects.inv discovered for {} after {} probes",
                    package_name,
                    probed.len()
                );
                Resolution::NotFound
            }
        };

        ResolutionReport { resolution, probed }
    }

    async fn run(&self, package_name: &str, probed: &mut Vec<Candidate>) -> Option<Candidate> {
        let metadata = match self.metadata.fetch_metadata(package_name).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Failed to fetch metadata for {}: {}", package_name, e);
                return None;
            }
        };

        let links = self.links.extract(&metadata);
        let mut sequence = CandidateSequence::new();

        let added = sequence.extend(documentation_candidates(&links.documentation));
        if let Some(found) = first_verified(self.verifier.as_ref(), added, probed).await {
            return Some(found);
        }

        if let Some(repository) = &links.repository {
            debug!("Attempting workflow approach with {}", repository);
            if let Some(subpath) = self.stable_subpath(repository).await {
                let added = sequence.extend(deployment_candidates(&subpath, &links));
                if let Some(found) = first_verified(self.verifier.as_ref(), added, probed).await {
                    return Some(found);
                }
            }
        } else {
            debug!("No GitHub link found; skipping workflow approach");
        }

        if let Some(fallback) = &links.fallback {
            debug!("Trying home page fallback {}", fallback);
            let added = sequence.extend(fallback_candidates(fallback));
            if let Some(found) = first_verified(self.verifier.as_ref(), added, probed).await {
                return Some(found);
            }
        }

        debug!(
            "All approaches failed for {} ({} candidates)",
            package_name,
            sequence.len()
        );
        None
    }

    async fn stable_subpath(&self, repository: &RepositoryRef) -> Option<String> {
        let content = match self.workflow.fetch_workflow(repository).await {
            Ok(content) => content,
            Err(e) => {
                debug!("No deployment workflow for {}: {}", repository, e);
                return None;
            }
        };

        let subpaths = self.subpaths.parse(&content);
        select_stable(&subpaths, self.policy).map(str::to_string)
    }
}
