//! Documentation and repository link extraction
//!
//! Scans registry metadata with label and substring heuristics. Precedence for
//! the documentation URL:
//! 1. first labeled URL whose label contains `doc` (case-insensitive)
//! 2. the home page, when it looks like a docs host (`readthedocs`, `docs`)
//! 3. the first URL containing `stable` or `latest`
//!
//! The home page is reported as a fallback only when none of the above matched.

use regex::Regex;
use tracing::debug;

use crate::metadata::types::{PackageMetadata, RepositoryRef};

const DOC_LABEL_TOKEN: &str = "doc";
const DOC_HOST_HINTS: &[&str] = &["readthedocs", "docs"];
const VERSION_TOKENS: &[&str] = &["stable", "latest"];
const HOMEPAGE_LABELS: &[&str] = &["homepage", "home page", "home"];

/// How a documentation URL was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSource {
    /// Labeled URL whose label mentions docs
    Labeled,
    /// Home page pointing at a documentation host
    HomePage,
    /// Any URL containing `stable` or `latest`
    Versioned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationUrl {
    pub url: String,
    pub source: DocSource,
}

/// Result of scanning a metadata record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    /// Documentation URLs in priority order, without duplicates
    pub documentation: Vec<DocumentationUrl>,
    /// Bare home page, only set when `documentation` is empty
    pub fallback: Option<String>,
    pub repository: Option<RepositoryRef>,
}

impl ExtractedLinks {
    pub fn is_empty(&self) -> bool {
        self.documentation.is_empty() && self.fallback.is_none() && self.repository.is_none()
    }
}

/// Extracts documentation and source-repository links from metadata
pub struct LinkExtractor {
    /// Regex for `github.com/<org>/<repo>`, host not preceded by a subdomain
    github_re: Regex,
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            github_re: Regex::new(
                r"(?i)(?:^|[/@])(?:www\.)?github\.com[/:]([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)",
            )
            .unwrap(),
        }
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor {
    pub fn extract(&self, metadata: &PackageMetadata) -> ExtractedLinks {
        let mut documentation = Vec::new();

        let primary = self
            .labeled_documentation(metadata)
            .or_else(|| self.documentation_home_page(metadata));
        if let Some(doc) = primary {
            documentation.push(doc);
        }

        if let Some(versioned) = self.versioned_link(metadata)
            && documentation.iter().all(|d| d.url != versioned.url)
        {
            documentation.push(versioned);
        }

        let fallback = if documentation.is_empty() {
            self.fallback_url(metadata)
        } else {
            None
        };

        let repository = self.repository(metadata);

        debug!(
            "Extracted links for {}: documentation={:?}, fallback={:?}, repository={:?}",
            metadata.name, documentation, fallback, repository
        );

        ExtractedLinks {
            documentation,
            fallback,
            repository,
        }
    }

    fn labeled_documentation(&self, metadata: &PackageMetadata) -> Option<DocumentationUrl> {
        metadata
            .project_urls
            .iter()
            .find(|(label, _)| label.to_lowercase().contains(DOC_LABEL_TOKEN))
            .map(|(label, url)| {
                debug!("Found doc-labeled link {:?} => {}", label, url);
                DocumentationUrl {
                    url: url.clone(),
                    source: DocSource::Labeled,
                }
            })
    }

    fn documentation_home_page(&self, metadata: &PackageMetadata) -> Option<DocumentationUrl> {
        let home_page = metadata.home_page.as_deref()?;
        let lower = home_page.to_lowercase();
        DOC_HOST_HINTS
            .iter()
            .any(|hint| lower.contains(hint))
            .then(|| {
                debug!("Using home page as doc link => {}", home_page);
                DocumentationUrl {
                    url: home_page.to_string(),
                    source: DocSource::HomePage,
                }
            })
    }

    fn versioned_link(&self, metadata: &PackageMetadata) -> Option<DocumentationUrl> {
        metadata
            .all_urls()
            .find(|url| VERSION_TOKENS.iter().any(|token| url.contains(token)))
            .map(|url| {
                debug!("Found URL containing 'stable' or 'latest' => {}", url);
                DocumentationUrl {
                    url: url.to_string(),
                    source: DocSource::Versioned,
                }
            })
    }

    fn fallback_url(&self, metadata: &PackageMetadata) -> Option<String> {
        metadata.home_page.clone().or_else(|| {
            metadata
                .project_urls
                .iter()
                .find(|(label, _)| HOMEPAGE_LABELS.contains(&label.trim().to_lowercase().as_str()))
                .map(|(_, url)| url.clone())
        })
    }

    fn repository(&self, metadata: &PackageMetadata) -> Option<RepositoryRef> {
        metadata.all_urls().find_map(|url| self.parse_repository(url))
    }

    /// Parse `github.com/<org>/<repo>` out of a URL, stripping a `.git` suffix
    pub fn parse_repository(&self, url: &str) -> Option<RepositoryRef> {
        let caps = self.github_re.captures(url)?;
        let organization = caps.get(1)?.as_str();
        let repository = caps.get(2)?.as_str().trim_end_matches(".git");
        if repository.is_empty() {
            return None;
        }
        Some(RepositoryRef::new(organization, repository))
    }
}
