//! Inventory URL candidate generation
//!
//! Turns documentation links, a deployment subpath and a fallback home page
//! into an ordered list of `objects.inv` URLs. Order is priority: the first
//! candidate that verifies wins.
//!
//! For a documentation URL the following are generated, in order:
//! 1. stripped URL (no filename, query, fragment or trailing slash) + `/objects.inv`
//! 2. versioned base (cut right after `stable`, `latest` or a version number) +
//!    `/objects.inv`, then the site base (cut before the first `en`/version
//!    segment) + each of `VERSION_SUFFIXES` and `DIRECTORY_SUFFIXES`
//!
//! Deployment subpaths are joined onto every documentation origin, the fallback
//! home page's origin and the GitHub Pages root; the fallback home page itself
//! only gets `/objects.inv`.

use std::collections::HashSet;

use reqwest::Url;
use tracing::debug;

use crate::discovery::links::{DocumentationUrl, ExtractedLinks};
use crate::metadata::types::RepositoryRef;

pub const INVENTORY_FILE: &str = "objects.inv";

/// Per-version republishing layouts, tried in this order
const VERSION_SUFFIXES: &[&str] = &["stable", "en/stable", "latest", "en/latest"];

/// Documentation living in a subdirectory of the site
const DIRECTORY_SUFFIXES: &[&str] = &["docs", "doc"];

/// Extensions marking the last path segment as a page rather than a directory
const PAGE_EXTENSIONS: &[&str] = &[".html", ".htm"];

const VERSION_SEGMENTS: &[&str] = &["stable", "latest"];
const LANGUAGE_SEGMENTS: &[&str] = &["en"];

/// Absolute http(s) URL hypothesised to serve an inventory file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(Url);

impl Candidate {
    /// Parses an absolute http(s) URL, returning `None` for anything else
    pub fn parse(raw: &str) -> Option<Self> {
        parse_absolute(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0.into()
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered candidate list that silently drops repeats
#[derive(Debug, Clone, Default)]
pub struct CandidateSequence {
    candidates: Vec<Candidate>,
    seen: HashSet<String>,
}

impl CandidateSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `candidate` unless an identical URL is already present
    pub fn push(&mut self, candidate: Candidate) -> bool {
        if !self.seen.insert(candidate.as_str().to_string()) {
            debug!("Skipping duplicate candidate {}", candidate);
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    /// Appends all new candidates and returns the ones actually added
    pub fn extend(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> &[Candidate] {
        let start = self.candidates.len();
        for candidate in candidates {
            self.push(candidate);
        }
        &self.candidates[start..]
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Anatomy of a documentation URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBase {
    /// URL without filename, query, fragment or trailing slash
    pub stripped: Url,
    /// URL cut right after the first version segment, if any
    pub versioned: Option<Url>,
    /// URL cut before the first language or version segment
    pub site: Url,
}

impl DocBase {
    pub fn parse(raw: &str) -> Option<Self> {
        let url = parse_absolute(raw)?;
        let segments = base_segments(&url);

        let stripped = with_segments(&url, &segments);
        let versioned = segments
            .iter()
            .position(|s| is_version_segment(s))
            .map(|j| with_segments(&url, &segments[..=j]));
        let site = segments
            .iter()
            .position(|s| is_language_segment(s) || is_version_segment(s))
            .map(|i| with_segments(&url, &segments[..i]))
            .unwrap_or_else(|| stripped.clone());

        Some(Self {
            stripped,
            versioned,
            site,
        })
    }
}

/// Rules 1 and 2: candidates derived from documentation URLs alone
pub fn documentation_candidates(documentation: &[DocumentationUrl]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for doc in documentation {
        let Some(base) = DocBase::parse(&doc.url) else {
            debug!("Skipping unparsable documentation URL {:?}", doc.url);
            continue;
        };
        debug!(
            "Documentation URL {} => stripped {}, versioned {:?}, site {}",
            doc.url,
            base.stripped,
            base.versioned.as_ref().map(Url::as_str),
            base.site
        );

        candidates.extend(inventory_at(base.stripped.as_str(), ""));
        if let Some(versioned) = &base.versioned {
            candidates.extend(inventory_at(versioned.as_str(), ""));
        }
        for suffix in VERSION_SUFFIXES.iter().chain(DIRECTORY_SUFFIXES) {
            candidates.extend(inventory_at(base.site.as_str(), suffix));
        }
    }

    candidates
}

/// Rule 3: a CI deployment subpath joined onto every known site root
///
/// Roots are the origin of each documentation URL, then the fallback home
/// page's origin, then the GitHub Pages root of the repository.
pub fn deployment_candidates(subpath: &str, links: &ExtractedLinks) -> Vec<Candidate> {
    let subpath = subpath.trim().trim_matches('/');
    if subpath.is_empty() {
        return Vec::new();
    }

    let roots = links
        .documentation
        .iter()
        .map(|doc| doc.url.as_str())
        .chain(links.fallback.as_deref())
        .filter_map(parse_absolute)
        .map(|url| url.origin().ascii_serialization())
        .chain(links.repository.as_ref().map(RepositoryRef::pages_root));

    roots.filter_map(|root| inventory_at(&root, subpath)).collect()
}

/// Rule 4: bare home page + `/objects.inv`
pub fn fallback_candidates(fallback: &str) -> Vec<Candidate> {
    inventory_at(fallback.trim(), "").into_iter().collect()
}

fn inventory_at(base: &str, suffix: &str) -> Option<Candidate> {
    let base = base.trim_end_matches('/');
    let raw = if suffix.is_empty() {
        format!("{}/{}", base, INVENTORY_FILE)
    } else {
        format!("{}/{}/{}", base, suffix, INVENTORY_FILE)
    };

    let candidate = Candidate::parse(&raw);
    if candidate.is_none() {
        debug!("Skipping malformed candidate {:?}", raw);
    }
    candidate
}

/// Parse an absolute http(s) URL; scheme-less hosts are assumed to be https
fn parse_absolute(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) if !raw.contains("://") => Url::parse(&format!("https://{}", raw)).ok()?,
        Err(_) => return None,
    };

    let web_scheme = matches!(url.scheme(), "http" | "https");
    (web_scheme && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}

/// Non-empty path segments with a trailing page filename removed
fn base_segments(url: &Url) -> Vec<String> {
    let mut segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if !url.path().ends_with('/') && segments.last().is_some_and(|last| is_page(last)) {
        segments.pop();
    }
    segments
}

fn with_segments(url: &Url, segments: &[String]) -> Url {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.set_path(&format!("/{}", segments.join("/")));
    base
}

fn is_page(segment: &str) -> bool {
    let lower = segment.to_ascii_lowercase();
    PAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn is_language_segment(segment: &str) -> bool {
    LANGUAGE_SEGMENTS.contains(&segment)
}

/// `stable`, `latest` or a version number such as `3`, `2.1` or `v1.4`
fn is_version_segment(segment: &str) -> bool {
    if VERSION_SEGMENTS.contains(&segment) {
        return true;
    }
    let number = segment.strip_prefix('v').unwrap_or(segment);
    !number.is_empty()
        && number
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
