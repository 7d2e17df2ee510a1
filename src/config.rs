use serde::Deserialize;
use tracing::warn;

// =============================================================================
// Endpoint defaults
// =============================================================================

/// PyPI JSON API host
pub const DEFAULT_REGISTRY_URL: &str = "https://pypi.org";

/// Host serving raw repository files
pub const DEFAULT_RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";

/// Branch the documentation workflow is read from
pub const DEFAULT_WORKFLOW_BRANCH: &str = "main";

/// Workflow file that deploys the Python documentation
pub const DEFAULT_WORKFLOW_PATH: &str = ".github/workflows/docs-python.yml";

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for every HTTP request in milliseconds (10 seconds)
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

pub const USER_AGENT: &str = "pypi-docs-url";

/// Environment variable holding the `tracing` filter directive for the binary
pub const LOG_ENV: &str = "PYPI_DOCS_URL_LOG";

const REGISTRY_ENV: &str = "PYPI_DOCS_URL_REGISTRY";
const RAW_CONTENT_ENV: &str = "PYPI_DOCS_URL_RAW_CONTENT";
const TIMEOUT_ENV: &str = "PYPI_DOCS_URL_TIMEOUT_MS";
const BRANCH_ENV: &str = "PYPI_DOCS_URL_WORKFLOW_BRANCH";
const POLICY_ENV: &str = "PYPI_DOCS_URL_SUBPATH_POLICY";

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    pub registry_url: String,
    pub raw_content_url: String,
    pub request_timeout_ms: u64,
    pub workflow: WorkflowConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            raw_content_url: DEFAULT_RAW_CONTENT_URL.to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            workflow: WorkflowConfig::default(),
        }
    }
}

/// Where the deployment workflow lives and how its subpaths are ranked
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowConfig {
    pub branch: String,
    pub path: String,
    pub subpath_policy: SubpathPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_WORKFLOW_BRANCH.to_string(),
            path: DEFAULT_WORKFLOW_PATH.to_string(),
            subpath_policy: SubpathPolicy::default(),
        }
    }
}

/// Tie-break used to pick the stable deployment subpath
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SubpathPolicy {
    /// Last subpath that is neither `dev` nor templated
    #[default]
    LastQualifying,
    /// First qualifying subpath containing `stable`, else last qualifying
    StableToken,
}

impl SubpathPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "last-qualifying" => Some(Self::LastQualifying),
            "stable-token" => Some(Self::StableToken),
            _ => None,
        }
    }
}

impl ResolverConfig {
    /// Default configuration overlaid with `PYPI_DOCS_URL_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(REGISTRY_ENV).filter(|v| !v.trim().is_empty()) {
            self.registry_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup(RAW_CONTENT_ENV).filter(|v| !v.trim().is_empty()) {
            self.raw_content_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => self.request_timeout_ms = ms,
                _ => warn!("Ignoring invalid {}: {:?}", TIMEOUT_ENV, raw),
            }
        }
        if let Some(branch) = lookup(BRANCH_ENV).filter(|v| !v.trim().is_empty()) {
            self.workflow.branch = branch.trim().to_string();
        }
        if let Some(raw) = lookup(POLICY_ENV) {
            match SubpathPolicy::parse(&raw) {
                Some(policy) => self.workflow.subpath_policy = policy,
                None => warn!("Ignoring invalid {}: {:?}", POLICY_ENV, raw),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn resolver_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ResolverConfig>(json!({
            "requestTimeoutMs": 2500
        }))
        .unwrap();

        assert_eq!(result.request_timeout_ms, 2500);
        assert_eq!(result.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(result.workflow, WorkflowConfig::default());
    }

    #[test]
    fn resolver_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ResolverConfig>(json!({
            "registryUrl": "http://localhost:8080",
            "rawContentUrl": "http://localhost:8081",
            "requestTimeoutMs": 500,
            "workflow": {
                "branch": "master",
                "path": ".github/workflows/docs.yml",
                "subpathPolicy": "stable-token"
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            ResolverConfig {
                registry_url: "http://localhost:8080".to_string(),
                raw_content_url: "http://localhost:8081".to_string(),
                request_timeout_ms: 500,
                workflow: WorkflowConfig {
                    branch: "master".to_string(),
                    path: ".github/workflows/docs.yml".to_string(),
                    subpath_policy: SubpathPolicy::StableToken,
                },
            }
        );
    }

    #[test]
    fn with_env_overrides_endpoints_and_policy() {
        let config = ResolverConfig::default().with_env(env(&[
            (REGISTRY_ENV, "http://127.0.0.1:9000/"),
            (TIMEOUT_ENV, "1500"),
            (BRANCH_ENV, "develop"),
            (POLICY_ENV, "stable-token"),
        ]));

        assert_eq!(config.registry_url, "http://127.0.0.1:9000");
        assert_eq!(config.raw_content_url, DEFAULT_RAW_CONTENT_URL);
        assert_eq!(config.request_timeout_ms, 1500);
        assert_eq!(config.workflow.branch, "develop");
        assert_eq!(config.workflow.subpath_policy, SubpathPolicy::StableToken);
    }

    #[test]
    fn with_env_ignores_invalid_values() {
        let config = ResolverConfig::default().with_env(env(&[
            (TIMEOUT_ENV, "soon"),
            (POLICY_ENV, "random"),
        ]));

        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn with_env_without_variables_keeps_defaults() {
        let config = ResolverConfig::default().with_env(env(&[]));
        assert_eq!(config, ResolverConfig::default());
    }
}
