//! Logging initialization for the command-line binary

use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs a stderr `fmt` subscriber filtered by `PYPI_DOCS_URL_LOG`.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var(LOG_ENV).ok()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn env_filter(directive: Option<String>) -> EnvFilter {
    directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_defaults_to_warn() {
        assert_eq!(env_filter(None).to_string(), "warn");
        assert_eq!(env_filter(Some("  ".to_string())).to_string(), "warn");
    }

    #[test]
    fn env_filter_uses_given_directive() {
        assert_eq!(
            env_filter(Some("pypi_docs_url=debug".to_string())).to_string(),
            "pypi_docs_url=debug"
        );
    }
}
