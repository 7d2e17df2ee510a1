//! Typed records for registry metadata

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Metadata fields used for documentation discovery
///
/// `project_urls` keeps the registry's label order so "first match wins"
/// scans are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project_urls: IndexMap<String, String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub home_page: Option<String>,
}

impl PackageMetadata {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_project_url(mut self, label: &str, url: &str) -> Self {
        self.project_urls.insert(label.to_string(), url.to_string());
        self
    }

    pub fn with_home_page(mut self, url: &str) -> Self {
        self.home_page = Some(url.to_string()).filter(|u| !u.trim().is_empty());
        self
    }

    /// All URLs in scan order: labeled URLs first, then the home page.
    pub fn all_urls(&self) -> impl Iterator<Item = &str> {
        self.project_urls
            .values()
            .map(String::as_str)
            .chain(self.home_page.as_deref())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let urls: Option<IndexMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(urls
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(label, url)| {
            url.map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .map(|u| (label, u))
        })
        .collect())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// GitHub organization/repository pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub organization: String,
    pub repository: String,
}

impl RepositoryRef {
    pub fn new(organization: &str, repository: &str) -> Self {
        Self {
            organization: organization.to_string(),
            repository: repository.to_string(),
        }
    }

    /// Root of the project's GitHub Pages site, e.g. `https://pola-rs.github.io/polars`
    pub fn pages_root(&self) -> String {
        format!(
            "https://{}.github.io/{}",
            self.organization.to_ascii_lowercase(),
            self.repository
        )
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_keeps_project_url_order() {
        let metadata: PackageMetadata = serde_json::from_str(
            r#"{
                "name": "pytest",
                "project_urls": {
                    "Source": "https://github.com/pytest-dev/pytest",
                    "Changelog": "https://docs.pytest.org/en/stable/changelog.html",
                    "Tracker": "https://github.com/pytest-dev/pytest/issues"
                },
                "home_page": null
            }"#,
        )
        .unwrap();

        let labels: Vec<&str> = metadata.project_urls.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Source", "Changelog", "Tracker"]);
        assert_eq!(metadata.home_page, None);
    }

    #[test]
    fn deserialize_treats_null_project_urls_and_blank_home_page_as_absent() {
        let metadata: PackageMetadata = serde_json::from_value(json!({
            "name": "tiny",
            "project_urls": null,
            "home_page": "  "
        }))
        .unwrap();

        assert!(metadata.project_urls.is_empty());
        assert_eq!(metadata.home_page, None);
    }

    #[test]
    fn deserialize_drops_null_and_blank_labeled_urls() {
        let metadata: PackageMetadata = serde_json::from_value(json!({
            "project_urls": {"Documentation": null, "Homepage": "", "Source": "https://github.com/a/b"}
        }))
        .unwrap();

        assert_eq!(metadata.project_urls.len(), 1);
        assert_eq!(
            metadata.project_urls.get("Source"),
            Some(&"https://github.com/a/b".to_string())
        );
    }

    #[test]
    fn all_urls_lists_labeled_urls_before_home_page() {
        let metadata = PackageMetadata::new("flask")
            .with_project_url("Documentation", "https://flask.palletsprojects.com/")
            .with_project_url("Source", "https://github.com/pallets/flask/")
            .with_home_page("https://palletsprojects.com/p/flask");

        let urls: Vec<&str> = metadata.all_urls().collect();
        assert_eq!(
            urls,
            vec![
                "https://flask.palletsprojects.com/",
                "https://github.com/pallets/flask/",
                "https://palletsprojects.com/p/flask",
            ]
        );
    }

    #[test]
    fn pages_root_lowercases_organization() {
        let repo = RepositoryRef::new("PyO3", "maturin");
        assert_eq!(repo.pages_root(), "https://pyo3.github.io/maturin");
        assert_eq!(repo.to_string(), "PyO3/maturin");
    }
}
