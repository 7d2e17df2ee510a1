//! Registry test utilities

use mockito::{Mock, ServerGuard};

use pypi_docs_url::config::ResolverConfig;

/// Configuration pointing every endpoint at the mock server
pub fn test_config(server_url: &str) -> ResolverConfig {
    ResolverConfig {
        registry_url: server_url.to_string(),
        raw_content_url: server_url.to_string(),
        request_timeout_ms: 2_000,
        ..ResolverConfig::default()
    }
}

/// PyPI JSON body with `project_urls` in the given order
pub fn pypi_body(name: &str, project_urls: &[(&str, &str)], home_page: Option<&str>) -> String {
    let urls = project_urls
        .iter()
        .map(|(label, url)| {
            format!(
                "{}: {}",
                serde_json::to_string(label).unwrap(),
                serde_json::to_string(url).unwrap()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"{{"info": {{"name": {}, "home_page": {}, "project_urls": {{{}}}}}, "releases": {{}}}}"#,
        serde_json::to_string(name).unwrap(),
        serde_json::to_string(&home_page).unwrap(),
        urls
    )
}

/// Registers the PyPI metadata endpoint for `name`
pub async fn mock_pypi(server: &mut ServerGuard, name: &str, body: String) -> Mock {
    server
        .mock("GET", format!("/pypi/{}/json", name).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
