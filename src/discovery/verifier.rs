//! Candidate existence checks

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::discovery::candidates::Candidate;

/// Trait for checking whether a candidate URL serves a file
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Returns `true` only for a success status; errors count as absence
    async fn exists(&self, candidate: &Candidate) -> bool;
}

/// HEAD-request verifier, redirects followed by the client
pub struct HttpVerifier {
    client: Client,
}

impl Default for HttpVerifier {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl HttpVerifier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Verifier for HttpVerifier {
    async fn exists(&self, candidate: &Candidate) -> bool {
        match self.client.head(candidate.url().clone()).send().await {
            Ok(response) => {
                let status = response.status();
                debug!("HEAD {} => {}", candidate, status);
                status.is_success()
            }
            Err(e) => {
                debug!("HEAD {} failed: {}", candidate, e);
                false
            }
        }
    }
}

/// Probes `candidates` in order, stopping at the first success
///
/// Every probed candidate is appended to `probed`.
pub async fn first_verified(
    verifier: &dyn Verifier,
    candidates: &[Candidate],
    probed: &mut Vec<Candidate>,
) -> Option<Candidate> {
    for candidate in candidates {
        probed.push(candidate.clone());
        if verifier.exists(candidate).await {
            debug!("Found a valid inventory => {}", candidate);
            return Some(candidate.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::time::Duration;

    fn candidate(url: &str) -> Candidate {
        Candidate::parse(url).unwrap()
    }

    #[tokio::test]
    async fn exists_returns_true_for_ok_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("HEAD", "/en/stable/objects.inv")
            .with_status(200)
            .create_async()
            .await;

        let verifier = HttpVerifier::default();
        let found = verifier
            .exists(&candidate(&format!("{}/en/stable/objects.inv", server.url())))
            .await;

        mock.assert_async().await;
        assert!(found);
    }

    #[tokio::test]
    async fn exists_follows_redirects() {
        let mut server = Server::new_async().await;
        let redirect = server
            .mock("HEAD", "/objects.inv")
            .with_status(307)
            .with_header("location", "/en/latest/objects.inv")
            .create_async()
            .await;
        let target = server
            .mock("HEAD", "/en/latest/objects.inv")
            .with_status(200)
            .create_async()
            .await;

        let verifier = HttpVerifier::default();
        let found = verifier
            .exists(&candidate(&format!("{}/objects.inv", server.url())))
            .await;

        redirect.assert_async().await;
        target.assert_async().await;
        assert!(found);
    }

    #[tokio::test]
    async fn exists_returns_false_for_missing_file() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("HEAD", "/objects.inv")
            .with_status(404)
            .create_async()
            .await;

        let verifier = HttpVerifier::default();
        let found = verifier
            .exists(&candidate(&format!("{}/objects.inv", server.url())))
            .await;

        mock.assert_async().await;
        assert!(!found);
    }

    #[tokio::test]
    async fn exists_returns_false_on_network_error() {
        let client = Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        let verifier = HttpVerifier::new(client);

        assert!(
            !verifier
                .exists(&candidate("http://invalid.localhost.test:9/objects.inv"))
                .await
        );
    }

    #[tokio::test]
    async fn first_verified_stops_at_first_success() {
        let candidates = vec![
            candidate("https://a.example/objects.inv"),
            candidate("https://b.example/objects.inv"),
            candidate("https://c.example/objects.inv"),
        ];

        let mut verifier = MockVerifier::new();
        verifier
            .expect_exists()
            .withf(|c| c.as_str() == "https://a.example/objects.inv")
            .times(1)
            .returning(|_| false);
        verifier
            .expect_exists()
            .withf(|c| c.as_str() == "https://b.example/objects.inv")
            .times(1)
            .returning(|_| true);

        let mut probed = Vec::new();
        let found = first_verified(&verifier, &candidates, &mut probed).await;

        assert_eq!(found, Some(candidates[1].clone()));
        assert_eq!(probed, candidates[..2].to_vec());
    }

    #[tokio::test]
    async fn first_verified_returns_none_when_exhausted() {
        let candidates = vec![candidate("https://a.example/objects.inv")];

        let mut verifier = MockVerifier::new();
        verifier.expect_exists().times(1).returning(|_| false);

        let mut probed = Vec::new();
        assert_eq!(first_verified(&verifier, &candidates, &mut probed).await, None);
        assert_eq!(probed.len(), 1);
    }
}
