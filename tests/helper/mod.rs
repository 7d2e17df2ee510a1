//! Shared fixtures for resolver integration tests

pub mod registry;

pub use registry::{mock_pypi, pypi_body, test_config};
