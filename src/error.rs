//! Error types for the aggregation pipeline.
//!
//! Each layer has its own error: a [`ProviderError`] is one failed attempt
//! and is recovered inside the chain, [`CategoryExhausted`] is recovered by
//! the aggregator, and [`AllCategoriesFailed`] is recovered by substituting
//! the fallback dataset.  None of them ever reach the user as a raw failure.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single provider attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, TLS, connection reset…).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not JSON, or lacked the fields the provider expects.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The per-provider deadline elapsed before the call settled.
    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ProviderError::Status(status.as_u16()),
            None if err.is_timeout() => ProviderError::Network(format!("timed out: {err}")),
            None => ProviderError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Every provider in a category's chain failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("all providers failed for category '{category}'")]
pub struct CategoryExhausted {
    pub category: String,
}

/// An aggregation run produced no item for any category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("all {categories} categories failed")]
pub struct AllCategoriesFailed {
    pub categories: usize,
}

/// Rejected registry mutation.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("category '{0}' was registered without any providers")]
    EmptyChain(String),
}

/// Invalid command line configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        assert!(ProviderError::Status(503).to_string().contains("503"));
    }

    #[test]
    fn json_error_becomes_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ProviderError = err.into();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn exhausted_names_category() {
        let err = CategoryExhausted {
            category: "weather".into(),
        };
        assert_eq!(err.to_string(), "all providers failed for category 'weather'");
    }

    #[test]
    fn registry_error_names_category() {
        let err = RegistryError::EmptyChain("quote".into());
        assert!(err.to_string().contains("quote"));
    }

    #[test]
    fn domain_errors_convert_to_anyhow() {
        fn fallible() -> anyhow::Result<()> {
            Err(ConfigError::InvalidValue("run timeout must be > 0".into()))?
        }
        assert!(fallible().unwrap_err().to_string().contains("run timeout"));
    }
}
