//! Category chain invocation.
//!
//! A chain is walked strictly in order: the first provider to succeed wins
//! and the rest are never called.  Failures are logged and skipped, never
//! retried.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{CategoryExhausted, ProviderError};
use crate::registry::Category;
use crate::source::DataItem;

/// Settled state of one chain within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(DataItem),
    Exhausted(String),
}

impl From<Result<DataItem, CategoryExhausted>> for FetchOutcome {
    fn from(result: Result<DataItem, CategoryExhausted>) -> Self {
        match result {
            Ok(item) => FetchOutcome::Success(item),
            Err(CategoryExhausted { category }) => FetchOutcome::Exhausted(category),
        }
    }
}

/// Try each provider of `category` in order, giving each at most
/// `deadline` to answer.
pub async fn invoke_chain(
    category: &Category,
    deadline: Duration,
) -> Result<DataItem, CategoryExhausted> {
    for (index, provider) in category.providers().iter().enumerate() {
        let attempt = match tokio::time::timeout(deadline, provider.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(deadline)),
        };

        match attempt {
            Ok(item) => {
                debug!(
                    category = category.id(),
                    index,
                    provider = provider.name(),
                    title = item.title(),
                    content = item.content(),
                    "provider succeeded"
                );
                return Ok(item);
            }
            Err(error) => warn!(
                category = category.id(),
                index,
                provider = provider.name(),
                %error,
                "provider attempt failed"
            ),
        }
    }

    Err(CategoryExhausted {
        category: category.id().to_string(),
    })
}
