//! Concurrent aggregation across every registered category.
//!
//! All chains are started together and driven to completion on the calling
//! task.  Settlement order is whatever the network gives us, so every
//! outcome is tagged with its registration index and slotted back into
//! place before the result is built.

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::chain::{invoke_chain, FetchOutcome};
use crate::error::AllCategoriesFailed;
use crate::registry::CategoryRegistry;
use crate::source::DataItem;

/// Time limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    /// Applied to every single provider call.
    pub provider: Duration,
    /// Applied to the whole join; chains still in flight are abandoned.
    pub run: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            provider: Duration::from_secs(5),
            run: Duration::from_secs(12),
        }
    }
}

/// Items of the categories that succeeded, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    items: Vec<DataItem>,
    categories: usize,
    abandoned: Vec<String>,
}

impl AggregationResult {
    pub fn items(&self) -> &[DataItem] {
        &self.items
    }

    /// Number of categories the run was started with.
    pub fn categories(&self) -> usize {
        self.categories
    }

    /// Categories still in flight when the run deadline elapsed.
    pub fn abandoned(&self) -> &[String] {
        &self.abandoned
    }

    /// The items, or [`AllCategoriesFailed`] when none succeeded.
    pub fn into_items(self) -> Result<Vec<DataItem>, AllCategoriesFailed> {
        if self.items.is_empty() {
            Err(AllCategoriesFailed {
                categories: self.categories,
            })
        } else {
            Ok(self.items)
        }
    }
}

/// Run every chain in `registry` concurrently and collect the successes.
///
/// Never fails: exhausted and abandoned categories are simply left out.
pub async fn aggregate_all(registry: &CategoryRegistry, deadlines: Deadlines) -> AggregationResult {
    if registry.is_empty() {
        debug!("no categories registered");
        return AggregationResult::default();
    }

    let provider_deadline = deadlines.provider;
    let mut pending: FuturesUnordered<_> = registry
        .categories()
        .enumerate()
        .map(move |(index, category)| async move {
            let outcome = FetchOutcome::from(invoke_chain(category, provider_deadline).await);
            (index, outcome)
        })
        .collect();

    let mut slots: Vec<Option<DataItem>> = vec![None; registry.len()];
    let mut finished = vec![false; registry.len()];

    let settled = tokio::time::timeout(deadlines.run, async {
        while let Some((index, outcome)) = pending.next().await {
            finished[index] = true;
            match outcome {
                FetchOutcome::Success(item) => slots[index] = Some(item),
                FetchOutcome::Exhausted(category) => {
                    info!(%category, "category exhausted, omitting it")
                }
            }
        }
    })
    .await;

    let abandoned: Vec<String> = registry
        .categories()
        .zip(&finished)
        .filter(|(_, done)| !**done)
        .map(|(category, _)| category.id().to_string())
        .collect();

    if settled.is_err() {
        warn!(
            ?abandoned,
            deadline = ?deadlines.run,
            "aggregation deadline elapsed with chains still in flight"
        );
    }

    AggregationResult {
        items: slots.into_iter().flatten().collect(),
        categories: registry.len(),
        abandoned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::Stub;

    fn three_categories(b_fails: bool) -> CategoryRegistry {
        let mut registry = CategoryRegistry::new();
        // A settles last, C first: output must still be A before C.
        registry
            .register(
                "A",
                vec![Box::new(Stub::ok("A", "a").after(Duration::from_millis(300)))],
            )
            .unwrap();
        let b = if b_fails {
            Stub::failing("down")
        } else {
            Stub::ok("B", "b")
        };
        registry
            .register("B", vec![Box::new(b), Box::new(Stub::failing("also down"))])
            .unwrap();
        registry
            .register(
                "C",
                vec![Box::new(Stub::ok("C", "c").after(Duration::from_millis(10)))],
            )
            .unwrap();
        registry
    }

    fn titles(result: &AggregationResult) -> Vec<&str> {
        result.items().iter().map(DataItem::title).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_category_is_omitted_and_order_kept() {
        let registry = three_categories(true);
        let result = aggregate_all(&registry, Deadlines::default()).await;
        assert_eq!(titles(&result), ["A", "C"]);
        assert_eq!(result.categories(), 3);
        assert!(result.abandoned().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn order_follows_registration_not_completion() {
        let registry = three_categories(false);
        let result = aggregate_all(&registry, Deadlines::default()).await;
        assert_eq!(titles(&result), ["A", "B", "C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn chains_run_concurrently() {
        let mut registry = CategoryRegistry::new();
        for id in ["x", "y", "z"] {
            registry
                .register(id, vec![Box::new(Stub::ok(id, id).after(Duration::from_secs(1)))])
                .unwrap();
        }
        let started = tokio::time::Instant::now();
        let result = aggregate_all(&registry, Deadlines::default()).await;
        assert_eq!(result.items().len(), 3);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn all_exhausted_yields_empty_result() {
        let mut registry = CategoryRegistry::new();
        for id in ["weather", "quote", "activity"] {
            registry
                .register(
                    id,
                    vec![Box::new(Stub::failing("a")), Box::new(Stub::failing("b"))],
                )
                .unwrap();
        }
        let result = aggregate_all(&registry, Deadlines::default()).await;
        assert!(result.items().is_empty());
        assert_eq!(
            result.into_items().unwrap_err(),
            AllCategoriesFailed { categories: 3 }
        );
    }

    #[tokio::test]
    async fn empty_registry_yields_empty_result() {
        let result = aggregate_all(&CategoryRegistry::new(), Deadlines::default()).await;
        assert!(result.items().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn run_deadline_keeps_settled_categories() {
        let mut registry = CategoryRegistry::new();
        registry
            .register("fast", vec![Box::new(Stub::ok("fast", "1"))])
            .unwrap();
        registry
            .register(
                "stuck",
                vec![Box::new(Stub::ok("stuck", "2").after(Duration::from_secs(3600)))],
            )
            .unwrap();

        let deadlines = Deadlines {
            provider: Duration::from_secs(7200),
            run: Duration::from_secs(2),
        };
        let result = aggregate_all(&registry, deadlines).await;
        assert_eq!(titles(&result), ["fast"]);
        assert_eq!(result.abandoned(), ["stuck"]);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_runs_are_identical() {
        let registry = three_categories(true);
        let first = aggregate_all(&registry, Deadlines::default()).await;
        let second = aggregate_all(&registry, Deadlines::default()).await;
        assert_eq!(first, second);
    }
}
