//! Provider abstraction layer.
//!
//! This module defines the [`Provider`] trait and the common [`DataItem`]
//! type.  Concrete providers live in sub-modules, grouped by the category
//! they serve ([`weather`], [`quote`], [`activity`]).
//!
//! ## For contributors — adding a new provider
//!
//! 1. Add a struct to the matching category file (or a new file for a new
//!    category) and implement [`Provider`] for it.
//! 2. Keep the payload → [`DataItem`] conversion a pure function so tests can
//!    exercise it without the network.
//! 3. Add it to a chain in [`crate::registry::CategoryRegistry::reference`].
//!
//! The chain, aggregator, fallback and UI are all provider-agnostic.

pub mod activity;
mod data_item;
pub mod http;
pub mod quote;
pub mod weather;

pub use data_item::DataItem;

use async_trait::async_trait;

use crate::error::ProviderError;

/// One remote data source for one category.
///
/// The refresh worker calls [`fetch()`](Provider::fetch) from spawned tasks,
/// so implementations must be [`Send`] and [`Sync`].
///
/// ```ignore
/// pub struct MyProvider { client: reqwest::Client }
///
/// #[async_trait]
/// impl Provider for MyProvider {
///     fn name(&self) -> &str { "my-provider" }
///
///     async fn fetch(&self) -> Result<DataItem, ProviderError> {
///         let body: MyBody = http::get_json(&self.client, URL, &[]).await?;
///         Ok(body.into_item())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short label used in log records.
    fn name(&self) -> &str;

    /// Perform one request and normalise the response.
    ///
    /// Any failure (network, status, payload shape) is reported as a
    /// [`ProviderError`]; implementations never panic on bad input.
    async fn fetch(&self) -> Result<DataItem, ProviderError>;
}
