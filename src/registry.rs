//! Category registry: category identifier → ordered provider chain.
//!
//! Built once at startup and shared read-only (behind an `Arc`) with every
//! aggregation run.  Registration order is the output order of a run.

use reqwest::Client;
use tracing::debug;

use crate::error::RegistryError;
use crate::source::activity::{AdviceSlip, Bored};
use crate::source::quote::{Quotable, ZenQuotes};
use crate::source::weather::{Location, OpenMeteo, WeatherApi};
use crate::source::Provider;

/// One category and its chain, primary provider first.
pub struct Category {
    id: String,
    providers: Vec<Box<dyn Provider>>,
}

impl Category {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn providers(&self) -> &[Box<dyn Provider>] {
        &self.providers
    }
}

#[derive(Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the chain for `id`.
    ///
    /// Re-registering an existing id swaps its chain but keeps the
    /// category's original position.  An empty chain is rejected.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        providers: Vec<Box<dyn Provider>>,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if providers.is_empty() {
            return Err(RegistryError::EmptyChain(id));
        }

        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                debug!(category = %id, "replacing provider chain");
                existing.providers = providers;
            }
            None => self.categories.push(Category { id, providers }),
        }
        Ok(())
    }

    /// Categories in registration order.
    pub fn categories(&self) -> impl ExactSizeIterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// The stock configuration: weather, quote and activity, each with a
    /// primary and an alternate provider.
    pub fn reference(client: &Client, location: Location) -> Result<Self, RegistryError> {
        let city = location.city.clone();
        let mut registry = Self::new();
        registry.register(
            "weather",
            vec![
                Box::new(OpenMeteo::new(client.clone(), location)),
                Box::new(WeatherApi::new(client.clone(), city)),
            ],
        )?;
        registry.register(
            "quote",
            vec![
                Box::new(Quotable::new(client.clone())),
                Box::new(ZenQuotes::new(client.clone())),
            ],
        )?;
        registry.register(
            "activity",
            vec![
                Box::new(Bored::new(client.clone())),
                Box::new(AdviceSlip::new(client.clone())),
            ],
        )?;
        Ok(registry)
    }
}
