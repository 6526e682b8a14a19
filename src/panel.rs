//! What the presenter receives at the end of a run.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::aggregate::AggregationResult;
use crate::fallback::{default_dataset, ADVISORY_NOTE};
use crate::source::DataItem;

/// An ordered item list plus the advisory flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub items: Vec<DataItem>,
    /// Set when `items` is the static fallback rather than live data.
    pub advisory: bool,
    pub settled_at: DateTime<Local>,
}

impl Panel {
    /// Turn a finished run into something presentable, substituting the
    /// fallback dataset as a whole when nothing succeeded.
    pub fn settle(result: AggregationResult) -> Self {
        let settled_at = Local::now();
        debug!(
            live = result.items().len(),
            categories = result.categories(),
            abandoned = ?result.abandoned(),
            "settling run"
        );
        match result.into_items() {
            Ok(items) => Self {
                items,
                advisory: false,
                settled_at,
            },
            Err(error) => {
                warn!(%error, "showing fallback dataset");
                let fallback = default_dataset();
                Self {
                    items: fallback.items.into(),
                    advisory: fallback.advisory,
                    settled_at,
                }
            }
        }
    }

    /// Plain-text rendering for `--once`.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            let _ = writeln!(out, "{}", item.title());
            for line in item.lines() {
                let _ = writeln!(out, "    {line}");
            }
            out.push('\n');
        }
        if self.advisory {
            let _ = writeln!(out, "{ADVISORY_NOTE}");
        }
        out
    }
}
