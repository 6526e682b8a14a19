//! Built-in dataset shown when every category fails.

use crate::source::DataItem;

/// Note shown alongside the fallback dataset.
pub const ADVISORY_NOTE: &str = "Note: Showing demo data. Press r to try loading live API data.";

/// Static stand-in for a whole aggregation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackDataset {
    pub items: [DataItem; 3],
    /// Always set: the content is static, not live.
    pub advisory: bool,
}

/// The fixed fallback dataset.  Same three items on every call.
pub fn default_dataset() -> FallbackDataset {
    FallbackDataset {
        items: [
            DataItem::new(
                "🌤️ Demo Weather",
                "☀️ Clear sky<br>Temperature: 28°C<br>Humidity: 65%",
            ),
            DataItem::new(
                "💭 Demo Quote",
                "\"The only way to do great work is to love what you do.\" - Steve Jobs",
            ),
            DataItem::new(
                "🎯 Demo Activity",
                "Learn a new programming language or framework today!",
            ),
        ],
        advisory: true,
    }
}
