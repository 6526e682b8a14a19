//! The display item shared by every provider.
//!
//! `DataItem` is what a provider produces once it has normalised its
//! category-specific payload.  Live items and fallback items have exactly
//! the same shape, so presenters never need to know where an item came
//! from.

/// Markup used inside [`DataItem::content`] to separate display lines.
pub const LINE_BREAK: &str = "<br>";

/// A display-ready `{title, content}` pair.
///
/// Fields are private so an item cannot change after a provider has
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    title: String,
    content: String,
}

impl DataItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Short label, e.g. "💭 Daily Wisdom".
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw content, possibly containing [`LINE_BREAK`] markup.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content split on the line-break markup, for presenters that render
    /// one line at a time.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split(LINE_BREAK).map(str::trim)
    }
}
