//! Quote providers: quotable.io with zenquotes.io as the alternate.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{http, DataItem, Provider};
use crate::error::ProviderError;

const QUOTABLE_URL: &str = "https://api.quotable.io/random";
const ZEN_QUOTES_URL: &str = "https://zenquotes.io/api/random";

fn quote_content(text: &str, author: &str) -> String {
    format!("\"{text}\" - {author}")
}

#[derive(Debug, Deserialize)]
pub struct QuotableBody {
    content: String,
    author: String,
}

pub struct Quotable {
    client: Client,
}

impl Quotable {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn to_item(body: &QuotableBody) -> DataItem {
        DataItem::new(
            "💭 Inspirational Quote",
            quote_content(&body.content, &body.author),
        )
    }
}

#[async_trait]
impl Provider for Quotable {
    fn name(&self) -> &str {
        "quotable"
    }

    async fn fetch(&self) -> Result<DataItem, ProviderError> {
        let body: QuotableBody = http::get_json(
            &self.client,
            QUOTABLE_URL,
            &[("minLength", "50"), ("maxLength", "150")],
        )
        .await?;
        Ok(Self::to_item(&body))
    }
}

/// One element of the zenquotes response array.
#[derive(Debug, Deserialize)]
pub struct ZenQuote {
    q: String,
    a: String,
}

pub struct ZenQuotes {
    client: Client,
}

impl ZenQuotes {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The API answers with an array; only the first entry is shown and an
    /// empty array counts as a malformed payload.
    pub fn to_item(body: &[ZenQuote]) -> Result<DataItem, ProviderError> {
        let quote = body
            .first()
            .ok_or_else(|| ProviderError::Malformed("empty quote list".into()))?;
        Ok(DataItem::new("💭 Daily Wisdom", quote_content(&quote.q, &quote.a)))
    }
}

#[async_trait]
impl Provider for ZenQuotes {
    fn name(&self) -> &str {
        "zenquotes"
    }

    async fn fetch(&self) -> Result<DataItem, ProviderError> {
        let body: Vec<ZenQuote> = http::get_json(&self.client, ZEN_QUOTES_URL, &[]).await?;
        Self::to_item(&body)
    }
}
