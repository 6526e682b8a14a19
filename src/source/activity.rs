//! Activity providers: the Bored API, with adviceslip as the alternate.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{http, DataItem, Provider};
use crate::error::ProviderError;

const BORED_URL: &str = "https://www.boredapi.com/api/activity";
const ADVICE_SLIP_URL: &str = "https://api.adviceslip.com/advice";

#[derive(Debug, Deserialize)]
pub struct BoredBody {
    activity: String,
    #[serde(rename = "type")]
    kind: String,
}

pub struct Bored {
    client: Client,
}

impl Bored {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn to_item(body: &BoredBody) -> DataItem {
        DataItem::new(
            "🎯 Random Activity",
            format!("{} (Type: {})", body.activity, body.kind),
        )
    }
}

#[async_trait]
impl Provider for Bored {
    fn name(&self) -> &str {
        "boredapi"
    }

    async fn fetch(&self) -> Result<DataItem, ProviderError> {
        let body: BoredBody = http::get_json(&self.client, BORED_URL, &[]).await?;
        Ok(Self::to_item(&body))
    }
}

#[derive(Debug, Deserialize)]
pub struct AdviceSlipBody {
    slip: Slip,
}

#[derive(Debug, Deserialize)]
struct Slip {
    advice: String,
}

pub struct AdviceSlip {
    client: Client,
}

impl AdviceSlip {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn to_item(body: &AdviceSlipBody) -> DataItem {
        DataItem::new("💡 Random Advice", body.slip.advice.as_str())
    }
}

#[async_trait]
impl Provider for AdviceSlip {
    fn name(&self) -> &str {
        "adviceslip"
    }

    async fn fetch(&self) -> Result<DataItem, ProviderError> {
        let body: AdviceSlipBody = http::get_json(&self.client, ADVICE_SLIP_URL, &[]).await?;
        Ok(Self::to_item(&body))
    }
}
