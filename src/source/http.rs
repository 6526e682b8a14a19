//! Shared HTTP plumbing for providers.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ProviderError;

/// User agent sent with every provider request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the client shared by every provider.
pub fn client() -> reqwest::Result<Client> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Issue one unauthenticated GET with `query` appended to `url` and decode
/// the JSON body into `T`.
///
/// Non-2xx responses become [`ProviderError::Status`]; bodies that are not
/// JSON or lack the fields of `T` become [`ProviderError::Malformed`].
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, ProviderError> {
    debug!(url, ?query, "GET");
    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    decode(&body)
}

/// Decode a response body.  Split out so payload shapes can be tested
/// without a server.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ProviderError> {
    Ok(serde_json::from_slice(body)?)
}
