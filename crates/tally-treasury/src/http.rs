//! Shared HTTP response helpers for the treasury client.

use serde::de::DeserializeOwned;

use crate::error::TreasuryError;

/// Build the shared client used by the API and remote snapshot sources.
///
/// # Panics
///
/// Panics if the underlying `reqwest::Client` fails to build.
#[must_use]
pub fn build_client(config: &tally_config::TreasuryConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(std::time::Duration::from_secs(config.timeout_secs))
        .build()
        .expect("reqwest client should build")
}

/// Return the response unchanged on success, or [`TreasuryError::Api`] with
/// the status code and body for any non-success status.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TreasuryError> {
    if !resp.status().is_success() {
        return Err(TreasuryError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the body and decode it as JSON, mapping shape errors to
/// [`TreasuryError::Parse`] rather than a transport error.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, TreasuryError> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
