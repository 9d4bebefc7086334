use crate::error::SourceError;
use async_trait::async_trait;
use configuration::settings::ExecutionSourceConfig;
use core_types::{AccountSnapshot, PositionRecord};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{ApiErrorResponse, RawAccountResponse, RawPositionResponse};

/// The generic, abstract interface to the brokerage execution source.
/// This trait is the contract the risk engine depends on, allowing the
/// underlying implementation (live or test double) to be swapped out.
///
/// An empty position list is a valid response, not an error.
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    /// Fetches the current account snapshot for the given user identity.
    async fn get_account(&self, user_id: &str) -> Result<AccountSnapshot, SourceError>;

    /// Fetches all currently open positions for the given user identity.
    async fn get_positions(&self, user_id: &str) -> Result<Vec<PositionRecord>, SourceError>;
}

/// A concrete implementation of `ExecutionSource` for the Alpaca brokerage.
#[derive(Clone)]
pub struct AlpacaClient {
    client: reqwest::Client,
    base_url: String,
}

impl AlpacaClient {
    pub fn new(source_config: &ExecutionSourceConfig) -> Self {
        let (base_url, keys) = if source_config.live_mode {
            (
                "https://api.alpaca.markets".to_string(),
                &source_config.production,
            )
        } else {
            (
                "https://paper-api.alpaca.markets".to_string(),
                &source_config.paper,
            )
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            HeaderValue::from_str(&keys.key).expect("Invalid API Key"),
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            HeaderValue::from_str(&keys.secret).expect("Invalid API Secret"),
        );

        Self {
            client: reqwest::Client::builder()
                .default_headers(headers)
                // Every call is bounded; on timeout the engine falls back to
                // the paper snapshot instead of propagating the failure.
                .timeout(Duration::from_secs(source_config.timeout_secs))
                .build()
                .expect("Failed to build reqwest client"),
            base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| SourceError::Deserialization(e.to_string()))
        } else {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            Err(SourceError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ExecutionSource for AlpacaClient {
    /// The trading API is scoped to the credentials' single account, so the
    /// user identity selects nothing here; it is accepted for interface
    /// compatibility with multi-tenant sources.
    async fn get_account(&self, _user_id: &str) -> Result<AccountSnapshot, SourceError> {
        let raw: RawAccountResponse = self.get_json("/v2/account").await?;
        Ok(raw.into_snapshot())
    }

    async fn get_positions(&self, _user_id: &str) -> Result<Vec<PositionRecord>, SourceError> {
        let raw: Vec<RawPositionResponse> = self.get_json("/v2/positions").await?;
        Ok(raw.into_iter().map(RawPositionResponse::into_record).collect())
    }
}
