// common/src/faucet.rs
//! Devnet/testnet faucet requests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Fault, Result};
use crate::types::SuiAddress;

/// Faucet variant of a payload: plain HTTP, nothing to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaucetRequest {
    pub host: String,
    pub recipient: SuiAddress,
}

impl FaucetRequest {
    pub fn new(host: impl Into<String>, recipient: SuiAddress) -> Self {
        Self {
            host: host.into(),
            recipient,
        }
    }

    pub fn url(&self) -> String {
        format!("{}/gas", self.host.trim_end_matches('/'))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FaucetCoin {
    pub id: String,
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub transfer_tx_digest: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    #[serde(default)]
    pub transferred_gas_objects: Vec<FaucetCoin>,
    #[serde(default)]
    pub error: Option<String>,
}

#[async_trait]
pub trait FaucetApi: Send + Sync {
    async fn request_gas(&self, request: &FaucetRequest) -> Result<FaucetResponse>;
}

pub struct FaucetClient {
    http: Client,
}

impl FaucetClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FaucetApi for FaucetClient {
    async fn request_gas(&self, request: &FaucetRequest) -> Result<FaucetResponse> {
        let body = json!({
            "FixedAmountRequest": { "recipient": request.recipient.to_string() }
        });
        tracing::debug!(url = %request.url(), recipient = %request.recipient, "faucet request");

        let resp = self.http.post(request.url()).json(&body).send().await?;
        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Fault::FaucetRateLimited);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Fault::Faucet(format!("HTTP {}: {}", status, text.trim())));
        }

        let parsed: FaucetResponse = resp.json().await?;
        if let Some(error) = parsed.error.as_deref().filter(|e| !e.is_empty()) {
            return Err(Fault::Faucet(error.to_string()));
        }
        Ok(parsed)
    }
}
