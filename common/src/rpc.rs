// common/src/rpc.rs
//! Fullnode JSON-RPC access.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Fault, Result};
use crate::types::{ObjectID, ObjectRef, SuiAddress};

pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Read and execute calls the flows need from a fullnode.
#[async_trait]
pub trait SuiRpc: Send + Sync {
    async fn reference_gas_price(&self) -> Result<u64>;

    /// First page of the owner's SUI coins.
    async fn gas_coins(&self, owner: SuiAddress) -> Result<Vec<Coin>>;

    async fn get_object(&self, id: ObjectID) -> Result<ObjectInfo>;

    async fn execute_transaction(&self, tx_bytes: String, signatures: Vec<String>) -> Result<ExecutionResponse>;
}

// ─────────────────── Wire types ───────────────────

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum BigInt {
    Text(String),
    Number(u64),
}

impl BigInt {
    pub fn value(&self) -> Result<u64> {
        match self {
            BigInt::Number(n) => Ok(*n),
            BigInt::Text(s) => s
                .parse()
                .map_err(|_| Fault::MalformedResponse(format!("'{}' is not a u64", s))),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_type: String,
    pub coin_object_id: String,
    pub version: BigInt,
    pub digest: String,
    pub balance: BigInt,
}

impl Coin {
    pub fn object_ref(&self) -> Result<ObjectRef> {
        Ok(ObjectRef {
            object_id: self.coin_object_id.parse().map_err(malformed)?,
            version: self.version.value()?,
            digest: self.digest.parse()?,
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CoinPage {
    data: Vec<Coin>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    AddressOwner(String),
    ObjectOwner(String),
    Shared { initial_shared_version: u64 },
    Immutable,
    /// Owner kinds this client does not model, e.g. `ConsensusAddressOwner`.
    #[serde(untagged)]
    Other(Value),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    pub version: BigInt,
    pub digest: String,
    pub owner: Option<Owner>,
}

#[derive(Deserialize, Debug)]
struct ObjectResponse {
    data: Option<ObjectData>,
    error: Option<Value>,
}

/// Resolved object: its current reference and ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub object_ref: ObjectRef,
    pub owner: Option<Owner>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Effects {
    pub status: ExecutionStatus,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExecutionResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<Effects>,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

fn malformed(e: Fault) -> Fault {
    match e {
        Fault::InvalidConfig(msg) => Fault::MalformedResponse(msg),
        other => other,
    }
}

// ─────────────────── HTTP client ───────────────────

pub struct RpcClient {
    url: String,
    http: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        tracing::debug!(method, url = %self.url, "rpc call");

        let response: RpcResponse<T> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match (response.result, response.error) {
            (_, Some(err)) => Err(Fault::Rpc {
                code: err.code,
                message: err.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Fault::MalformedResponse(format!(
                "{} returned neither result nor error",
                method
            ))),
        }
    }
}

#[async_trait]
impl SuiRpc for RpcClient {
    async fn reference_gas_price(&self) -> Result<u64> {
        let price: BigInt = self.call("suix_getReferenceGasPrice", json!([])).await?;
        price.value()
    }

    async fn gas_coins(&self, owner: SuiAddress) -> Result<Vec<Coin>> {
        let page: CoinPage = self
            .call("suix_getCoins", json!([owner.to_string(), SUI_COIN_TYPE, null, null]))
            .await?;
        Ok(page.data)
    }

    async fn get_object(&self, id: ObjectID) -> Result<ObjectInfo> {
        let response: ObjectResponse = self
            .call("sui_getObject", json!([id.to_string(), { "showOwner": true }]))
            .await?;
        let data = match (response.data, response.error) {
            (Some(data), _) => data,
            (None, error) => {
                let reason = error.map(|e| e.to_string()).unwrap_or_else(|| "not found".into());
                return Err(Fault::ObjectUnavailable { id, reason });
            }
        };
        Ok(ObjectInfo {
            object_ref: ObjectRef {
                object_id: data.object_id.parse().map_err(malformed)?,
                version: data.version.value()?,
                digest: data.digest.parse()?,
            },
            owner: data.owner,
        })
    }

    async fn execute_transaction(&self, tx_bytes: String, signatures: Vec<String>) -> Result<ExecutionResponse> {
        self.call(
            "sui_executeTransactionBlock",
            json!([tx_bytes, signatures, { "showEffects": true }, "WaitForLocalExecution"]),
        )
        .await
    }
}
