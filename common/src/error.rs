// common/src/error.rs
//! Error types shared by every flow.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{ObjectID, SuiAddress};

/// Key material could not be turned into an Ed25519 keypair.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyDerivationError {
    #[error("wrong secret key size: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("public half of the 64-byte secret key does not match its seed")]
    PublicKeyMismatch,

    #[error("invalid bech32 private key: {0}")]
    Bech32(String),

    #[error("unsupported key scheme flag {0:#04x}, only Ed25519 (0x00) is supported")]
    UnsupportedScheme(u8),
}

/// Everything that can go wrong between loading a key and reporting a result.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("key derivation error: {0}")]
    KeyDerivation(#[from] KeyDerivationError),

    #[error("cannot read wallet file {path}: {reason}")]
    WalletFile { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("object {id} unavailable: {reason}")]
    ObjectUnavailable { id: ObjectID, reason: String },

    #[error("transaction {digest} failed: {error}")]
    ExecutionFailed { digest: String, error: String },

    #[error("no SUI coins available to pay gas for {0}")]
    NoGasCoins(SuiAddress),

    #[error("faucet request failed: {0}")]
    Faucet(String),

    #[error("too many requests from this client have been sent to the faucet, retry later")]
    FaucetRateLimited,

    #[error("faucet response contained no transferred gas objects")]
    EmptyFaucetResponse,

    #[error("BCS encoding error: {0}")]
    Encoding(#[from] bcs::Error),
}

pub type Result<T, E = Fault> = std::result::Result<T, E>;
