// common/src/submit.rs
//! Resolving chain inputs, signing and submitting.
//!
//! Nothing here retries or classifies faults; every failure is returned to
//! the caller as a [`Fault`].

use crate::error::{Fault, Result};
use crate::faucet::{FaucetApi, FaucetRequest};
use crate::keys::SuiKeypair;
use crate::rpc::{Owner, SuiRpc};
use crate::transaction::{GasConfig, ObjectArg, TransactionData, MAX_GAS_OBJECTS};
use crate::types::{ObjectID, SuiAddress};

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// Digest of an executed transaction.
    Transaction(String),
    /// Coin object handed out by the faucet.
    FundingObject(String),
}

impl Submitted {
    pub fn id(&self) -> &str {
        match self {
            Submitted::Transaction(id) | Submitted::FundingObject(id) => id,
        }
    }
}

/// Reference gas price plus the owner's SUI coins as payment.
pub async fn resolve_gas<R: SuiRpc + ?Sized>(rpc: &R, owner: SuiAddress, budget: u64) -> Result<GasConfig> {
    let price = rpc.reference_gas_price().await?;
    let coins = rpc.gas_coins(owner).await?;
    if coins.is_empty() {
        return Err(Fault::NoGasCoins(owner));
    }
    let payment = coins
        .iter()
        .take(MAX_GAS_OBJECTS)
        .map(|c| c.object_ref())
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(%owner, price, coins = payment.len(), budget, "gas resolved");
    Ok(GasConfig { payment, price, budget })
}

/// Shared objects are passed by initial version; anything else by reference.
pub async fn resolve_object_arg<R: SuiRpc + ?Sized>(rpc: &R, id: ObjectID, mutable: bool) -> Result<ObjectArg> {
    let info = rpc.get_object(id).await?;
    let arg = match info.owner {
        Some(Owner::Shared { initial_shared_version }) => ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutable,
        },
        _ => ObjectArg::ImmOrOwnedObject(info.object_ref),
    };
    tracing::debug!(%id, ?arg, "object resolved");
    Ok(arg)
}

/// Signs `tx` with `keypair`, executes it and checks the effects status.
pub async fn sign_and_execute<R: SuiRpc + ?Sized>(
    rpc: &R,
    keypair: &SuiKeypair,
    tx: &TransactionData,
) -> Result<Submitted> {
    let tx_bytes = tx.to_bytes()?;
    let expected = tx.digest()?.to_string();
    let signature = keypair.sign_transaction(&tx_bytes);

    let response = rpc
        .execute_transaction(base64::encode(&tx_bytes), vec![signature])
        .await?;

    if response.digest != expected {
        tracing::warn!(expected = %expected, returned = %response.digest, "digest mismatch");
    }
    if let Some(effects) = &response.effects {
        if effects.status.status != "success" {
            return Err(Fault::ExecutionFailed {
                digest: response.digest,
                error: effects
                    .status
                    .error
                    .clone()
                    .unwrap_or_else(|| effects.status.status.clone()),
            });
        }
    }
    tracing::info!(digest = %response.digest, "transaction executed");
    Ok(Submitted::Transaction(response.digest))
}

/// One faucet request; an empty object list is a fault, not an index panic.
pub async fn request_airdrop<F: FaucetApi + ?Sized>(faucet: &F, request: &FaucetRequest) -> Result<Submitted> {
    let response = faucet.request_gas(request).await?;
    let first = response
        .transferred_gas_objects
        .into_iter()
        .next()
        .ok_or(Fault::EmptyFaucetResponse)?;
    tracing::info!(object = %first.id, amount = ?first.amount, "faucet funded");
    Ok(Submitted::FundingObject(first.id))
}
