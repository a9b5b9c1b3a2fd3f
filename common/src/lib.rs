// common/src/lib.rs
use anyhow::Result;
use reqwest::Client;
use std::io::Write;
use std::path::Path;

pub mod config;
pub mod error;
pub mod faucet;
pub mod keys;
pub mod logging;
pub mod report;
pub mod rpc;
pub mod submit;
pub mod transaction;
pub mod types;

pub use config::{load_config, Config, Network};
pub use error::{Fault, KeyDerivationError};
pub use faucet::{FaucetApi, FaucetClient, FaucetRequest, FaucetResponse};
pub use keys::{KeyMaterial, SuiKeypair};
pub use logging::init_tracing;
pub use report::{FaultPolicy, Reporter};
pub use rpc::{RpcClient, SuiRpc};
pub use submit::Submitted;
pub use transaction::MoveTarget;
pub use types::{ObjectID, SuiAddress};

use submit::{request_airdrop, resolve_gas, resolve_object_arg, sign_and_execute};
use transaction::{enroll_call, transfer_gas_coin};

pub const DEV_WALLET: &str = "dev-wallet.json";
pub const WBA_WALLET: &str = "wba-wallet.json";

// ─────────────────── Clients ───────────────────

pub fn rpc_client(cfg: &Config, http: Client) -> RpcClient {
    RpcClient::new(cfg.rpc_url(), http)
}

pub fn faucet_client(http: Client) -> FaucetClient {
    FaucetClient::new(http)
}

// ─────────────────── Airdrop Flow (faucet /gas) ───────────────────

/// Loads the wallet, asks the faucet to fund its address and reports the
/// funded coin. Faucet faults are printed, not returned.
pub async fn airdrop<F, O, E>(
    faucet: &F,
    wallet: &Path,
    faucet_host: &str,
    reporter: &mut Reporter<O, E>,
) -> Result<(), Fault>
where
    F: FaucetApi + ?Sized,
    O: Write,
    E: Write,
{
    let kp = SuiKeypair::from_file(wallet)?;
    let request = FaucetRequest::new(faucet_host, kp.address());

    let outcome = request_airdrop(faucet, &request).await;
    reporter.report(outcome, FaultPolicy::Report)
}

pub async fn airdrop_flow(cfg: &Config) -> Result<()> {
    let host = cfg.faucet_host()?;
    let faucet = faucet_client(cfg.http_client()?);
    let mut reporter = Reporter::stdio(cfg.network);

    airdrop(&faucet, &cfg.wallet_or(DEV_WALLET), &host, &mut reporter).await?;
    Ok(())
}

// ─────────────────── Transfer Flow (gas coin → recipient) ───────────────────

/// Sends the wallet's whole gas coin to `recipient`. Submission faults are
/// printed, not returned.
pub async fn transfer<R, O, E>(
    rpc: &R,
    wallet: &Path,
    recipient: SuiAddress,
    gas_budget: u64,
    reporter: &mut Reporter<O, E>,
) -> Result<(), Fault>
where
    R: SuiRpc + ?Sized,
    O: Write,
    E: Write,
{
    let kp = SuiKeypair::from_file(wallet)?;
    let sender = kp.address();

    let outcome = async {
        let gas = resolve_gas(rpc, sender, gas_budget).await?;
        let tx = transfer_gas_coin(sender, recipient, gas)?;
        sign_and_execute(rpc, &kp, &tx).await
    }
    .await;
    reporter.report(outcome, FaultPolicy::Report)
}

pub async fn transfer_flow(cfg: &Config) -> Result<()> {
    let recipient = cfg.recipient()?;
    let rpc = rpc_client(cfg, cfg.http_client()?);
    let mut reporter = Reporter::stdio(cfg.network);

    transfer(&rpc, &cfg.wallet_or(DEV_WALLET), recipient, cfg.gas_budget, &mut reporter).await?;
    Ok(())
}

// ─────────────────── Enroll Flow (Move call) ───────────────────

pub struct EnrollParams {
    pub target: MoveTarget,
    pub cohort: ObjectID,
    pub github: String,
    pub gas_budget: u64,
}

/// Calls `target(cohort, bcs(github))`. Any fault is returned to the caller.
pub async fn enroll<R, O, E>(
    rpc: &R,
    wallet: &Path,
    params: &EnrollParams,
    reporter: &mut Reporter<O, E>,
) -> Result<(), Fault>
where
    R: SuiRpc + ?Sized,
    O: Write,
    E: Write,
{
    let kp = SuiKeypair::from_file(wallet)?;
    let sender = kp.address();

    let outcome = async {
        let cohort = resolve_object_arg(rpc, params.cohort, true).await?;
        let gas = resolve_gas(rpc, sender, params.gas_budget).await?;
        let tx = enroll_call(sender, &params.target, cohort, params.github.as_bytes(), gas)?;
        sign_and_execute(rpc, &kp, &tx).await
    }
    .await;
    reporter.report(outcome, FaultPolicy::Propagate)
}

pub async fn enroll_flow(cfg: &Config) -> Result<()> {
    let params = EnrollParams {
        target: cfg.target()?,
        cohort: cfg.cohort()?,
        github: cfg.github.clone(),
        gas_budget: cfg.gas_budget,
    };
    let rpc = rpc_client(cfg, cfg.http_client()?);
    let mut reporter = Reporter::stdio(cfg.network);

    enroll(&rpc, &cfg.wallet_or(WBA_WALLET), &params, &mut reporter).await?;
    Ok(())
}
