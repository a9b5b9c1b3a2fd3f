// common/src/config.rs
//! Flags and environment variables (a `.env` file is honoured).

use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Fault, Result};
use crate::transaction::MoveTarget;
use crate::types::{ObjectID, SuiAddress};

pub const DEFAULT_RECIPIENT: &str =
    "0x405f09a46025cf02dcb240d8361174a0a804cf887aeb2c49c58b94552f8558b7";
pub const DEFAULT_MODULE_TARGET: &str =
    "0x326054a2db6192fcd3085cfde6e92d1a917f3df953f5327f7d4e3c1457e8816e::enrollment::enroll";
pub const DEFAULT_GITHUB: &str = "rmcsharry";
/// 0.01 SUI
pub const DEFAULT_GAS_BUDGET: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
    Localnet,
}

impl Network {
    pub fn name(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Localnet => "localnet",
        }
    }

    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Localnet => "http://127.0.0.1:9000",
        }
    }

    /// Mainnet has no faucet.
    pub fn faucet_host(&self) -> Option<&'static str> {
        match self {
            Network::Devnet => Some("https://faucet.devnet.sui.io"),
            Network::Testnet => Some("https://faucet.testnet.sui.io"),
            Network::Mainnet => None,
            Network::Localnet => Some("http://127.0.0.1:9123"),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Sui devnet enrollment helpers")]
pub struct Config {
    /// Target network environment.
    #[arg(long, env = "SUI_NETWORK", value_enum, default_value_t = Network::Devnet)]
    pub network: Network,

    /// Wallet JSON file: a secret key byte array or `{"privateKey": "..."}`.
    #[arg(long, env = "WALLET_PATH")]
    pub wallet: Option<PathBuf>,

    /// Fullnode JSON-RPC endpoint, overrides the network default.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Faucet host, overrides the network default.
    #[arg(long, env = "FAUCET_URL")]
    pub faucet_url: Option<String>,

    /// Destination of the gas coin transfer.
    #[arg(long = "recipient", env = "RECIPIENT_ADDRESS", default_value = DEFAULT_RECIPIENT)]
    pub recipient_address: String,

    /// Cohort object passed to the enroll call.
    #[arg(long = "cohort", env = "COHORT_OBJECT_ID", default_value = "")]
    pub cohort_object_id: String,

    /// `package::module::function` invoked by enroll.
    #[arg(long, env = "MODULE_TARGET", default_value = DEFAULT_MODULE_TARGET)]
    pub module_target: String,

    /// GitHub handle recorded by the enroll call.
    #[arg(long, env = "GITHUB_HANDLE", default_value = DEFAULT_GITHUB)]
    pub github: String,

    /// Gas budget in MIST.
    #[arg(long, env = "GAS_BUDGET", default_value_t = DEFAULT_GAS_BUDGET)]
    pub gas_budget: u64,

    /// Per-request HTTP timeout.
    #[arg(long = "timeout-secs", env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

/// Loads `.env` (if any) and parses flags; exits with usage on bad input.
pub fn load_config() -> Config {
    dotenv().ok();
    Config::parse()
}

impl Config {
    pub fn wallet_or(&self, default: &str) -> PathBuf {
        self.wallet.clone().unwrap_or_else(|| PathBuf::from(default))
    }

    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.fullnode_url().to_string())
    }

    pub fn faucet_host(&self) -> Result<String> {
        if let Some(url) = &self.faucet_url {
            return Ok(url.clone());
        }
        self.network
            .faucet_host()
            .map(str::to_string)
            .ok_or_else(|| Fault::InvalidConfig(format!("no faucet available on {}", self.network)))
    }

    pub fn recipient(&self) -> Result<SuiAddress> {
        self.recipient_address.parse()
    }

    /// The cohort id has no usable default and must be supplied.
    pub fn cohort(&self) -> Result<ObjectID> {
        if self.cohort_object_id.trim().is_empty() {
            return Err(Fault::InvalidConfig(
                "cohort object id is required (--cohort or COHORT_OBJECT_ID)".into(),
            ));
        }
        self.cohort_object_id.parse()
    }

    pub fn target(&self) -> Result<MoveTarget> {
        self.module_target.parse()
    }

    pub fn http_client(&self) -> Result<Client> {
        Ok(Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()?)
    }
}
