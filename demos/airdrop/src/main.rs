// demos/airdrop/src/main.rs

use anyhow::Result;
use enrollment_common::{airdrop_flow, init_tracing, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    // load .env (SUI_NETWORK, WALLET_PATH, FAUCET_URL)
    let cfg = load_config();
    // request devnet SUI for the dev wallet
    airdrop_flow(&cfg).await?;
    Ok(())
}
