// demos/transfer/src/main.rs

use anyhow::Result;
use enrollment_common::{init_tracing, load_config, transfer_flow};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    // load .env (SUI_NETWORK, WALLET_PATH, RPC_URL, RECIPIENT_ADDRESS)
    let cfg = load_config();
    // send the dev wallet's gas coin to the recipient
    transfer_flow(&cfg).await?;
    Ok(())
}
