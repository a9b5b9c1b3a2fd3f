// demos/enroll/src/main.rs

use anyhow::Result;
use enrollment_common::{enroll_flow, init_tracing, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    // load .env (WALLET_PATH, COHORT_OBJECT_ID, MODULE_TARGET, GITHUB_HANDLE)
    let cfg = load_config();
    // any fault here ends the process with a non-zero status
    enroll_flow(&cfg).await?;
    Ok(())
}
