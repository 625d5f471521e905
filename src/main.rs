//! # Indodax Proxy
//!
//! Thin entry point that loads configuration and delegates to the server module.

use indodax_proxy::{start_server, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    start_server(config).await
}
