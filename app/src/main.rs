//! Scripted transfer session against the simulated backend.
//!
//! Reads an optional JSON config from `TRANSFER_CONFIG`.

use anyhow::Context;
use transfer_core::AppConfig;
use vaultline::commands;

const ETH: &str = "eip155:1/slip44:60";
const COLD_ETH: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var("TRANSFER_CONFIG") {
        Ok(path) => AppConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path)),
        Err(_) => Ok(AppConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    vaultline::init_tracing(&config.log_filter);
    let state = vaultline::build_state(config)?;

    commands::load_catalog(&state).await?;

    commands::select_asset(&state, ETH).await?;
    commands::select_vault(&state, 0, 0).await?;
    commands::set_destination(&state, COLD_ETH).await;
    let form = commands::update_amount(&state, "0.75").await;
    tracing::info!(
        amount = %form.amount_display,
        usd = %form.amount_usd,
        max = %form.max_display,
        "Amount entered"
    );
    commands::set_memo(&state, "cold storage sweep").await;

    let preview = commands::preview(&state).await?;
    println!("{}", serde_json::to_string_pretty(&preview)?);

    match commands::submit_transfer(&state).await {
        Ok(receipt) => println!("{}", serde_json::to_string_pretty(&receipt)?),
        Err(e) => {
            tracing::error!(code = %e.code, status = e.status, "Transfer failed: {}", e.message);
            println!("{}", serde_json::to_string_pretty(&e)?);
        }
    }

    Ok(())
}
