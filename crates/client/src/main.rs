//! Memory Match headless client binary.
//!
//! Composition root that assembles:
//! 1. Session configuration (levels, seed, progress contract)
//! 2. Batch queue configuration (gas heuristic, sponsorship policy)
//! 3. A chain submitter (dry run until a wallet integration is plugged in)
//!
//! # Examples
//!
//! ```bash
//! MEMORY_LEVEL=24 MEMORY_LEVEL_COUNT=3 \
//! PROGRESS_CONTRACT_ADDRESS=0x1111111111111111111111111111111111111111 \
//! RUST_LOG=debug cargo run -p memory-client
//! ```

use anyhow::Result;
use client_blockchain_core::BatchConfig;
use memory_client::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();
    let batch_config = BatchConfig::from_env();

    tracing::info!("Starting Memory Match client");
    tracing::info!("Levels: {:?}", config.levels());
    tracing::info!("Game seed: {}, attempt: {}", config.game_seed, config.attempt);
    tracing::info!("Progress contract: {:?}", config.progress_contract);

    // 2. Build and run
    let mut client = Client::builder()
        .config(config)
        .batch_config(batch_config)
        .build()?;

    let report = client.run().await?;

    for completion in &report.completions {
        tracing::info!(
            "Level {}: {} moves, {} stars",
            completion.level,
            completion.moves,
            completion.stars.as_u8()
        );
    }
    match &report.batch {
        Some(result) if result.succeeded => {
            tracing::info!("Progress committed in {:?}", result.transaction_hash)
        }
        Some(result) => tracing::warn!("Progress not committed: {:?}", result.error),
        None => {}
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}
