//! Top-level client wiring game rules to progress saving.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ game-core (board dealing, flip/match rules)
//!   ├─→ AutoPlayer (headless stand-in for the UI)
//!   └─→ BatchOperationQueue + ChainSubmitter (progress saving)
//! ```
//!
//! Every level played in a session queues one `completeLevel` call; the whole
//! session is committed as a single batch at the end.

pub mod autoplay;
mod builder;
pub mod config;

pub use autoplay::AutoPlayer;
pub use builder::ClientBuilder;
pub use config::ClientConfig;

use anyhow::{Context, Result};
use client_blockchain_core::{BatchOperationQueue, BatchResult, ChainSubmitter, ProgressContract};
use game_core::{LevelCompletion, MemoryGame, default_catalog, generate_level_board, level_rng};

/// Outcome of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub completions: Vec<LevelCompletion>,
    /// `None` when nothing was queued (no progress contract configured).
    pub batch: Option<BatchResult>,
}

pub struct Client {
    config: ClientConfig,
    queue: BatchOperationQueue,
    submitter: Box<dyn ChainSubmitter>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn queue(&self) -> &BatchOperationQueue {
        &self.queue
    }

    /// Plays every configured level, then commits the queued progress.
    pub async fn run(&mut self) -> Result<SessionReport> {
        let contract = self.config.progress_contract.map(ProgressContract::new);
        let symbols = default_catalog();
        let mut completions = Vec::new();

        for level in self.config.levels() {
            let mut rng = level_rng(self.config.game_seed, level, self.config.attempt);
            let (level_config, board) = generate_level_board(level, &symbols, &mut rng)
                .with_context(|| format!("failed to deal level {level}"))?;
            tracing::info!(level, grid = %level_config.grid_size, "Dealt board");

            let mut game = MemoryGame::new(level_config, board);
            AutoPlayer::new().play(&mut game)?;

            // Headless play has no wall clock; report the whole time budget.
            let completion = game
                .completion(level_config.time_limit_secs)
                .context("level finished without completion")?;
            tracing::info!(
                level,
                moves = completion.moves,
                stars = completion.stars.as_u8(),
                "Level complete"
            );

            if let Some(contract) = &contract {
                self.queue.add_operation(contract.save_progress(&completion));
            }
            completions.push(completion);
        }

        if self.queue.is_empty() {
            tracing::info!("No progress contract configured, nothing to submit");
            return Ok(SessionReport {
                completions,
                batch: None,
            });
        }

        let preview = self.queue.preview_batch();
        tracing::info!(
            operations = preview.operations.len(),
            estimated_gas = %preview.estimated_gas_total,
            sponsored = preview.eligible_for_sponsorship,
            "Batch preview"
        );

        let result = self.queue.execute_batch(self.submitter.as_ref()).await?;
        if result.succeeded {
            tracing::info!(tx = ?result.transaction_hash, "Progress saved");
        } else {
            tracing::warn!(
                error = result.error.as_deref().unwrap_or("unknown"),
                pending = self.queue.len(),
                "Progress not saved, operations kept for retry"
            );
        }

        Ok(SessionReport {
            completions,
            batch: Some(result),
        })
    }
}
