//! Client builder with dependency injection pattern.

use anyhow::{Context, Result};
use client_blockchain_core::{BatchConfig, BatchOperationQueue, ChainSubmitter, DryRunSubmitter};

use crate::{Client, ClientConfig};

/// Builder for constructing a Client with proper validation.
///
/// - **Required fields**: session configuration
/// - **Optional fields**: batch configuration and submitter (defaults to a dry run)
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    batch_config: Option<BatchConfig>,
    submitter: Option<Box<dyn ChainSubmitter>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session configuration (required).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn batch_config(mut self, config: BatchConfig) -> Self {
        self.batch_config = Some(config);
        self
    }

    /// Set the chain submitter (optional).
    ///
    /// Without one, batches go to a [`DryRunSubmitter`] that only logs them.
    pub fn submitter(mut self, submitter: impl ChainSubmitter + 'static) -> Self {
        self.submitter = Some(Box::new(submitter));
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if the session configuration is missing or names a
    /// first level outside the supported range.
    pub fn build(self) -> Result<Client> {
        let config = self
            .config
            .context("Client config is required. Use .config() to set it.")?;

        game_core::LevelConfig::for_level(config.start_level)
            .context("Invalid starting level")?;

        let submitter = self.submitter.unwrap_or_else(|| {
            tracing::debug!("No submitter configured, using dry run");
            Box::new(DryRunSubmitter::new())
        });

        Ok(Client {
            config,
            queue: BatchOperationQueue::new(self.batch_config.unwrap_or_default()),
            submitter,
        })
    }
}

#[cfg(test)]
mod tests {
    use client_blockchain_core::{Address, MockChainSubmitter, TransportError};

    use super::*;

    #[test]
    fn config_is_required() {
        assert!(ClientBuilder::new().build().is_err());
    }

    #[test]
    fn starting_level_is_validated() {
        let result = Client::builder()
            .config(ClientConfig::new(0, 1, 0))
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn session_saves_every_level_in_one_batch() {
        let submitter = MockChainSubmitter::new();
        let mut config = ClientConfig::new(24, 3, 77);
        config.progress_contract = Some(Address::repeat_byte(0x33));

        let mut client = Client::builder()
            .config(config)
            .submitter(submitter.clone())
            .build()
            .unwrap();

        let report = client.run().await.unwrap();
        assert_eq!(
            report.completions.iter().map(|c| c.level).collect::<Vec<_>>(),
            vec![24, 25, 26]
        );
        assert!(report.batch.unwrap().succeeded);
        assert_eq!(submitter.call_count(), 1);
        assert_eq!(submitter.submissions()[0].len(), 3);
        assert!(client.queue().is_empty());
    }

    #[tokio::test]
    async fn failed_submission_keeps_progress_queued() {
        let submitter = MockChainSubmitter::new();
        submitter.fail_next(TransportError::Underpriced("fee too low".into()));
        let mut config = ClientConfig::new(1, 2, 3);
        config.progress_contract = Some(Address::repeat_byte(0x33));

        let mut client = Client::builder()
            .config(config)
            .submitter(submitter)
            .build()
            .unwrap();

        let report = client.run().await.unwrap();
        assert!(!report.batch.unwrap().succeeded);
        assert_eq!(client.queue().len(), 2);
    }

    #[tokio::test]
    async fn no_contract_means_no_submission() {
        let submitter = MockChainSubmitter::new();
        let mut client = Client::builder()
            .config(ClientConfig::default())
            .submitter(submitter.clone())
            .build()
            .unwrap();

        let report = client.run().await.unwrap();
        assert_eq!(report.completions.len(), 1);
        assert!(report.batch.is_none());
        assert_eq!(submitter.call_count(), 0);
    }
}
