use std::time::{Duration, Instant};

use async_trait::async_trait;
use solana_banks_client::BanksClient;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    signature::Signature,
    transaction::Transaction,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    config::ProviderConfig,
    error::{ClientError, Result},
};

/// How long a bank gets to produce a blockhash different from the last one used.
pub const NEW_BLOCKHASH_TIMEOUT: Duration = Duration::from_secs(5);
const NEW_BLOCKHASH_POLL: Duration = Duration::from_millis(200);

/// Where transactions go. One call to `send_transaction` is one submission;
/// implementations do not retry.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Wait for a blockhash other than `previous`.
    async fn new_blockhash(&self, previous: &Hash) -> Result<Hash>;

    /// Submit a signed transaction and wait until it reaches the connection's commitment.
    async fn send_transaction(&self, transaction: Transaction) -> Result<Signature>;

    fn commitment(&self) -> CommitmentConfig;
}

/// JSON-RPC endpoint of a running validator.
pub struct RpcConnection {
    client: RpcClient,
}

impl RpcConnection {
    pub fn new(config: &ProviderConfig) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            config.cluster.url().to_string(),
            config.timeout,
            config.commitment,
        );
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl Connection for RpcConnection {
    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.client.get_latest_blockhash().await?)
    }

    async fn new_blockhash(&self, previous: &Hash) -> Result<Hash> {
        Ok(self.client.get_new_latest_blockhash(previous).await?)
    }

    async fn send_transaction(&self, transaction: Transaction) -> Result<Signature> {
        debug!(url = %self.client.url(), "submitting transaction");
        Ok(self.client.send_and_confirm_transaction(&transaction).await?)
    }

    fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }
}

/// In-process bank, as booted by `solana-program-test`.
pub struct BanksConnection {
    client: Mutex<BanksClient>,
    commitment: CommitmentLevel,
}

impl BanksConnection {
    pub fn new(client: BanksClient, commitment: CommitmentConfig) -> Self {
        Self {
            client: Mutex::new(client),
            commitment: commitment.commitment,
        }
    }
}

#[async_trait]
impl Connection for BanksConnection {
    async fn latest_blockhash(&self) -> Result<Hash> {
        let client = self.client.lock().await;
        client
            .get_latest_blockhash_with_commitment(self.commitment)
            .await?
            .map(|(hash, _)| hash)
            .ok_or(ClientError::BlockhashUnavailable)
    }

    async fn new_blockhash(&self, previous: &Hash) -> Result<Hash> {
        let start = Instant::now();
        while start.elapsed() < NEW_BLOCKHASH_TIMEOUT {
            let hash = self.latest_blockhash().await?;
            if hash != *previous {
                return Ok(hash);
            }
            debug!(%previous, "bank has not advanced, polling again");
            tokio::time::sleep(NEW_BLOCKHASH_POLL).await;
        }
        Err(ClientError::StaleBlockhash(*previous))
    }

    async fn send_transaction(&self, transaction: Transaction) -> Result<Signature> {
        let signature = transaction.signatures.first().copied().unwrap_or_default();
        let client = self.client.lock().await;
        client
            .process_transaction_with_commitment(transaction, self.commitment)
            .await?;
        Ok(signature)
    }

    fn commitment(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.commitment,
        }
    }
}
