use std::{path::Path, sync::Arc};

use solana_banks_client::BanksClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
    transaction::Transaction,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    config::ProviderConfig,
    connection::{BanksConnection, Connection, RpcConnection},
    error::{ClientError, Result},
};

/// Connection plus the identity that pays for and signs every transaction.
pub struct Provider {
    connection: Arc<dyn Connection>,
    payer: Keypair,
    // blockhash of the previous send; never reused
    last_blockhash: Mutex<Option<Hash>>,
}

impl Provider {
    pub fn new(connection: Arc<dyn Connection>, payer: Keypair) -> Self {
        Self {
            connection,
            payer,
            last_blockhash: Mutex::new(None),
        }
    }

    /// Provider for whatever the ambient environment points at.
    pub fn env() -> Result<Self> {
        Self::from_config(&ProviderConfig::from_env()?)
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let payer = load_keypair(&config.wallet)?;
        let connection = RpcConnection::new(config);
        debug!(
            url = %connection.url(),
            payer = %payer.pubkey(),
            commitment = ?config.commitment.commitment,
            "provider configured"
        );
        Ok(Self::new(Arc::new(connection), payer))
    }

    /// Provider backed by an in-process test bank.
    pub fn local(banks_client: BanksClient, payer: Keypair) -> Self {
        Self::new(
            Arc::new(BanksConnection::new(banks_client, CommitmentConfig::confirmed())),
            payer,
        )
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.connection.commitment()
    }

    /// Build, sign and submit one transaction carrying `instructions`.
    ///
    /// The payer always signs first; `signers` are added after it. Each call
    /// signs against a blockhash the previous call did not use, so repeating
    /// the same instructions yields a new transaction.
    pub async fn send(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Result<Signature> {
        let mut last = self.last_blockhash.lock().await;

        let mut blockhash = self.connection.latest_blockhash().await?;
        if let Some(previous) = last.as_ref().filter(|previous| **previous == blockhash) {
            blockhash = self.connection.new_blockhash(previous).await?;
        }

        let mut all: Vec<&dyn Signer> = Vec::with_capacity(signers.len() + 1);
        all.push(&self.payer);
        all.extend(signers.iter().map(|k| *k as &dyn Signer));

        let mut transaction = Transaction::new_with_payer(instructions, Some(&self.payer.pubkey()));
        transaction.try_sign(&all, blockhash)?;

        let signature = self.connection.send_transaction(transaction).await?;
        *last = Some(blockhash);
        info!(%signature, "transaction confirmed");
        Ok(signature)
    }
}

pub fn load_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| ClientError::Wallet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solana_sdk::system_instruction;
    use std::sync::Mutex as StdMutex;

    // Always reports the same latest blockhash; `new_blockhash` hands out fresh ones.
    struct StuckBank {
        latest: Hash,
        fresh: StdMutex<u8>,
        sent: StdMutex<Vec<Hash>>,
    }

    impl StuckBank {
        fn new() -> Self {
            Self {
                latest: Hash::new_from_array([1; 32]),
                fresh: StdMutex::new(1),
                sent: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Connection for StuckBank {
        async fn latest_blockhash(&self) -> Result<Hash> {
            Ok(self.latest)
        }

        async fn new_blockhash(&self, previous: &Hash) -> Result<Hash> {
            let mut n = self.fresh.lock().unwrap();
            *n += 1;
            let hash = Hash::new_from_array([*n; 32]);
            assert_ne!(&hash, previous);
            Ok(hash)
        }

        async fn send_transaction(&self, transaction: Transaction) -> Result<Signature> {
            self.sent.lock().unwrap().push(transaction.message.recent_blockhash);
            Ok(transaction.signatures[0])
        }

        fn commitment(&self) -> CommitmentConfig {
            CommitmentConfig::processed()
        }
    }

    #[tokio::test]
    async fn repeated_sends_never_share_a_blockhash() {
        let bank = Arc::new(StuckBank::new());
        let provider = Provider::new(bank.clone(), Keypair::new());
        let ix = system_instruction::transfer(&provider.payer(), &Pubkey::new_from_array([7; 32]), 1);

        let first = provider.send(&[ix.clone()], &[]).await.unwrap();
        let second = provider.send(&[ix.clone()], &[]).await.unwrap();
        let third = provider.send(&[ix], &[]).await.unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        let sent = bank.sent.lock().unwrap();
        assert_eq!(sent[0], bank.latest);
        assert_ne!(sent[1], sent[0]);
        assert_ne!(sent[2], sent[1]);
    }

    #[tokio::test]
    async fn commitment_comes_from_the_connection() {
        let provider = Provider::new(Arc::new(StuckBank::new()), Keypair::new());
        assert_eq!(provider.commitment(), CommitmentConfig::processed());
    }

    #[tokio::test]
    async fn missing_extra_signer_fails_before_submission() {
        let bank = Arc::new(StuckBank::new());
        let provider = Provider::new(bank.clone(), Keypair::new());
        let other = Keypair::new();
        let ix = system_instruction::transfer(&other.pubkey(), &provider.payer(), 1);

        let res = provider.send(&[ix], &[]).await;
        assert!(matches!(res, Err(ClientError::Signing(_))));
        assert!(bank.sent.lock().unwrap().is_empty());
    }
}
