use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read wallet keypair {path}: {message}")]
    Wallet { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid Anchor.toml: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("No Anchor.toml found above {0}")]
    WorkspaceNotFound(PathBuf),

    #[error("Program `{0}` is not registered in the workspace")]
    ProgramNotFound(String),

    #[error("Invalid program address for `{name}`: {address}")]
    InvalidAddress { name: String, address: String },

    #[error("RPC request failed: {0}")]
    Rpc(#[from] Box<solana_client::client_error::ClientError>),

    #[error("Test bank request failed: {0}")]
    Banks(#[from] solana_banks_client::BanksClientError),

    #[error("Cluster returned no blockhash")]
    BlockhashUnavailable,

    #[error("Blockhash did not advance past {0}")]
    StaleBlockhash(solana_sdk::hash::Hash),

    #[error("Signing failed: {0}")]
    Signing(#[from] solana_sdk::signer::SignerError),

    #[error("Instruction encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Transaction was accepted without a signature")]
    EmptySignature,
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        ClientError::Rpc(Box::new(err))
    }
}

impl ClientError {
    pub fn config(message: impl Into<String>) -> Self {
        ClientError::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
