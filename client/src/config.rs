use std::{env, fmt, path::PathBuf, time::Duration};

use solana_sdk::commitment_config::CommitmentConfig;

use crate::error::{ClientError, Result};

pub const PROVIDER_URL_ENV: &str = "ANCHOR_PROVIDER_URL";
pub const WALLET_ENV: &str = "ANCHOR_WALLET";
pub const COMMITMENT_ENV: &str = "ANCHOR_COMMITMENT";
pub const TIMEOUT_ENV: &str = "ANCHOR_RPC_TIMEOUT_SECS";

pub const DEFAULT_WALLET: &str = "~/.config/solana/id.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
    Custom(String),
}

impl Cluster {
    /// Accepts a moniker (`localnet`, `devnet`, ...) or a raw RPC URL.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "" => Err(ClientError::config("cluster must not be empty")),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            "mainnet" | "mainnet-beta" => Ok(Cluster::Mainnet),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Cluster::Custom(value.to_string()))
            }
            _ => Err(ClientError::config(format!(
                "`{value}` is neither a cluster name nor an http(s) URL"
            ))),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Custom(url) => url,
        }
    }

    /// Key of the `[programs.<cluster>]` table; custom endpoints count as localnet.
    pub fn registry_key(&self) -> &'static str {
        match self {
            Cluster::Localnet | Cluster::Custom(_) => "localnet",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub cluster: Cluster,
    pub wallet: PathBuf,
    pub commitment: CommitmentConfig,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(cluster: Cluster, wallet: impl Into<PathBuf>) -> Self {
        Self {
            cluster,
            wallet: wallet.into(),
            commitment: CommitmentConfig::confirmed(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `ANCHOR_PROVIDER_URL` (required), `ANCHOR_WALLET`,
    /// `ANCHOR_COMMITMENT` and `ANCHOR_RPC_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(PROVIDER_URL_ENV)
            .ok_or_else(|| ClientError::config(format!("{PROVIDER_URL_ENV} is not set")))?;
        let cluster = Cluster::parse(&url)?;

        let wallet = lookup(WALLET_ENV).unwrap_or_else(|| DEFAULT_WALLET.to_string());
        let wallet = expand_tilde(&wallet, lookup("HOME").as_deref())?;

        let commitment = match lookup(COMMITMENT_ENV) {
            Some(value) => parse_commitment(&value)?,
            None => CommitmentConfig::confirmed(),
        };

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    ClientError::config(format!("{TIMEOUT_ENV} must be whole seconds, got `{value}`"))
                })?;
                if secs == 0 {
                    return Err(ClientError::config(format!("{TIMEOUT_ENV} must be positive")));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            cluster,
            wallet,
            commitment,
            timeout,
        })
    }
}

pub fn parse_commitment(value: &str) -> Result<CommitmentConfig> {
    match value.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(ClientError::config(format!("unknown commitment level `{other}`"))),
    }
}

/// Expands a leading `~` to `home`.
pub fn expand_tilde(path: &str, home: Option<&str>) -> Result<PathBuf> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };
    let home = home.ok_or_else(|| ClientError::config(format!("cannot expand `{path}`: HOME is not set")))?;
    let rest = rest.trim_start_matches('/');
    Ok(PathBuf::from(home).join(rest))
}
