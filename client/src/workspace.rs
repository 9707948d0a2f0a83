use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use serde::Deserialize;
use solana_sdk::{pubkey::Pubkey, signature::Signer};
use tracing::debug;

use crate::{
    config::{expand_tilde, Cluster, ProviderConfig, DEFAULT_WALLET},
    error::{ClientError, Result},
    program::{Idl, Program},
    provider::{load_keypair, Provider},
};

pub const MANIFEST: &str = "Anchor.toml";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    provider: Option<ProviderSection>,
    #[serde(default)]
    programs: BTreeMap<String, BTreeMap<String, ProgramEntry>>,
}

#[derive(Debug, Deserialize)]
struct ProviderSection {
    cluster: String,
    #[serde(default)]
    wallet: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProgramEntry {
    Address(String),
    Detailed { address: String },
}

impl ProgramEntry {
    fn address(&self) -> &str {
        match self {
            ProgramEntry::Address(address) | ProgramEntry::Detailed { address } => address,
        }
    }
}

/// Registry of the programs built and deployed from one workspace root.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    manifest: Manifest,
}

impl Workspace {
    /// Walk up from `start` to the first directory holding `Anchor.toml`.
    pub fn discover(start: &Path) -> Result<Self> {
        let root = start
            .ancestors()
            .find(|dir| dir.join(MANIFEST).is_file())
            .ok_or_else(|| ClientError::WorkspaceNotFound(start.to_path_buf()))?;
        Self::load(root)
    }

    pub fn load(root: &Path) -> Result<Self> {
        let raw = fs::read_to_string(root.join(MANIFEST))?;
        let manifest: Manifest = toml::from_str(&raw)?;
        debug!(root = %root.display(), "loaded workspace manifest");
        Ok(Self {
            root: root.to_path_buf(),
            manifest,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cluster(&self) -> Result<Cluster> {
        match &self.manifest.provider {
            Some(section) => Cluster::parse(&section.cluster),
            None => Ok(Cluster::Localnet),
        }
    }

    /// Provider settings from the `[provider]` table.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let wallet = self
            .manifest
            .provider
            .as_ref()
            .and_then(|section| section.wallet.as_deref())
            .unwrap_or(DEFAULT_WALLET);
        let wallet = expand_tilde(wallet, std::env::var("HOME").ok().as_deref())?;
        Ok(ProviderConfig::new(self.cluster()?, wallet))
    }

    /// Address of `name` on the workspace cluster.
    ///
    /// `Example`, `example`, `example-program` and `ExampleProgram` are all
    /// looked up in snake case. Falls back to the deploy keypair under
    /// `target/deploy/`.
    pub fn program_id(&self, name: &str) -> Result<Pubkey> {
        let wanted = snake_case(name);
        let cluster = self.cluster()?;

        let registered = self
            .manifest
            .programs
            .get(cluster.registry_key())
            .and_then(|table| table.iter().find(|(key, _)| snake_case(key) == wanted));

        if let Some((key, entry)) = registered {
            return Pubkey::from_str(entry.address()).map_err(|_| ClientError::InvalidAddress {
                name: key.clone(),
                address: entry.address().to_string(),
            });
        }

        let keypair_path = self
            .root
            .join("target")
            .join("deploy")
            .join(format!("{wanted}-keypair.json"));
        if keypair_path.is_file() {
            debug!(path = %keypair_path.display(), "resolving program id from deploy keypair");
            return Ok(load_keypair(&keypair_path)?.pubkey());
        }

        Err(ClientError::ProgramNotFound(name.to_string()))
    }

    /// Typed handle for `P`, resolved by `P::NAME`.
    pub fn program<P: Idl>(&self, provider: Arc<Provider>) -> Result<Program<P>> {
        let id = self.program_id(P::NAME)?;
        debug!(name = P::NAME, %id, "resolved program");
        Ok(Program::new(id, provider))
    }
}

/// `ExampleProgram` / `example-program` / `example_program` -> `example_program`.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '-' || ch == ' ' || ch == '_' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower = false;
        } else if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}
