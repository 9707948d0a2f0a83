//! Host-side client for the `example` program.
//!
//! A [`Provider`] bundles a connection and a paying keypair, a [`Workspace`]
//! maps program names to deployed addresses, and [`Program`] is the typed
//! handle whose methods submit transactions. [`smoke::run`] strings the three
//! together into the end-to-end initialize check.

pub mod config;
pub mod connection;
pub mod error;
pub mod example;
pub mod logging;
pub mod program;
pub mod provider;
pub mod receipt;
pub mod smoke;
pub mod workspace;

pub use config::{Cluster, ProviderConfig};
pub use connection::{BanksConnection, Connection, RpcConnection};
pub use error::{ClientError, Result};
pub use example::{Example, InitializeArgs};
pub use program::{Idl, Program, RequestBuilder};
pub use provider::Provider;
pub use receipt::TransactionReceipt;
pub use workspace::Workspace;
