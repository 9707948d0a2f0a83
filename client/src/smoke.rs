use std::sync::Arc;

use tracing::debug;

use crate::{
    error::Result,
    example::{Example, InitializeArgs},
    provider::Provider,
    receipt::TransactionReceipt,
    workspace::Workspace,
};

/// Resolve `example` from the workspace, call `initialize` once and print
/// the signature. Errors propagate; nothing is retried.
pub async fn run(provider: Arc<Provider>, workspace: &Workspace) -> Result<TransactionReceipt> {
    let program = workspace.program::<Example>(provider)?;
    debug!(
        program = %program.id(),
        payer = %program.provider().payer(),
        commitment = ?program.provider().commitment().commitment,
        "calling initialize"
    );

    let receipt = program.initialize(InitializeArgs::default()).await?;
    println!("Your transaction signature {receipt}");
    Ok(receipt)
}
