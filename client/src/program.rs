use std::{marker::PhantomData, sync::Arc};

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair};

use crate::{error::Result, provider::Provider, receipt::TransactionReceipt};

/// Compile-time description of a deployed program.
pub trait Idl {
    /// Registry name, matched against `[programs.<cluster>]` in snake case.
    const NAME: &'static str;
}

/// Typed handle to a deployed program.
pub struct Program<P> {
    id: Pubkey,
    provider: Arc<Provider>,
    _idl: PhantomData<P>,
}

impl<P: Idl> Program<P> {
    pub fn new(id: Pubkey, provider: Arc<Provider>) -> Self {
        Self {
            id,
            provider,
            _idl: PhantomData,
        }
    }

    pub fn id(&self) -> Pubkey {
        self.id
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder {
            provider: &self.provider,
            instructions: Vec::new(),
            signers: Vec::new(),
        }
    }
}

/// Collects instructions and extra signers for a single transaction.
pub struct RequestBuilder<'a> {
    provider: &'a Provider,
    instructions: Vec<Instruction>,
    signers: Vec<&'a Keypair>,
}

impl<'a> RequestBuilder<'a> {
    pub fn instruction(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn signer(mut self, signer: &'a Keypair) -> Self {
        self.signers.push(signer);
        self
    }

    pub async fn send(self) -> Result<TransactionReceipt> {
        let signature = self.provider.send(&self.instructions, &self.signers).await?;
        TransactionReceipt::new(signature)
    }
}
