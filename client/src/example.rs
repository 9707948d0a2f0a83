use serde::{Deserialize, Serialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use example_program::instruction::ExampleInstruction;

use crate::{
    error::Result,
    program::{Idl, Program},
    receipt::TransactionReceipt,
};

/// The on-chain `example` program.
pub struct Example;

impl Idl for Example {
    const NAME: &'static str = "example";
}

/// Arguments of `initialize`. Carries no fields and encodes to zero bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeArgs {}

pub fn lending_program_id() -> Pubkey {
    Pubkey::new_from_array(example_program::cpi::lending::ID)
}

fn encode<T: Serialize>(tag: ExampleInstruction, args: &T) -> Result<Vec<u8>> {
    let mut data = vec![tag as u8];
    data.extend(bincode::serialize(args)?);
    Ok(data)
}

pub fn initialize(program_id: Pubkey, args: InitializeArgs) -> Result<Instruction> {
    Ok(Instruction {
        program_id,
        accounts: Vec::new(),
        data: encode(ExampleInstruction::Initialize, &args)?,
    })
}

pub fn refresh_reserve(
    program_id: Pubkey,
    reserve: Pubkey,
    pyth_price: Pubkey,
    switchboard_feed: Pubkey,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(lending_program_id(), false),
            AccountMeta::new(reserve, false),
            AccountMeta::new_readonly(pyth_price, false),
            AccountMeta::new_readonly(switchboard_feed, false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
        ],
        data: vec![ExampleInstruction::RefreshReserve as u8],
    }
}

/// `reserves` lists deposit reserves first, then borrow reserves.
pub fn refresh_obligation(program_id: Pubkey, obligation: Pubkey, reserves: &[Pubkey]) -> Instruction {
    let mut accounts = Vec::with_capacity(3 + reserves.len());
    accounts.push(AccountMeta::new_readonly(lending_program_id(), false));
    accounts.push(AccountMeta::new(obligation, false));
    accounts.push(AccountMeta::new_readonly(sysvar::clock::id(), false));
    accounts.extend(reserves.iter().map(|r| AccountMeta::new_readonly(*r, false)));

    Instruction {
        program_id,
        accounts,
        data: vec![ExampleInstruction::RefreshObligation as u8],
    }
}

impl Program<Example> {
    pub async fn initialize(&self, args: InitializeArgs) -> Result<TransactionReceipt> {
        self.request()
            .instruction(initialize(self.id(), args)?)
            .send()
            .await
    }

    pub async fn refresh_reserve(
        &self,
        reserve: Pubkey,
        pyth_price: Pubkey,
        switchboard_feed: Pubkey,
    ) -> Result<TransactionReceipt> {
        self.request()
            .instruction(refresh_reserve(self.id(), reserve, pyth_price, switchboard_feed))
            .send()
            .await
    }

    pub async fn refresh_obligation(
        &self,
        obligation: Pubkey,
        reserves: &[Pubkey],
    ) -> Result<TransactionReceipt> {
        self.request()
            .instruction(refresh_obligation(self.id(), obligation, reserves))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_a_bare_discriminator() {
        let id = Pubkey::new_unique();
        let ix = initialize(id, InitializeArgs::default()).unwrap();

        assert_eq!(ix.program_id, id);
        assert_eq!(ix.data, vec![0]);
        assert!(ix.accounts.is_empty());
    }

    #[test]
    fn refresh_reserve_account_order() {
        let (reserve, pyth, switchboard) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let ix = refresh_reserve(Pubkey::new_unique(), reserve, pyth, switchboard);

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(keys, vec![lending_program_id(), reserve, pyth, switchboard, sysvar::clock::id()]);
        assert!(ix.accounts[1].is_writable);
        assert!(ix.accounts.iter().all(|m| !m.is_signer));
        assert_eq!(ix.data, vec![1]);
    }

    #[test]
    fn refresh_obligation_appends_reserves() {
        let obligation = Pubkey::new_unique();
        let reserves = [Pubkey::new_unique(), Pubkey::new_unique()];
        let ix = refresh_obligation(Pubkey::new_unique(), obligation, &reserves);

        assert_eq!(ix.accounts.len(), 5);
        assert_eq!(ix.accounts[1].pubkey, obligation);
        assert_eq!(ix.accounts[3].pubkey, reserves[0]);
        assert_eq!(ix.accounts[4].pubkey, reserves[1]);
        assert_eq!(ix.data, vec![2]);
    }
}
