use pinocchio::{
    account_info::AccountInfo,
    cpi::slice_invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    ProgramResult,
};

use super::{
    check_token_program, AccountMetas, LendingInstruction, ID, MAX_FLASH_LOAN_RECEIVER_ACCOUNTS,
};
use crate::error::{to_program_error, ExampleError};

const FIXED_ACCOUNTS: usize = 9;
const MAX_ACCOUNTS: usize = FIXED_ACCOUNTS + MAX_FLASH_LOAN_RECEIVER_ACCOUNTS;

/// Borrow `amount` for the duration of one call into the receiver program.
///
/// The receiver program must return the amount plus fees to the reserve
/// liquidity supply before the lending program checks balances.
///
/// ### Accounts:
///   0. `[WRITE]` Source reserve liquidity supply
///   1. `[WRITE]` Destination liquidity token account
///   2. `[WRITE]` Reserve account
///   3. `[WRITE]` Reserve liquidity fee receiver
///   4. `[WRITE]` Host fee receiver
///   5. `[]` Lending market
///   6. `[]` Lending market authority
///   7. `[]` Token program
///   8. `[]` Flash loan receiver program
///   9.. Accounts forwarded to the receiver, flags preserved
pub struct FlashLoan<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub destination_liquidity: &'a AccountInfo,
    pub reserve: &'a AccountInfo,
    pub reserve_liquidity_fee_receiver: &'a AccountInfo,
    pub host_fee_receiver: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub flash_loan_receiver_program: &'a AccountInfo,
    pub receiver_accounts: &'a [AccountInfo],
    pub amount: u64,
}

impl<'a> FlashLoan<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    fn fixed_accounts(&self) -> [&'a AccountInfo; FIXED_ACCOUNTS] {
        [
            self.source_liquidity,
            self.destination_liquidity,
            self.reserve,
            self.reserve_liquidity_fee_receiver,
            self.host_fee_receiver,
            self.lending_market,
            self.lending_market_authority,
            self.token_program,
            self.flash_loan_receiver_program,
        ]
    }

    /// Fixed accounts, then the receiver accounts with their own flags.
    pub fn account_metas(&self) -> Result<AccountMetas<'a, MAX_ACCOUNTS>, ProgramError> {
        check_token_program(self.token_program)?;
        if self.receiver_accounts.len() > MAX_FLASH_LOAN_RECEIVER_ACCOUNTS {
            return Err(to_program_error(ExampleError::TooManyAccounts));
        }
        let fixed = self.fixed_accounts();

        let metas = core::array::from_fn(|i| match i {
            0..=4 => AccountMeta::writable(fixed[i].key()),
            5..=8 => AccountMeta::readonly(fixed[i].key()),
            _ => match self.receiver_accounts.get(i - FIXED_ACCOUNTS) {
                Some(account) => {
                    AccountMeta::new(account.key(), account.is_writable(), account.is_signer())
                }
                None => AccountMeta::readonly(self.source_liquidity.key()),
            },
        });

        Ok(AccountMetas::new(metas, FIXED_ACCOUNTS + self.receiver_accounts.len()))
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let mut account_infos = [self.source_liquidity; MAX_ACCOUNTS];
        account_infos[..FIXED_ACCOUNTS].copy_from_slice(&self.fixed_accounts());
        for (slot, account) in account_infos[FIXED_ACCOUNTS..]
            .iter_mut()
            .zip(self.receiver_accounts)
        {
            *slot = account;
        }

        let data = LendingInstruction::FlashLoan {
            amount: self.amount,
        }
        .pack();

        let accounts = account_metas.as_slice();
        let instruction = Instruction {
            program_id: &ID,
            accounts,
            data: data.as_slice(),
        };

        slice_invoke_signed(&instruction, &account_infos[..accounts.len()], signers)
    }
}
