use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};

use super::{check_token_program, LendingInstruction, ID};

/// Create a lending market owned by `owner`.
///
/// ### Accounts:
///   0. `[WRITE]` Lending market account, uninitialized
///   1. `[]` Rent sysvar
///   2. `[]` Token program
///   3. `[]` Pyth oracle program
///   4. `[]` Switchboard oracle program
pub struct InitLendingMarket<'a> {
    pub lending_market: &'a AccountInfo,
    pub rent_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub oracle_program: &'a AccountInfo,
    pub switchboard_oracle_program: &'a AccountInfo,
    pub owner: Pubkey,
    pub quote_currency: [u8; 32],
}

impl<'a> InitLendingMarket<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    /// Accounts in the order the lending program reads them.
    /// Fails before any CPI if `token_program` is not the token program.
    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 5], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.lending_market.key()),
            AccountMeta::readonly(self.rent_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
            AccountMeta::readonly(self.oracle_program.key()),
            AccountMeta::readonly(self.switchboard_oracle_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::InitLendingMarket {
            owner: self.owner,
            quote_currency: self.quote_currency,
        }
        .pack();

        let instruction = Instruction {
            program_id: &ID,
            accounts: &account_metas,
            data: data.as_slice(),
        };

        invoke_signed(
            &instruction,
            &[
                self.lending_market,
                self.rent_sysvar,
                self.token_program,
                self.oracle_program,
                self.switchboard_oracle_program,
            ],
            signers,
        )
    }
}

/// Hand the lending market over to `new_owner`.
///
/// ### Accounts:
///   0. `[WRITE]` Lending market account
///   1. `[SIGNER]` Current owner
pub struct SetLendingMarketOwner<'a> {
    pub lending_market: &'a AccountInfo,
    pub lending_market_owner: &'a AccountInfo,
    pub new_owner: Pubkey,
}

impl<'a> SetLendingMarketOwner<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> [AccountMeta<'a>; 2] {
        [
            AccountMeta::writable(self.lending_market.key()),
            AccountMeta::readonly_signer(self.lending_market_owner.key()),
        ]
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas();

        let data = LendingInstruction::SetLendingMarketOwner {
            new_owner: self.new_owner,
        }
        .pack();

        let instruction = Instruction {
            program_id: &ID,
            accounts: &account_metas,
            data: data.as_slice(),
        };

        invoke_signed(
            &instruction,
            &[self.lending_market, self.lending_market_owner],
            signers,
        )
    }
}
