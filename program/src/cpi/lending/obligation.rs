use pinocchio::{
    account_info::AccountInfo,
    cpi::{invoke_signed, slice_invoke_signed},
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    ProgramResult,
};

use super::{check_token_program, AccountMetas, LendingInstruction, ID, MAX_OBLIGATION_RESERVES};
use crate::error::{to_program_error, ExampleError};

/// Create an obligation owned by `obligation_owner`.
///
/// ### Accounts:
///   0. `[WRITE]` Obligation account, uninitialized
///   1. `[]` Lending market
///   2. `[SIGNER]` Obligation owner
///   3. `[]` Clock sysvar
///   4. `[]` Rent sysvar
///   5. `[]` Token program
pub struct InitObligation<'a> {
    pub obligation: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub obligation_owner: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub rent_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
}

impl<'a> InitObligation<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 6], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly_signer(self.obligation_owner.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.rent_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::InitObligation.pack();

        let instruction = Instruction {
            program_id: &ID,
            accounts: &account_metas,
            data: data.as_slice(),
        };

        invoke_signed(
            &instruction,
            &[
                self.obligation,
                self.lending_market,
                self.obligation_owner,
                self.clock_sysvar,
                self.rent_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}

/// Recompute deposited and borrowed value of an obligation.
///
/// `reserves` lists every deposit reserve followed by every borrow reserve,
/// in the order the obligation stores them. All of them must already be
/// refreshed in the current slot.
///
/// ### Accounts:
///   0. `[WRITE]` Obligation account
///   1. `[]` Clock sysvar
///   2.. `[]` Reserves
pub struct RefreshObligation<'a> {
    pub obligation: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub reserves: &'a [AccountInfo],
}

impl<'a> RefreshObligation<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    /// Obligation and clock, then the reserves. More than
    /// `MAX_OBLIGATION_RESERVES` reserves is rejected.
    pub fn account_metas(
        &self,
    ) -> Result<AccountMetas<'a, { 2 + MAX_OBLIGATION_RESERVES }>, ProgramError> {
        if self.reserves.len() > MAX_OBLIGATION_RESERVES {
            return Err(to_program_error(ExampleError::TooManyReserves));
        }
        let obligation = self.obligation.key();

        let metas = core::array::from_fn(|i| match i {
            0 => AccountMeta::writable(obligation),
            1 => AccountMeta::readonly(self.clock_sysvar.key()),
            // slots past the reserves are padding
            _ => AccountMeta::readonly(self.reserves.get(i - 2).map_or(obligation, |r| r.key())),
        });

        Ok(AccountMetas::new(metas, 2 + self.reserves.len()))
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let mut account_infos = [self.obligation; 2 + MAX_OBLIGATION_RESERVES];
        account_infos[1] = self.clock_sysvar;
        for (slot, reserve) in account_infos[2..].iter_mut().zip(self.reserves) {
            *slot = reserve;
        }

        let data = LendingInstruction::RefreshObligation.pack();

        let accounts = account_metas.as_slice();
        let instruction = Instruction {
            program_id: &ID,
            accounts,
            data: data.as_slice(),
        };

        slice_invoke_signed(&instruction, &account_infos[..accounts.len()], signers)
    }
}

/// Move collateral tokens into an obligation.
///
/// ### Accounts:
///   0. `[WRITE]` Source collateral token account
///   1. `[WRITE]` Destination deposit reserve collateral supply
///   2. `[]` Deposit reserve
///   3. `[WRITE]` Obligation account
///   4. `[]` Lending market
///   5. `[SIGNER]` Obligation owner
///   6. `[SIGNER]` User transfer authority
///   7. `[]` Clock sysvar
///   8. `[]` Token program
pub struct DepositObligationCollateral<'a> {
    pub source_collateral: &'a AccountInfo,
    pub destination_collateral: &'a AccountInfo,
    pub deposit_reserve: &'a AccountInfo,
    pub obligation: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub obligation_owner: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub collateral_amount: u64,
}

impl<'a> DepositObligationCollateral<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 9], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_collateral.key()),
            AccountMeta::writable(self.destination_collateral.key()),
            AccountMeta::readonly(self.deposit_reserve.key()),
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly_signer(self.obligation_owner.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::DepositObligationCollateral {
            collateral_amount: self.collateral_amount,
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
                self.source_collateral,
                self.destination_collateral,
                self.deposit_reserve,
                self.obligation,
                self.lending_market,
                self.obligation_owner,
                self.user_transfer_authority,
                self.clock_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}

/// Move collateral tokens out of an obligation.
///
/// ### Accounts:
///   0. `[WRITE]` Source withdraw reserve collateral supply
///   1. `[WRITE]` Destination collateral token account
///   2. `[]` Withdraw reserve
///   3. `[WRITE]` Obligation account
///   4. `[]` Lending market
///   5. `[]` Lending market authority
///   6. `[SIGNER]` Obligation owner
///   7. `[]` Clock sysvar
///   8. `[]` Token program
pub struct WithdrawObligationCollateral<'a> {
    pub source_collateral: &'a AccountInfo,
    pub destination_collateral: &'a AccountInfo,
    pub withdraw_reserve: &'a AccountInfo,
    pub obligation: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub obligation_owner: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub collateral_amount: u64,
}

impl<'a> WithdrawObligationCollateral<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 9], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_collateral.key()),
            AccountMeta::writable(self.destination_collateral.key()),
            AccountMeta::readonly(self.withdraw_reserve.key()),
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.obligation_owner.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::WithdrawObligationCollateral {
            collateral_amount: self.collateral_amount,
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
                self.source_collateral,
                self.destination_collateral,
                self.withdraw_reserve,
                self.obligation,
                self.lending_market,
                self.lending_market_authority,
                self.obligation_owner,
                self.clock_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}

/// Borrow liquidity against an obligation's collateral.
///
/// ### Accounts:
///   0. `[WRITE]` Source borrow reserve liquidity supply
///   1. `[WRITE]` Destination liquidity token account
///   2. `[WRITE]` Borrow reserve
///   3. `[WRITE]` Borrow reserve liquidity fee receiver
///   4. `[WRITE]` Obligation account
///   5. `[]` Lending market
///   6. `[]` Lending market authority
///   7. `[SIGNER]` Obligation owner
///   8. `[]` Clock sysvar
///   9. `[]` Token program
///   10. `[WRITE]` Host fee receiver, optional
pub struct BorrowObligationLiquidity<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub destination_liquidity: &'a AccountInfo,
    pub borrow_reserve: &'a AccountInfo,
    pub borrow_reserve_liquidity_fee_receiver: &'a AccountInfo,
    pub obligation: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub obligation_owner: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub host_fee_receiver: Option<&'a AccountInfo>,
    pub liquidity_amount: u64,
}

impl<'a> BorrowObligationLiquidity<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    /// Ten fixed accounts, plus the host fee receiver when one is given.
    pub fn account_metas(&self) -> Result<AccountMetas<'a, 11>, ProgramError> {
        check_token_program(self.token_program)?;

        let host_fee_receiver = self.host_fee_receiver.map(|account| account.key());
        let metas = [
            AccountMeta::writable(self.source_liquidity.key()),
            AccountMeta::writable(self.destination_liquidity.key()),
            AccountMeta::writable(self.borrow_reserve.key()),
            AccountMeta::writable(self.borrow_reserve_liquidity_fee_receiver.key()),
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.obligation_owner.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
            AccountMeta::writable(host_fee_receiver.unwrap_or(self.source_liquidity.key())),
        ];

        Ok(AccountMetas::new(metas, 10 + host_fee_receiver.is_some() as usize))
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let account_infos = [
            self.source_liquidity,
            self.destination_liquidity,
            self.borrow_reserve,
            self.borrow_reserve_liquidity_fee_receiver,
            self.obligation,
            self.lending_market,
            self.lending_market_authority,
            self.obligation_owner,
            self.clock_sysvar,
            self.token_program,
            self.host_fee_receiver.unwrap_or(self.source_liquidity),
        ];

        let data = LendingInstruction::BorrowObligationLiquidity {
            liquidity_amount: self.liquidity_amount,
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

/// Repay borrowed liquidity on behalf of any obligation.
///
/// ### Accounts:
///   0. `[WRITE]` Source liquidity token account
///   1. `[WRITE]` Destination repay reserve liquidity supply
///   2. `[WRITE]` Repay reserve
///   3. `[WRITE]` Obligation account
///   4. `[]` Lending market
///   5. `[SIGNER]` User transfer authority
///   6. `[]` Clock sysvar
///   7. `[]` Token program
pub struct RepayObligationLiquidity<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub destination_liquidity: &'a AccountInfo,
    pub repay_reserve: &'a AccountInfo,
    pub obligation: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub liquidity_amount: u64,
}

impl<'a> RepayObligationLiquidity<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 8], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_liquidity.key()),
            AccountMeta::writable(self.destination_liquidity.key()),
            AccountMeta::writable(self.repay_reserve.key()),
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::RepayObligationLiquidity {
            liquidity_amount: self.liquidity_amount,
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
                self.source_liquidity,
                self.destination_liquidity,
                self.repay_reserve,
                self.obligation,
                self.lending_market,
                self.user_transfer_authority,
                self.clock_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}

/// Repay part of an unhealthy obligation and seize its collateral at a bonus.
///
/// ### Accounts:
///   0. `[WRITE]` Source liquidity token account
///   1. `[WRITE]` Destination collateral token account
///   2. `[WRITE]` Repay reserve
///   3. `[WRITE]` Repay reserve liquidity supply
///   4. `[]` Withdraw reserve
///   5. `[WRITE]` Withdraw reserve collateral supply
///   6. `[WRITE]` Obligation account
///   7. `[]` Lending market
///   8. `[]` Lending market authority
///   9. `[SIGNER]` User transfer authority
///   10. `[]` Clock sysvar
///   11. `[]` Token program
pub struct LiquidateObligation<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub destination_collateral: &'a AccountInfo,
    pub repay_reserve: &'a AccountInfo,
    pub repay_reserve_liquidity_supply: &'a AccountInfo,
    pub withdraw_reserve: &'a AccountInfo,
    pub withdraw_reserve_collateral_supply: &'a AccountInfo,
    pub obligation: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub liquidity_amount: u64,
}

impl<'a> LiquidateObligation<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 12], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_liquidity.key()),
            AccountMeta::writable(self.destination_collateral.key()),
            AccountMeta::writable(self.repay_reserve.key()),
            AccountMeta::writable(self.repay_reserve_liquidity_supply.key()),
            AccountMeta::readonly(self.withdraw_reserve.key()),
            AccountMeta::writable(self.withdraw_reserve_collateral_supply.key()),
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::LiquidateObligation {
            liquidity_amount: self.liquidity_amount,
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
                self.source_liquidity,
                self.destination_collateral,
                self.repay_reserve,
                self.repay_reserve_liquidity_supply,
                self.withdraw_reserve,
                self.withdraw_reserve_collateral_supply,
                self.obligation,
                self.lending_market,
                self.lending_market_authority,
                self.user_transfer_authority,
                self.clock_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}

/// Deposit liquidity and post the minted collateral to an obligation in one step.
///
/// ### Accounts:
///   0. `[WRITE]` Source liquidity token account
///   1. `[WRITE]` User collateral token account
///   2. `[WRITE]` Reserve account
///   3. `[WRITE]` Reserve liquidity supply
///   4. `[WRITE]` Reserve collateral mint
///   5. `[]` Lending market
///   6. `[]` Lending market authority
///   7. `[WRITE]` Destination deposit reserve collateral supply
///   8. `[WRITE]` Obligation account
///   9. `[SIGNER]` Obligation owner
///   10. `[]` Pyth price account
///   11. `[]` Switchboard feed account
///   12. `[SIGNER]` User transfer authority
///   13. `[]` Clock sysvar
///   14. `[]` Token program
pub struct DepositReserveLiquidityAndObligationCollateral<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub user_collateral: &'a AccountInfo,
    pub reserve: &'a AccountInfo,
    pub reserve_liquidity_supply: &'a AccountInfo,
    pub reserve_collateral_mint: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub destination_deposit_collateral: &'a AccountInfo,
    pub obligation: &'a AccountInfo,
    pub obligation_owner: &'a AccountInfo,
    pub pyth_price: &'a AccountInfo,
    pub switchboard_feed: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub liquidity_amount: u64,
}

impl<'a> DepositReserveLiquidityAndObligationCollateral<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 15], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_liquidity.key()),
            AccountMeta::writable(self.user_collateral.key()),
            AccountMeta::writable(self.reserve.key()),
            AccountMeta::writable(self.reserve_liquidity_supply.key()),
            AccountMeta::writable(self.reserve_collateral_mint.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::writable(self.destination_deposit_collateral.key()),
            AccountMeta::writable(self.obligation.key()),
            AccountMeta::readonly_signer(self.obligation_owner.key()),
            AccountMeta::readonly(self.pyth_price.key()),
            AccountMeta::readonly(self.switchboard_feed.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::DepositReserveLiquidityAndObligationCollateral {
            liquidity_amount: self.liquidity_amount,
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
                self.source_liquidity,
                self.user_collateral,
                self.reserve,
                self.reserve_liquidity_supply,
                self.reserve_collateral_mint,
                self.lending_market,
                self.lending_market_authority,
                self.destination_deposit_collateral,
                self.obligation,
                self.obligation_owner,
                self.pyth_price,
                self.switchboard_feed,
                self.user_transfer_authority,
                self.clock_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}
