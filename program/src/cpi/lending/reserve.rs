use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    ProgramResult,
};

use super::{check_token_program, InstructionData, LendingInstruction, ReserveConfig, ID};

/// Create a reserve and seed it with `liquidity_amount` from the source account.
///
/// `config.fee_receiver` is always replaced by `reserve_liquidity_fee_receiver`.
///
/// ### Accounts:
///   0. `[WRITE]` Source liquidity token account
///   1. `[WRITE]` Destination collateral token account
///   2. `[WRITE]` Reserve account
///   3. `[]` Reserve liquidity mint
///   4. `[WRITE]` Reserve liquidity supply
///   5. `[WRITE]` Reserve liquidity fee receiver
///   6. `[WRITE]` Reserve collateral mint
///   7. `[WRITE]` Reserve collateral supply
///   8. `[]` Pyth product account
///   9. `[]` Pyth price account
///   10. `[]` Switchboard feed account
///   11. `[]` Lending market
///   12. `[]` Lending market authority
///   13. `[SIGNER]` Lending market owner
///   14. `[SIGNER]` User transfer authority
///   15. `[]` Clock sysvar
///   16. `[]` Rent sysvar
///   17. `[]` Token program
pub struct InitReserve<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub destination_collateral: &'a AccountInfo,
    pub reserve: &'a AccountInfo,
    pub reserve_liquidity_mint: &'a AccountInfo,
    pub reserve_liquidity_supply: &'a AccountInfo,
    pub reserve_liquidity_fee_receiver: &'a AccountInfo,
    pub reserve_collateral_mint: &'a AccountInfo,
    pub reserve_collateral_supply: &'a AccountInfo,
    pub pyth_product: &'a AccountInfo,
    pub pyth_price: &'a AccountInfo,
    pub switchboard_feed: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub lending_market_owner: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub rent_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub liquidity_amount: u64,
    pub config: ReserveConfig,
}

impl<'a> InitReserve<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    /// Accounts in the order the lending program reads them.
    /// Fails before any CPI if `token_program` is not the token program.
    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 18], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_liquidity.key()),
            AccountMeta::writable(self.destination_collateral.key()),
            AccountMeta::writable(self.reserve.key()),
            AccountMeta::readonly(self.reserve_liquidity_mint.key()),
            AccountMeta::writable(self.reserve_liquidity_supply.key()),
            AccountMeta::writable(self.reserve_liquidity_fee_receiver.key()),
            AccountMeta::writable(self.reserve_collateral_mint.key()),
            AccountMeta::writable(self.reserve_collateral_supply.key()),
            AccountMeta::readonly(self.pyth_product.key()),
            AccountMeta::readonly(self.pyth_price.key()),
            AccountMeta::readonly(self.switchboard_feed.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.lending_market_owner.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.rent_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    /// Packed data with the fee receiver taken from its account, validated.
    pub fn instruction_data(&self) -> Result<InstructionData, ProgramError> {
        let config = ReserveConfig {
            fee_receiver: *self.reserve_liquidity_fee_receiver.key(),
            ..self.config
        };
        config.validate()?;

        Ok(LendingInstruction::InitReserve {
            liquidity_amount: self.liquidity_amount,
            config,
        }
        .pack())
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;
        let data = self.instruction_data()?;

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
                self.reserve,
                self.reserve_liquidity_mint,
                self.reserve_liquidity_supply,
                self.reserve_liquidity_fee_receiver,
                self.reserve_collateral_mint,
                self.reserve_collateral_supply,
                self.pyth_product,
                self.pyth_price,
                self.switchboard_feed,
                self.lending_market,
                self.lending_market_authority,
                self.lending_market_owner,
                self.user_transfer_authority,
                self.clock_sysvar,
                self.rent_sysvar,
                self.token_program,
            ],
            signers,
        )
    }
}

/// Accrue interest and update the market price of a reserve.
///
/// ### Accounts:
///   0. `[WRITE]` Reserve account
///   1. `[]` Pyth price account
///   2. `[]` Switchboard feed account
///   3. `[]` Clock sysvar
pub struct RefreshReserve<'a> {
    pub reserve: &'a AccountInfo,
    pub pyth_price: &'a AccountInfo,
    pub switchboard_feed: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
}

impl<'a> RefreshReserve<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> [AccountMeta<'a>; 4] {
        [
            AccountMeta::writable(self.reserve.key()),
            AccountMeta::readonly(self.pyth_price.key()),
            AccountMeta::readonly(self.switchboard_feed.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
        ]
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas();

        let data = LendingInstruction::RefreshReserve.pack();

        let instruction = Instruction {
            program_id: &ID,
            accounts: &account_metas,
            data: data.as_slice(),
        };

        invoke_signed(
            &instruction,
            &[
                self.reserve,
                self.pyth_price,
                self.switchboard_feed,
                self.clock_sysvar,
            ],
            signers,
        )
    }
}

/// Deposit liquidity into a reserve in exchange for collateral tokens.
///
/// ### Accounts:
///   0. `[WRITE]` Source liquidity token account
///   1. `[WRITE]` Destination collateral token account
///   2. `[WRITE]` Reserve account
///   3. `[WRITE]` Reserve liquidity supply
///   4. `[WRITE]` Reserve collateral mint
///   5. `[]` Lending market
///   6. `[]` Lending market authority
///   7. `[SIGNER]` User transfer authority
///   8. `[]` Clock sysvar
///   9. `[]` Token program
pub struct DepositReserveLiquidity<'a> {
    pub source_liquidity: &'a AccountInfo,
    pub destination_collateral: &'a AccountInfo,
    pub reserve: &'a AccountInfo,
    pub reserve_liquidity_supply: &'a AccountInfo,
    pub reserve_collateral_mint: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub liquidity_amount: u64,
}

impl<'a> DepositReserveLiquidity<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 10], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_liquidity.key()),
            AccountMeta::writable(self.destination_collateral.key()),
            AccountMeta::writable(self.reserve.key()),
            AccountMeta::writable(self.reserve_liquidity_supply.key()),
            AccountMeta::writable(self.reserve_collateral_mint.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::DepositReserveLiquidity {
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
                self.reserve,
                self.reserve_liquidity_supply,
                self.reserve_collateral_mint,
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

/// Burn collateral tokens and receive the underlying liquidity.
///
/// ### Accounts:
///   0. `[WRITE]` Source collateral token account
///   1. `[WRITE]` Destination liquidity token account
///   2. `[WRITE]` Reserve account
///   3. `[WRITE]` Reserve collateral mint
///   4. `[WRITE]` Reserve liquidity supply
///   5. `[]` Lending market
///   6. `[]` Lending market authority
///   7. `[SIGNER]` User transfer authority
///   8. `[]` Clock sysvar
///   9. `[]` Token program
pub struct RedeemReserveCollateral<'a> {
    pub source_collateral: &'a AccountInfo,
    pub destination_liquidity: &'a AccountInfo,
    pub reserve: &'a AccountInfo,
    pub reserve_collateral_mint: &'a AccountInfo,
    pub reserve_liquidity_supply: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub user_transfer_authority: &'a AccountInfo,
    pub clock_sysvar: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub collateral_amount: u64,
}

impl<'a> RedeemReserveCollateral<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> Result<[AccountMeta<'a>; 10], ProgramError> {
        check_token_program(self.token_program)?;

        Ok([
            AccountMeta::writable(self.source_collateral.key()),
            AccountMeta::writable(self.destination_liquidity.key()),
            AccountMeta::writable(self.reserve.key()),
            AccountMeta::writable(self.reserve_collateral_mint.key()),
            AccountMeta::writable(self.reserve_liquidity_supply.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.user_transfer_authority.key()),
            AccountMeta::readonly(self.clock_sysvar.key()),
            AccountMeta::readonly(self.token_program.key()),
        ])
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas()?;

        let data = LendingInstruction::RedeemReserveCollateral {
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
                self.destination_liquidity,
                self.reserve,
                self.reserve_collateral_mint,
                self.reserve_liquidity_supply,
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

/// Replace a reserve's config. Only the lending market owner may do this.
///
/// ### Accounts:
///   0. `[WRITE]` Reserve account
///   1. `[]` Lending market
///   2. `[]` Lending market authority
///   3. `[SIGNER]` Lending market owner
///   4. `[]` Pyth product account
///   5. `[]` Pyth price account
///   6. `[]` Switchboard feed account
pub struct UpdateReserveConfig<'a> {
    pub reserve: &'a AccountInfo,
    pub lending_market: &'a AccountInfo,
    pub lending_market_authority: &'a AccountInfo,
    pub lending_market_owner: &'a AccountInfo,
    pub pyth_product: &'a AccountInfo,
    pub pyth_price: &'a AccountInfo,
    pub switchboard_feed: &'a AccountInfo,
    pub config: ReserveConfig,
}

impl<'a> UpdateReserveConfig<'a> {
    #[inline(always)]
    pub fn invoke(&self) -> ProgramResult {
        self.invoke_signed(&[])
    }

    pub fn account_metas(&self) -> [AccountMeta<'a>; 7] {
        [
            AccountMeta::writable(self.reserve.key()),
            AccountMeta::readonly(self.lending_market.key()),
            AccountMeta::readonly(self.lending_market_authority.key()),
            AccountMeta::readonly_signer(self.lending_market_owner.key()),
            AccountMeta::readonly(self.pyth_product.key()),
            AccountMeta::readonly(self.pyth_price.key()),
            AccountMeta::readonly(self.switchboard_feed.key()),
        ]
    }

    pub fn instruction_data(&self) -> Result<InstructionData, ProgramError> {
        self.config.validate()?;
        Ok(LendingInstruction::UpdateReserveConfig {
            config: self.config,
        }
        .pack())
    }

    pub fn invoke_signed(&self, signers: &[Signer]) -> ProgramResult {
        let account_metas = self.account_metas();
        let data = self.instruction_data()?;

        let instruction = Instruction {
            program_id: &ID,
            accounts: &account_metas,
            data: data.as_slice(),
        };

        invoke_signed(
            &instruction,
            &[
                self.reserve,
                self.lending_market,
                self.lending_market_authority,
                self.lending_market_owner,
                self.pyth_product,
                self.pyth_price,
                self.switchboard_feed,
            ],
            signers,
        )
    }
}
