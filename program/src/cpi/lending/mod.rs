//! Token-lending program CPI.
//!
//! Every instruction is a struct of account references plus its scalar
//! arguments. `invoke` calls the lending program directly, `invoke_signed`
//! passes PDA signer seeds through. Instruction data is packed into a stack
//! buffer, so nothing here allocates.

use pinocchio::{
    account_info::AccountInfo, instruction::AccountMeta, program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::error::{to_program_error, ExampleError};

pub mod flash_loan;
pub mod market;
pub mod obligation;
pub mod reserve;

pub use flash_loan::*;
pub use market::*;
pub use obligation::*;
pub use reserve::*;

pinocchio_pubkey::declare_id!("So1endDq2YkqhipRh3WViPa8hdiSpxWy6z3Z6tMCpAo");

/// Upper bound on deposits + borrows tracked by one obligation.
pub const MAX_OBLIGATION_RESERVES: usize = 10;
/// Upper bound on extra accounts forwarded to a flash loan receiver.
pub const MAX_FLASH_LOAN_RECEIVER_ACCOUNTS: usize = 16;

/// 1e18, the fixed-point scale of the fee fields.
pub const WAD: u64 = 1_000_000_000_000_000_000;

pub const RESERVE_CONFIG_LEN: usize = 72;
/// Longest packed instruction: tag + liquidity amount + reserve config.
pub const MAX_INSTRUCTION_DATA_LEN: usize = 1 + 8 + RESERVE_CONFIG_LEN;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReserveFees {
    /// Fee assessed on borrows, as a WAD fraction
    pub borrow_fee_wad: u64,
    /// Fee assessed on flash loans, as a WAD fraction
    pub flash_loan_fee_wad: u64,
    /// Share of the borrow fee paid to the host fee receiver, as a percentage
    pub host_fee_percentage: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReserveConfig {
    /// Optimal utilization rate, as a percentage
    pub optimal_utilization_rate: u8,
    /// Target ratio of the value of borrows to deposits, as a percentage.
    /// 0 if use as collateral is disabled
    pub loan_to_value_ratio: u8,
    /// Bonus a liquidator gets when repaying part of an unhealthy obligation, as a percentage
    pub liquidation_bonus: u8,
    /// Loan to value ratio at which an obligation can be liquidated, as a percentage
    pub liquidation_threshold: u8,
    /// Min borrow APY
    pub min_borrow_rate: u8,
    /// Optimal (utilization) borrow APY
    pub optimal_borrow_rate: u8,
    /// Max borrow APY
    pub max_borrow_rate: u8,
    /// Program owner fees assessed, separate from gains due to interest accrual
    pub fees: ReserveFees,
    /// Maximum deposit limit of liquidity in native units, u64::MAX for inf
    pub deposit_limit: u64,
    /// Borrows disabled
    pub borrow_limit: u64,
    pub fee_receiver: Pubkey,
}

impl ReserveConfig {
    /// Same bounds the lending program enforces, checked before paying for a CPI.
    pub fn validate(&self) -> Result<(), ProgramError> {
        let invalid = self.optimal_utilization_rate > 100
            || self.loan_to_value_ratio >= 100
            || self.liquidation_bonus > 100
            || self.liquidation_threshold <= self.loan_to_value_ratio
            || self.liquidation_threshold > 100
            || self.optimal_borrow_rate < self.min_borrow_rate
            || self.optimal_borrow_rate > self.max_borrow_rate
            || self.fees.borrow_fee_wad >= WAD
            || self.fees.flash_loan_fee_wad >= WAD
            || self.fees.host_fee_percentage > 100;

        if invalid {
            return Err(to_program_error(ExampleError::InvalidReserveConfig));
        }
        Ok(())
    }

    pub fn pack_into(&self, dst: &mut [u8; RESERVE_CONFIG_LEN]) {
        dst[0] = self.optimal_utilization_rate;
        dst[1] = self.loan_to_value_ratio;
        dst[2] = self.liquidation_bonus;
        dst[3] = self.liquidation_threshold;
        dst[4] = self.min_borrow_rate;
        dst[5] = self.optimal_borrow_rate;
        dst[6] = self.max_borrow_rate;
        dst[7..15].copy_from_slice(&self.fees.borrow_fee_wad.to_le_bytes());
        dst[15..23].copy_from_slice(&self.fees.flash_loan_fee_wad.to_le_bytes());
        dst[23] = self.fees.host_fee_percentage;
        dst[24..32].copy_from_slice(&self.deposit_limit.to_le_bytes());
        dst[32..40].copy_from_slice(&self.borrow_limit.to_le_bytes());
        dst[40..72].copy_from_slice(&self.fee_receiver);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LendingInstruction {
    InitLendingMarket { owner: Pubkey, quote_currency: [u8; 32] },
    SetLendingMarketOwner { new_owner: Pubkey },
    InitReserve { liquidity_amount: u64, config: ReserveConfig },
    RefreshReserve,
    DepositReserveLiquidity { liquidity_amount: u64 },
    RedeemReserveCollateral { collateral_amount: u64 },
    InitObligation,
    RefreshObligation,
    DepositObligationCollateral { collateral_amount: u64 },
    WithdrawObligationCollateral { collateral_amount: u64 },
    BorrowObligationLiquidity { liquidity_amount: u64 },
    RepayObligationLiquidity { liquidity_amount: u64 },
    LiquidateObligation { liquidity_amount: u64 },
    FlashLoan { amount: u64 },
    DepositReserveLiquidityAndObligationCollateral { liquidity_amount: u64 },
    UpdateReserveConfig { config: ReserveConfig },
}

/// Packed instruction bytes. Only `as_slice()` is meaningful.
pub struct InstructionData {
    buf: [u8; MAX_INSTRUCTION_DATA_LEN],
    len: usize,
}

impl InstructionData {
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Metas of an instruction whose account count varies up to `N`.
pub struct AccountMetas<'a, const N: usize> {
    metas: [AccountMeta<'a>; N],
    len: usize,
}

impl<'a, const N: usize> AccountMetas<'a, N> {
    /// `len` must not exceed `N`; entries past it are padding.
    #[inline(always)]
    pub(crate) fn new(metas: [AccountMeta<'a>; N], len: usize) -> Self {
        Self { metas, len }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[AccountMeta<'a>] {
        &self.metas[..self.len]
    }
}

impl LendingInstruction {
    pub const fn tag(&self) -> u8 {
        match self {
            LendingInstruction::InitLendingMarket { .. } => 0,
            LendingInstruction::SetLendingMarketOwner { .. } => 1,
            LendingInstruction::InitReserve { .. } => 2,
            LendingInstruction::RefreshReserve => 3,
            LendingInstruction::DepositReserveLiquidity { .. } => 4,
            LendingInstruction::RedeemReserveCollateral { .. } => 5,
            LendingInstruction::InitObligation => 6,
            LendingInstruction::RefreshObligation => 7,
            LendingInstruction::DepositObligationCollateral { .. } => 8,
            LendingInstruction::WithdrawObligationCollateral { .. } => 9,
            LendingInstruction::BorrowObligationLiquidity { .. } => 10,
            LendingInstruction::RepayObligationLiquidity { .. } => 11,
            LendingInstruction::LiquidateObligation { .. } => 12,
            LendingInstruction::FlashLoan { .. } => 13,
            LendingInstruction::DepositReserveLiquidityAndObligationCollateral { .. } => 14,
            // 15 (withdraw + redeem) is not wrapped here
            LendingInstruction::UpdateReserveConfig { .. } => 16,
        }
    }

    pub fn pack(&self) -> InstructionData {
        let mut buf = [0u8; MAX_INSTRUCTION_DATA_LEN];
        buf[0] = self.tag();

        let len = match self {
            LendingInstruction::InitLendingMarket { owner, quote_currency } => {
                buf[1..33].copy_from_slice(owner);
                buf[33..65].copy_from_slice(quote_currency);
                65
            }
            LendingInstruction::SetLendingMarketOwner { new_owner } => {
                buf[1..33].copy_from_slice(new_owner);
                33
            }
            LendingInstruction::InitReserve { liquidity_amount, config } => {
                buf[1..9].copy_from_slice(&liquidity_amount.to_le_bytes());
                let mut packed = [0u8; RESERVE_CONFIG_LEN];
                config.pack_into(&mut packed);
                buf[9..9 + RESERVE_CONFIG_LEN].copy_from_slice(&packed);
                9 + RESERVE_CONFIG_LEN
            }
            LendingInstruction::UpdateReserveConfig { config } => {
                let mut packed = [0u8; RESERVE_CONFIG_LEN];
                config.pack_into(&mut packed);
                buf[1..1 + RESERVE_CONFIG_LEN].copy_from_slice(&packed);
                1 + RESERVE_CONFIG_LEN
            }
            LendingInstruction::RefreshReserve
            | LendingInstruction::InitObligation
            | LendingInstruction::RefreshObligation => 1,
            LendingInstruction::DepositReserveLiquidity { liquidity_amount }
            | LendingInstruction::BorrowObligationLiquidity { liquidity_amount }
            | LendingInstruction::RepayObligationLiquidity { liquidity_amount }
            | LendingInstruction::LiquidateObligation { liquidity_amount }
            | LendingInstruction::DepositReserveLiquidityAndObligationCollateral {
                liquidity_amount,
            } => {
                buf[1..9].copy_from_slice(&liquidity_amount.to_le_bytes());
                9
            }
            LendingInstruction::RedeemReserveCollateral { collateral_amount }
            | LendingInstruction::DepositObligationCollateral { collateral_amount }
            | LendingInstruction::WithdrawObligationCollateral { collateral_amount } => {
                buf[1..9].copy_from_slice(&collateral_amount.to_le_bytes());
                9
            }
            LendingInstruction::FlashLoan { amount } => {
                buf[1..9].copy_from_slice(&amount.to_le_bytes());
                9
            }
        };

        InstructionData { buf, len }
    }
}

#[inline(always)]
pub fn check_lending_program(account: &AccountInfo) -> Result<(), ProgramError> {
    if account.key() != &ID {
        return Err(to_program_error(ExampleError::InvalidLendingProgram));
    }
    Ok(())
}

#[inline(always)]
pub(crate) fn check_token_program(account: &AccountInfo) -> Result<(), ProgramError> {
    if account.key() != &pinocchio_token::ID {
        return Err(to_program_error(ExampleError::InvalidTokenProgram));
    }
    Ok(())
}
