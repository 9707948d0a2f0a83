// Host-only: packing and config checks, no SBF artifact needed.
use example_program::cpi::lending::{
    LendingInstruction, ReserveConfig, ReserveFees, RESERVE_CONFIG_LEN, WAD,
};
use example_program::error::ExampleError;
use pinocchio::program_error::ProgramError;
use test_case::test_case;

fn sample_config() -> ReserveConfig {
    ReserveConfig {
        optimal_utilization_rate: 80,
        loan_to_value_ratio: 50,
        liquidation_bonus: 5,
        liquidation_threshold: 55,
        min_borrow_rate: 0,
        optimal_borrow_rate: 4,
        max_borrow_rate: 30,
        fees: ReserveFees {
            borrow_fee_wad: 100_000_000_000_000,
            flash_loan_fee_wad: 3_000_000_000_000_000,
            host_fee_percentage: 20,
        },
        deposit_limit: u64::MAX,
        borrow_limit: 1_000_000,
        fee_receiver: [9u8; 32],
    }
}

#[test_case(LendingInstruction::RefreshReserve, 3 ; "refresh reserve")]
#[test_case(LendingInstruction::InitObligation, 6 ; "init obligation")]
#[test_case(LendingInstruction::RefreshObligation, 7 ; "refresh obligation")]
fn argless_instructions_are_a_single_tag(ix: LendingInstruction, tag: u8) {
    assert_eq!(ix.pack().as_slice(), &[tag]);
}

#[test_case(LendingInstruction::DepositReserveLiquidity { liquidity_amount: 42 }, 4 ; "deposit reserve liquidity")]
#[test_case(LendingInstruction::RedeemReserveCollateral { collateral_amount: 42 }, 5 ; "redeem reserve collateral")]
#[test_case(LendingInstruction::DepositObligationCollateral { collateral_amount: 42 }, 8 ; "deposit obligation collateral")]
#[test_case(LendingInstruction::WithdrawObligationCollateral { collateral_amount: 42 }, 9 ; "withdraw obligation collateral")]
#[test_case(LendingInstruction::BorrowObligationLiquidity { liquidity_amount: 42 }, 10 ; "borrow")]
#[test_case(LendingInstruction::RepayObligationLiquidity { liquidity_amount: 42 }, 11 ; "repay")]
#[test_case(LendingInstruction::LiquidateObligation { liquidity_amount: 42 }, 12 ; "liquidate")]
#[test_case(LendingInstruction::FlashLoan { amount: 42 }, 13 ; "flash loan")]
#[test_case(LendingInstruction::DepositReserveLiquidityAndObligationCollateral { liquidity_amount: 42 }, 14 ; "deposit and collateralize")]
fn amount_instructions_carry_le_u64(ix: LendingInstruction, tag: u8) {
    let mut expected = vec![tag];
    expected.extend_from_slice(&42u64.to_le_bytes());
    assert_eq!(ix.pack().as_slice(), expected.as_slice());
}

#[test]
fn init_lending_market_packs_owner_then_quote_currency() {
    let owner = [1u8; 32];
    let mut quote_currency = [0u8; 32];
    quote_currency[..3].copy_from_slice(b"USD");

    let data = LendingInstruction::InitLendingMarket { owner, quote_currency }.pack();
    let bytes = data.as_slice();

    assert_eq!(bytes.len(), 65);
    assert_eq!(bytes[0], 0);
    assert_eq!(&bytes[1..33], &owner);
    assert_eq!(&bytes[33..65], &quote_currency);
}

#[test]
fn set_lending_market_owner_packs_new_owner() {
    let new_owner = [3u8; 32];
    let data = LendingInstruction::SetLendingMarketOwner { new_owner }.pack();
    assert_eq!(data.as_slice()[0], 1);
    assert_eq!(&data.as_slice()[1..], &new_owner);
}

#[test]
fn reserve_config_layout() {
    let config = sample_config();
    let mut packed = [0u8; RESERVE_CONFIG_LEN];
    config.pack_into(&mut packed);

    assert_eq!(&packed[..7], &[80, 50, 5, 55, 0, 4, 30]);
    assert_eq!(&packed[7..15], &100_000_000_000_000u64.to_le_bytes());
    assert_eq!(&packed[15..23], &3_000_000_000_000_000u64.to_le_bytes());
    assert_eq!(packed[23], 20);
    assert_eq!(&packed[24..32], &u64::MAX.to_le_bytes());
    assert_eq!(&packed[32..40], &1_000_000u64.to_le_bytes());
    assert_eq!(&packed[40..], &[9u8; 32]);
}

#[test]
fn init_reserve_is_amount_then_config() {
    let config = sample_config();
    let data = LendingInstruction::InitReserve { liquidity_amount: 1_000, config }.pack();
    let bytes = data.as_slice();

    let mut packed = [0u8; RESERVE_CONFIG_LEN];
    config.pack_into(&mut packed);

    assert_eq!(bytes.len(), 1 + 8 + RESERVE_CONFIG_LEN);
    assert_eq!(bytes[0], 2);
    assert_eq!(&bytes[1..9], &1_000u64.to_le_bytes());
    assert_eq!(&bytes[9..], &packed);
}

#[test]
fn update_reserve_config_uses_tag_sixteen() {
    let data = LendingInstruction::UpdateReserveConfig { config: sample_config() }.pack();
    assert_eq!(data.as_slice()[0], 16);
    assert_eq!(data.as_slice().len(), 1 + RESERVE_CONFIG_LEN);
}

#[test]
fn sample_config_is_valid() {
    assert!(sample_config().validate().is_ok());
}

#[test_case(|c: &mut ReserveConfig| c.optimal_utilization_rate = 101 ; "utilization over 100")]
#[test_case(|c: &mut ReserveConfig| c.loan_to_value_ratio = 100 ; "ltv at 100")]
#[test_case(|c: &mut ReserveConfig| c.liquidation_bonus = 101 ; "bonus over 100")]
#[test_case(|c: &mut ReserveConfig| c.liquidation_threshold = c.loan_to_value_ratio ; "threshold not above ltv")]
#[test_case(|c: &mut ReserveConfig| { c.loan_to_value_ratio = 90; c.liquidation_threshold = 101 } ; "threshold over 100")]
#[test_case(|c: &mut ReserveConfig| c.min_borrow_rate = 5 ; "min above optimal")]
#[test_case(|c: &mut ReserveConfig| c.max_borrow_rate = 3 ; "max below optimal")]
#[test_case(|c: &mut ReserveConfig| c.fees.borrow_fee_wad = WAD ; "borrow fee at one")]
#[test_case(|c: &mut ReserveConfig| c.fees.flash_loan_fee_wad = WAD ; "flash loan fee at one")]
#[test_case(|c: &mut ReserveConfig| c.fees.host_fee_percentage = 101 ; "host fee over 100")]
fn invalid_reserve_configs_are_rejected(tweak: fn(&mut ReserveConfig)) {
    let mut config = sample_config();
    tweak(&mut config);
    assert_eq!(config.validate(), Err(ProgramError::Custom(ExampleError::InvalidReserveConfig.code())));
}
