use solana_program_test::ProgramTest;
use std::{env, path::Path};

pub use solana_program_test::{BanksClient, ProgramTestContext};
pub use solana_sdk::{
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

pub fn program_id() -> Pubkey {
    Pubkey::new_from_array(example_program::ID)
}

pub fn lending_program_id() -> Pubkey {
    Pubkey::new_from_array(example_program::cpi::lending::ID)
}

pub fn program_test() -> ProgramTest {
    // cargo-build-sbf writes to the workspace target dir, one level above this crate
    let deploy_dir = format!("{}/../target/deploy", env!("CARGO_MANIFEST_DIR"));
    env::set_var("BPF_OUT_DIR", &deploy_dir);
    let so_path = Path::new(&deploy_dir).join("example_program.so");
    assert!(
        so_path.exists(),
        "SBF artifact not found at {}.\nBuild first: `cargo-build-sbf --no-default-features --features sbf --manifest-path program/Cargo.toml`",
        so_path.display()
    );

    let mut pt = ProgramTest::default();
    pt.prefer_bpf(true);
    pt.add_upgradeable_program_to_genesis("example_program", &program_id());
    pt
}

/// Sign with the payer plus `signers` and run it through the bank.
pub async fn process(
    ctx: &mut ProgramTestContext,
    ixs: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), TransactionError> {
    let mut all: Vec<&Keypair> = Vec::with_capacity(signers.len() + 1);
    all.push(&ctx.payer);
    all.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(
        ixs,
        Some(&ctx.payer.pubkey()),
        &all,
        ctx.last_blockhash,
    );
    ctx.banks_client
        .process_transaction(tx)
        .await
        .map_err(|e| e.unwrap())
}

pub fn assert_instruction_error(res: Result<(), TransactionError>, expected: InstructionError) {
    match res {
        Err(TransactionError::InstructionError(0, err)) => assert_eq!(err, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

// Raw instruction builders, mirroring the on-chain account order
pub mod ixn {
    use super::*;

    pub fn initialize(extra: &[Pubkey]) -> Instruction {
        Instruction {
            program_id: program_id(),
            accounts: extra.iter().map(|k| AccountMeta::new_readonly(*k, false)).collect(),
            data: vec![0],
        }
    }

    pub fn refresh_reserve(
        lending_program: &Pubkey,
        reserve: &Pubkey,
        pyth_price: &Pubkey,
        switchboard_feed: &Pubkey,
    ) -> Instruction {
        Instruction {
            program_id: program_id(),
            accounts: vec![
                AccountMeta::new_readonly(*lending_program, false),
                AccountMeta::new(*reserve, false),
                AccountMeta::new_readonly(*pyth_price, false),
                AccountMeta::new_readonly(*switchboard_feed, false),
                AccountMeta::new_readonly(solana_sdk::sysvar::clock::id(), false),
            ],
            data: vec![1],
        }
    }

    pub fn refresh_obligation(
        lending_program: &Pubkey,
        obligation: &Pubkey,
        reserves: &[Pubkey],
    ) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new_readonly(*lending_program, false),
            AccountMeta::new(*obligation, false),
            AccountMeta::new_readonly(solana_sdk::sysvar::clock::id(), false),
        ];
        accounts.extend(reserves.iter().map(|k| AccountMeta::new_readonly(*k, false)));
        Instruction {
            program_id: program_id(),
            accounts,
            data: vec![2],
        }
    }
}
