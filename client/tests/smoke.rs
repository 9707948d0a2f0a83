mod common;

use example_client::{
    example, smoke, ClientError, Example, InitializeArgs, Program,
};
use example_program::{cpi::lending::MAX_OBLIGATION_RESERVES, error::ExampleError};
use solana_banks_client::BanksClientError;
use solana_sdk::{
    instruction::{AccountMeta, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::TransactionError,
};

fn instruction_error(res: example_client::Result<example_client::TransactionReceipt>) -> InstructionError {
    match res {
        Err(ClientError::Banks(BanksClientError::TransactionError(
            TransactionError::InstructionError(0, err),
        ))) => err,
        other => panic!("expected an instruction error, got {:?}", other),
    }
}

#[tokio::test]
async fn smoke_run_returns_a_signature() {
    let provider = common::local_provider().await;
    let workspace = common::workspace();

    let receipt = smoke::run(provider, &workspace).await.unwrap();
    assert!(!receipt.to_string().is_empty());
}

#[tokio::test]
async fn rerunning_initialize_submits_a_new_transaction() {
    let provider = common::local_provider().await;
    let program = common::workspace().program::<Example>(provider).unwrap();

    let first = program.initialize(InitializeArgs::default()).await.unwrap();
    let second = program.initialize(InitializeArgs::default()).await.unwrap();
    assert_ne!(first, second);
}

#[test]
fn registry_resolves_the_declared_program_id() {
    let workspace = common::workspace();
    assert_eq!(
        workspace.program_id("Example").unwrap(),
        Pubkey::new_from_array(example_program::ID)
    );
}

#[tokio::test]
async fn handle_for_an_undeployed_address_fails() {
    let provider = common::local_provider().await;
    let program = Program::<Example>::new(Pubkey::new_unique(), provider);

    assert!(program.initialize(InitializeArgs::default()).await.is_err());
}

#[tokio::test]
async fn request_carries_an_extra_signer() {
    let provider = common::local_provider().await;
    let program = common::workspace().program::<Example>(provider).unwrap();
    let cosigner = Keypair::new();

    // initialize ignores its accounts, so a signing one is accepted as is
    let mut ix = example::initialize(program.id(), InitializeArgs::default()).unwrap();
    ix.accounts.push(AccountMeta::new_readonly(cosigner.pubkey(), true));

    let receipt = program.request().instruction(ix).signer(&cosigner).send().await;
    assert!(receipt.is_ok(), "{:?}", receipt);
}

#[tokio::test]
async fn refresh_obligation_over_reserve_cap_is_rejected() {
    let provider = common::local_provider().await;
    let program = common::workspace().program::<Example>(provider).unwrap();
    let reserves: Vec<Pubkey> = (0..MAX_OBLIGATION_RESERVES + 1)
        .map(|_| Pubkey::new_unique())
        .collect();

    let res = program.refresh_obligation(Pubkey::new_unique(), &reserves).await;
    assert_eq!(
        instruction_error(res),
        InstructionError::Custom(ExampleError::TooManyReserves.code())
    );
}

#[tokio::test]
async fn refresh_reserve_reaches_the_program() {
    let provider = common::local_provider().await;
    let program = common::workspace().program::<Example>(provider).unwrap();

    // the lending program is not loaded in the test bank, so the forwarded call fails
    let res = program
        .refresh_reserve(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique())
        .await;
    let err = instruction_error(res);
    assert_ne!(err, InstructionError::IncorrectProgramId);
    assert_ne!(err, InstructionError::NotEnoughAccountKeys);
}
