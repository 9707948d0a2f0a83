mod common;
use common::*;

#[tokio::test]
async fn initialize_accepts_empty_args() {
    let mut ctx = program_test().start_with_context().await;

    let res = process(&mut ctx, &[ixn::initialize(&[])], &[]).await;
    assert!(res.is_ok(), "Initialize should succeed: {:?}", res);
}

#[tokio::test]
async fn initialize_logs_greeting() {
    let mut ctx = program_test().start_with_context().await;

    let tx = Transaction::new_signed_with_payer(
        &[ixn::initialize(&[])],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer],
        ctx.last_blockhash,
    );
    let sim = ctx.banks_client.simulate_transaction(tx).await.unwrap();
    let logs = sim.simulation_details.expect("simulation details").logs;

    assert!(logs.iter().any(|l| l.contains("Instruction: Initialize")), "{:?}", logs);
    assert!(logs.iter().any(|l| l.contains("Greetings from:")), "{:?}", logs);
    assert!(logs.iter().any(|l| l.contains(&program_id().to_string())), "{:?}", logs);
}

#[tokio::test]
async fn initialize_ignores_extra_accounts() {
    let mut ctx = program_test().start_with_context().await;

    let extra = [Pubkey::new_unique(), Pubkey::new_unique()];
    let res = process(&mut ctx, &[ixn::initialize(&extra)], &[]).await;
    assert!(res.is_ok(), "extra accounts must not matter: {:?}", res);
}

#[tokio::test]
async fn initialize_rejects_payload() {
    let mut ctx = program_test().start_with_context().await;

    let mut ix = ixn::initialize(&[]);
    ix.data.push(7);
    let res = process(&mut ctx, &[ix], &[]).await;
    assert_instruction_error(res, InstructionError::InvalidInstructionData);
}

#[tokio::test]
async fn unknown_discriminator_is_rejected() {
    let mut ctx = program_test().start_with_context().await;

    let ix = Instruction { program_id: program_id(), accounts: vec![], data: vec![42] };
    let res = process(&mut ctx, &[ix], &[]).await;
    assert_instruction_error(res, InstructionError::InvalidInstructionData);
}

#[tokio::test]
async fn empty_instruction_data_is_rejected() {
    let mut ctx = program_test().start_with_context().await;

    let ix = Instruction { program_id: program_id(), accounts: vec![], data: vec![] };
    let res = process(&mut ctx, &[ix], &[]).await;
    assert_instruction_error(res, InstructionError::InvalidInstructionData);
}
