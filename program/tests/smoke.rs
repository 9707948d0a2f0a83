mod common;
use common::*;

#[tokio::test]
async fn smoke_initialize_twice_yields_independent_transactions() {
    // 1) Boot a test bank and load the SBF program via helper
    let mut ctx = program_test().start_with_context().await;

    // 2) Two initialize calls; the extra (ignored) account keeps the messages distinct
    let first = Transaction::new_signed_with_payer(
        &[ixn::initialize(&[])],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer],
        ctx.last_blockhash,
    );
    let second = Transaction::new_signed_with_payer(
        &[ixn::initialize(&[Pubkey::new_unique()])],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer],
        ctx.last_blockhash,
    );
    let (sig_a, sig_b) = (first.signatures[0], second.signatures[0]);

    ctx.banks_client.process_transaction(first).await.unwrap();
    ctx.banks_client.process_transaction(second).await.unwrap();

    // 3) Both landed and are distinct
    assert_ne!(sig_a, sig_b);
    for sig in [sig_a, sig_b] {
        let status = ctx.banks_client.get_transaction_status(sig).await.unwrap();
        assert!(status.is_some(), "transaction {} should be recorded", sig);
        println!("Your transaction signature {}", sig);
    }
}

#[tokio::test]
async fn smoke_wrong_program_id_is_rejected() {
    // The program only answers to its declared id
    let mut pt = program_test();
    let other = Pubkey::new_unique();
    pt.add_upgradeable_program_to_genesis("example_program", &other);
    let mut ctx = pt.start_with_context().await;

    let ix = Instruction { program_id: other, accounts: vec![], data: vec![0] };
    let res = process(&mut ctx, &[ix], &[]).await;
    assert_instruction_error(res, InstructionError::IncorrectProgramId);
}
