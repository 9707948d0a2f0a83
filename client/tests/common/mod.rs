use std::{env, path::Path, sync::Arc};

use example_client::{Provider, Workspace};
use solana_program_test::ProgramTest;
use solana_sdk::pubkey::Pubkey;

pub fn workspace_root() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/.."))
}

/// Bank with the SBF build of `example_program` at its declared id.
pub async fn local_provider() -> Arc<Provider> {
    let deploy_dir = workspace_root().join("target").join("deploy");
    env::set_var("BPF_OUT_DIR", &deploy_dir);
    let so_path = deploy_dir.join("example_program.so");
    assert!(
        so_path.exists(),
        "SBF artifact not found at {}.\nBuild first: `cargo-build-sbf --no-default-features --features sbf --manifest-path program/Cargo.toml`",
        so_path.display()
    );

    let mut pt = ProgramTest::default();
    pt.prefer_bpf(true);
    pt.add_upgradeable_program_to_genesis(
        "example_program",
        &Pubkey::new_from_array(example_program::ID),
    );
    let (banks_client, payer, _) = pt.start().await;
    Arc::new(Provider::local(banks_client, payer))
}

pub fn workspace() -> Workspace {
    Workspace::load(workspace_root()).unwrap()
}
