use std::{env, process::ExitCode, sync::Arc};

use clap::Parser;
use example_client::{
    config::PROVIDER_URL_ENV,
    logging::{init_json_logger, init_logger},
    smoke, Provider, Result, Workspace,
};
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "example-smoke")]
#[command(about = "Call `initialize` on the example program and print the signature")]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as line-delimited JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if args.json {
        init_json_logger(args.verbose);
    } else {
        init_logger(args.verbose);
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("smoke test failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let workspace = Workspace::discover(&env::current_dir()?)?;

    let provider = if env::var_os(PROVIDER_URL_ENV).is_some() {
        Provider::env()?
    } else {
        warn!("{PROVIDER_URL_ENV} is not set, using the workspace [provider] section");
        Provider::from_config(&workspace.provider_config()?)?
    };

    smoke::run(Arc::new(provider), &workspace).await?;
    Ok(())
}
