//! orgscan - GitHub organization inventory reporter

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod report;

use cli::Cli;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(&cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug {
        "warn,orgscan=debug"
    } else {
        "warn,orgscan=info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    cli::analyze::run(cli).await
}
