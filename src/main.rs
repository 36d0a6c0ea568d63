//! ctscan - run CodeThreat scans from CI and gate the build on the results

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod pipeline;
mod publish;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Scan(args) => cli::scan::run(&opts, &args).await,
        Commands::Status {
            scan_id,
            connection,
        } => cli::status::run(&opts, &scan_id, &connection).await,
        Commands::Policy { failed_args } => cli::policy::run(&opts, &failed_args),
        Commands::Version => {
            println!("ctscan version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
