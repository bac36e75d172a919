use nimbus::cli::Cli;
use nimbus::commands;
use nimbus::env::try_load_dotenv;
use nimbus::logger::initialize as LoggerInitialize;

use std::process::ExitCode;

use clap::Parser;
use log::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggerInitialize(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    try_load_dotenv();
    debug!("Running {:?}", cli.command);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
