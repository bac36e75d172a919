pub mod login;
pub mod logout;

use crate::cli::{Cli, Command};
use crate::error::NimbusError;

use cloud_client::CloudConfig;

/// Read configuration once and dispatch the parsed subcommand.
pub async fn run(cli: Cli) -> Result<(), NimbusError> {
    let config = CloudConfig::from_env()?;

    match cli.command {
        Command::Login(args) => login::run(&config, &args).await,
        Command::Logout(args) => logout::run(&config, &args),
    }
}
