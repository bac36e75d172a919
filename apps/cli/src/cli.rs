use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

#[derive(Debug, Parser)]
#[command(name = "nimbus")]
#[command(about = "Command-line client for the nimbus control plane", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify an access token and store it for later commands
    Login(CloudUrlArgs),
    /// Forget the stored access token
    Logout(CloudUrlArgs),
}

#[derive(Debug, Args)]
pub struct CloudUrlArgs {
    /// Cloud URL to use instead of NIMBUS_API or the default
    #[arg(short = 'c', long = "cloud-url", value_name = "URL")]
    pub cloud_url: Option<String>,
}

impl CloudUrlArgs {
    /// The explicit URL if given, otherwise the configured one.
    pub fn resolve_or<'a>(&'a self, configured: &'a str) -> &'a str {
        self.cloud_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(configured)
    }
}
