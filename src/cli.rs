use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::UserId;

#[derive(Debug, Parser)]
#[command(name = "qhchat", about = "QuickHire terminal chat client")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Act as this QuickHire user; overrides the config file
    #[arg(short, long, global = true)]
    pub user_id: Option<UserId>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the chat shell
    Run,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
