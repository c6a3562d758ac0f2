use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "termchat", about = "Terminal chat client over a NATS bus")]
pub struct Cli {
    /// Path to config file (default: ./termchat.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bus server URL, overrides config and NATS_URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Display name, overrides config and CHAT_NAME
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Join the chat (default)
    Run,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
