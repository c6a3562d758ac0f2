mod app;
mod bus;
mod cli;
mod domain;
mod infra;
mod ui;
mod usecases;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    infra::panic_hook::install_terminal_restore_hook();

    let cli = cli::Cli::parse();
    app::run(cli)
}
