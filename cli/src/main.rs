mod account;
mod cli;
mod commands;
mod config;
mod error;
mod store;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        ui::error(err.to_string());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Deploy(args) => commands::deploy::run(args),
        Commands::Fund(args) => commands::fund::run(args),
        Commands::Purchase(args) => commands::purchase::run(args),
        Commands::Withdraw(args) => commands::withdraw::run(args),
        Commands::Call(args) => commands::call::run(args),
        Commands::State(args) => commands::state::run(args),
        Commands::Balance(args) => commands::balance::run(args),
        Commands::Events(args) => commands::events::run(args),
        Commands::Schema(args) => commands::schema::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
