//! Daybook CLI - journal entries, to-dos and goals from the terminal
//!
//! Every command talks to the same backend as the web dashboard.

mod cli;
mod commands;
mod config_file;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use daybook_core::gateway::HttpGateway;
use daybook_core::DashboardSession;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::commands::canvas::run_canvas;
use crate::commands::config::run_config;
use crate::commands::entry::run_entry;
use crate::commands::goals::run_goals;
use crate::commands::todos::run_todos;
use crate::config_file::resolve_client_config;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daybook=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { global, command } = Cli::parse();

    match command {
        Commands::Entry { title, blocks } => {
            run_entry(&mut open_session(&global)?, &title, &blocks).await
        }
        Commands::Todos { command } => run_todos(&mut open_session(&global)?, command).await,
        Commands::Goals { command } => run_goals(&mut open_session(&global)?, command).await,
        Commands::Canvas { command } => run_canvas(&mut open_session(&global)?, command).await,
        Commands::Config { command } => run_config(command, &global),
    }
}

fn open_session(global: &GlobalArgs) -> Result<DashboardSession<HttpGateway>, CliError> {
    let config = resolve_client_config(global)?;
    let gateway = HttpGateway::from_config(&config)?;
    Ok(DashboardSession::new(gateway, config))
}
