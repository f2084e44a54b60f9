pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::query::ExpenseQuery;
use anyhow::Result;
use tracing::{debug, info};

/// Commands that read a ledger and render a view of it.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Balances { json: bool },
    Expenses(ExpenseQuery),
    Friends,
    Check,
}

pub fn run_command(command: AppCommand, ledger_path: Option<&str>) -> Result<()> {
    info!("Splitbook starting...");

    let config = match ledger_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded ledger: {config:#?}");

    match command {
        AppCommand::Balances { json } => cli::balances::run(&config, json),
        AppCommand::Expenses(query) => cli::expenses::run(&config, &query),
        AppCommand::Friends => cli::friends::run(&config),
        AppCommand::Check => cli::check::run(&config),
    }
}
