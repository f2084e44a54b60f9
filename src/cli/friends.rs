use super::ui;
use crate::core::balance;
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use comfy_table::Cell;

pub fn run(config: &AppConfig) -> Result<()> {
    if config.ledger.participants.is_empty() {
        println!("No friends yet.");
        return Ok(());
    }

    let balances = balance::compute_balances(&config.ledger.expenses, &config.ledger.participants)
        .context("Failed to compute balances")?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Email"),
        ui::header_cell("Balance"),
    ]);

    for participant in &config.ledger.participants {
        let mut name = participant.name.clone();
        if config.current_user.as_ref() == Some(&participant.id) {
            name.push_str(" (you)");
        }
        let email = participant
            .email
            .as_deref()
            .map_or_else(ui::na_cell, Cell::new);
        let amount = balances
            .iter()
            .find(|b| b.participant == participant.id)
            .map_or(0.0, |b| b.amount);
        table.add_row(vec![
            Cell::new(name),
            email,
            ui::balance_cell(amount, &config.currency),
        ]);
    }

    println!("{table}");
    Ok(())
}
