use super::ui;
use crate::core::balance::{self, Balance};
use crate::core::config::AppConfig;
use crate::core::ledger::{Ledger, ParticipantId};
use crate::core::settlement::{self, Settlement};
use anyhow::{Context, Result};
use comfy_table::Cell;
use serde::Serialize;
use tracing::info;

/// Balances and the settlements that clear them, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct BalanceReport {
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,
}

impl BalanceReport {
    pub fn from_ledger(ledger: &Ledger) -> Result<Self> {
        let mut balances = balance::compute_balances(&ledger.expenses, &ledger.participants)
            .context("Failed to compute balances")?;
        // Settlements are planned from the sorted list so that ties resolve
        // the same way as in the printed table.
        balance::sort_for_display(&mut balances);
        let settlements =
            settlement::compute_settlements(&balances).context("Failed to plan settlements")?;
        Ok(BalanceReport {
            balances,
            settlements,
        })
    }
}

/// Phrases a balance for display. Balances of the current user are written
/// in the second person; everyone else is described in the third person.
pub fn describe_balance(
    balance: &Balance,
    current_user: Option<&ParticipantId>,
    currency: &str,
) -> String {
    let amount = ui::format_amount(balance.amount, currency);
    let is_you = current_user == Some(&balance.participant);
    match (is_you, balance.amount > 0.0) {
        (true, true) => format!("You are owed {amount}"),
        (true, false) => format!("You owe {amount}"),
        (false, true) => format!("Is owed {amount}"),
        (false, false) => format!("Owes {amount}"),
    }
}

pub fn run(config: &AppConfig, as_json: bool) -> Result<()> {
    let report = BalanceReport::from_ledger(&config.ledger)?;
    info!(
        balances = report.balances.len(),
        settlements = report.settlements.len(),
        "Computed balance report"
    );

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{}", ui::style_text("Current Balances", ui::StyleType::Title));
    if report.balances.is_empty() {
        println!(
            "{}",
            ui::style_text(
                "All expenses are settled! No balances to show.",
                ui::StyleType::Subtle
            )
        );
    } else {
        display_balances(config, &report.balances);
    }

    ui::print_separator();

    println!(
        "\n{}",
        ui::style_text("Suggested Settlements", ui::StyleType::Title)
    );
    if report.settlements.is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No settlements needed! All balances are settled.",
                ui::StyleType::Subtle
            )
        );
    } else {
        display_settlements(config, &report.settlements);
    }

    Ok(())
}

fn display_balances(config: &AppConfig, balances: &[Balance]) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Balance"),
        ui::header_cell("Status"),
    ]);

    for balance in balances {
        table.add_row(vec![
            Cell::new(config.ledger.participant_name(&balance.participant)),
            ui::balance_cell(balance.amount, &config.currency),
            Cell::new(describe_balance(
                balance,
                config.current_user.as_ref(),
                &config.currency,
            )),
        ]);
    }

    println!("{table}");
}

fn display_settlements(config: &AppConfig, settlements: &[Settlement]) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell(""),
        ui::header_cell("To"),
        ui::header_cell("Amount"),
    ]);

    for settlement in settlements {
        table.add_row(vec![
            Cell::new(config.ledger.participant_name(&settlement.from)),
            Cell::new("→"),
            Cell::new(config.ledger.participant_name(&settlement.to)),
            ui::amount_cell(settlement.amount, &config.currency),
        ]);
    }

    println!("{table}");
}
