use super::ui;
use crate::core::balance;
use crate::core::config::AppConfig;
use crate::core::settlement::{self, SETTLEMENT_TOLERANCE};
use crate::core::{compute_balances, compute_settlements};
use anyhow::{Context, Result, bail};
use comfy_table::Cell;
use tracing::warn;

/// Reports expenses whose shares do not add up to their total and verifies
/// that the suggested settlements clear every balance.
pub fn run(config: &AppConfig) -> Result<()> {
    let ledger = &config.ledger;
    let drifting = ledger.drifting_expenses(SETTLEMENT_TOLERANCE);

    if drifting.is_empty() {
        println!(
            "{}",
            ui::style_text("All expense shares add up.", ui::StyleType::Positive)
        );
    } else {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Expense"),
            ui::header_cell("Total"),
            ui::header_cell("Unallocated"),
        ]);
        for (expense, drift) in &drifting {
            warn!(id = %expense.id, drift, "Shares do not add up to the expense total");
            table.add_row(vec![
                Cell::new(&expense.description),
                ui::amount_cell(expense.amount, &config.currency),
                ui::balance_cell(*drift, &config.currency),
            ]);
        }
        println!(
            "{}",
            ui::style_text(
                &format!("{} expense(s) with mismatched shares:", drifting.len()),
                ui::StyleType::Negative
            )
        );
        println!("{table}");
    }

    let mut balances = compute_balances(&ledger.expenses, &ledger.participants)
        .context("Failed to compute balances")?;
    balance::sort_for_display(&mut balances);
    let settlements = compute_settlements(&balances).context("Failed to plan settlements")?;
    let leftover: Vec<_> = settlement::apply_settlements(&balances, &settlements)
        .into_iter()
        .filter(|b| !settlement::is_settled(b.amount))
        .collect();

    if !leftover.is_empty() {
        for balance in &leftover {
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "{} is left with {}",
                        ledger.participant_name(&balance.participant),
                        ui::format_amount(balance.amount, &config.currency)
                    ),
                    ui::StyleType::Error
                )
            );
        }
        bail!("Settlements leave {} balance(s) open", leftover.len());
    }

    println!(
        "{}",
        ui::style_text(
            &format!("{} settlement(s) clear every balance.", settlements.len()),
            ui::StyleType::Positive
        )
    );
    Ok(())
}
