use super::ui;
use crate::core::config::AppConfig;
use crate::core::ledger::ExpenseRecord;
use crate::core::query::{self, ExpenseQuery};
use anyhow::Result;
use comfy_table::{Cell, Color};

pub fn run(config: &AppConfig, expense_query: &ExpenseQuery) -> Result<()> {
    let expenses = query::filter_and_sort(&config.ledger, expense_query);
    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Description"),
        ui::header_cell("Paid By"),
        ui::header_cell("Amount"),
        ui::header_cell("Split Between"),
        ui::header_cell("Status"),
    ]);

    for expense in &expenses {
        table.add_row(vec![
            Cell::new(expense.date.format("%b %d, %Y")),
            Cell::new(&expense.description),
            Cell::new(config.ledger.participant_name(&expense.paid_by)),
            ui::amount_cell(expense.amount, &config.currency),
            split_cell(config, expense),
            status_cell(expense),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn split_cell(config: &AppConfig, expense: &ExpenseRecord) -> Cell {
    if expense.shares.is_empty() {
        return ui::na_cell();
    }
    let names: Vec<&str> = expense
        .shares
        .iter()
        .map(|s| config.ledger.participant_name(&s.participant))
        .collect();
    Cell::new(names.join(", "))
}

fn status_cell(expense: &ExpenseRecord) -> Cell {
    if expense.settled {
        Cell::new("Settled").fg(Color::DarkGrey)
    } else {
        Cell::new("Pending").fg(Color::Yellow)
    }
}
