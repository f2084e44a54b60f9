//! Filtering and ordering for the expense list.
use crate::core::ledger::{ExpenseRecord, Ledger};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Amount,
    #[default]
    Date,
    PaidBy,
}

impl SortKey {
    /// Dates list newest first; every other column reads A to Z.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Date => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    pub search: Option<String>,
    pub sort_by: SortKey,
    /// Falls back to [`SortKey::default_direction`] when unset.
    pub direction: Option<SortDirection>,
}

/// Expenses whose description or payer name contains the search term
/// (case-insensitive), ordered by the requested key. Equal keys keep ledger
/// order.
pub fn filter_and_sort<'a>(ledger: &'a Ledger, query: &ExpenseQuery) -> Vec<&'a ExpenseRecord> {
    let needle = query.search.as_deref().map(str::to_lowercase);
    let mut expenses: Vec<&ExpenseRecord> = ledger
        .expenses
        .iter()
        .filter(|e| match &needle {
            Some(needle) => {
                e.description.to_lowercase().contains(needle)
                    || ledger
                        .participant_name(&e.paid_by)
                        .to_lowercase()
                        .contains(needle)
            }
            None => true,
        })
        .collect();

    let direction = query
        .direction
        .unwrap_or_else(|| query.sort_by.default_direction());
    expenses.sort_by(|a, b| {
        let ordering = compare(ledger, query.sort_by, a, b);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    expenses
}

fn compare(ledger: &Ledger, key: SortKey, a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
    match key {
        SortKey::Title => a.description.cmp(&b.description),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::PaidBy => ledger
            .participant_name(&a.paid_by)
            .cmp(ledger.participant_name(&b.paid_by)),
    }
}
