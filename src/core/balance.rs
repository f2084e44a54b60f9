//! Reduces expense records to one net balance per participant.
//!
//! A positive amount means the group owes that participant; a negative one
//! means the participant owes the group. Settled expenses are ignored and a
//! payer's own share never moves their balance.
use crate::core::error::{LedgerError, ensure_amount};
use crate::core::ledger::{ExpenseRecord, Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub participant: ParticipantId,
    pub amount: f64,
}

impl Balance {
    pub fn new(participant: impl Into<ParticipantId>, amount: f64) -> Self {
        Balance {
            participant: participant.into(),
            amount,
        }
    }
}

/// Running totals kept in first-seen order.
#[derive(Default)]
struct BalanceAccumulator {
    order: Vec<ParticipantId>,
    totals: HashMap<ParticipantId, f64>,
}

impl BalanceAccumulator {
    fn entry(&mut self, id: &ParticipantId) -> &mut f64 {
        if !self.totals.contains_key(id) {
            self.order.push(id.clone());
        }
        self.totals.entry(id.clone()).or_insert(0.0)
    }

    fn into_balances(mut self) -> Vec<Balance> {
        self.order
            .into_iter()
            .filter_map(|id| {
                let amount = self.totals.remove(&id)?;
                (amount != 0.0).then(|| Balance {
                    participant: id,
                    amount,
                })
            })
            .collect()
    }
}

/// Computes the net balance of every participant with outstanding activity.
///
/// Known participants come first in their given order, followed by any
/// identifier only referenced by an expense, in the order it was first seen.
/// Unknown identifiers are carried through unchanged. Balances that net to
/// exactly zero are dropped.
///
/// Fails with [`LedgerError::InvalidAmount`] when an unsettled expense holds
/// a negative or non-finite amount.
pub fn compute_balances(
    expenses: &[ExpenseRecord],
    participants: &[Participant],
) -> Result<Vec<Balance>, LedgerError> {
    let mut accumulator = BalanceAccumulator::default();
    for participant in participants {
        accumulator.entry(&participant.id);
    }

    for expense in expenses {
        if expense.settled {
            debug!(id = %expense.id, "Skipping settled expense");
            continue;
        }
        ensure_amount(|| format!("expense `{}`", expense.id), expense.amount)?;

        for share in &expense.shares {
            let amount = ensure_amount(
                || format!("share of `{}` in expense `{}`", share.participant, expense.id),
                share.amount,
            )?;
            if share.participant == expense.paid_by {
                continue;
            }
            *accumulator.entry(&expense.paid_by) += amount;
            *accumulator.entry(&share.participant) -= amount;
        }
    }

    let balances = accumulator.into_balances();
    debug!(count = balances.len(), "Computed balances");
    Ok(balances)
}

/// Orders balances largest first, the way the overview lists them.
pub fn sort_for_display(balances: &mut [Balance]) {
    balances.sort_by(|a, b| b.amount.total_cmp(&a.amount));
}
