//! Greedy debt netting.
//!
//! Each round pairs the largest debtor with the largest creditor and moves
//! the smaller of the two amounts between them. At least one side reaches
//! zero per round, so `k` non-zero balances settle in at most `k - 1`
//! transfers.
use crate::core::balance::Balance;
use crate::core::error::LedgerError;
use crate::core::ledger::ParticipantId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Balances smaller than this are treated as settled.
pub const SETTLEMENT_TOLERANCE: f64 = 0.01;

/// A suggested payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: f64,
}

/// Below the tolerance. Such balances never enter the plan.
pub fn is_negligible(amount: f64) -> bool {
    amount.abs() < SETTLEMENT_TOLERANCE
}

/// Within the tolerance, boundary included. Such balances leave the working
/// set at the end of every round.
pub fn is_settled(amount: f64) -> bool {
    amount.abs() <= SETTLEMENT_TOLERANCE
}

/// Plans the transfers that bring every balance back to zero.
///
/// Each round stable-sorts the working set ascending and pairs its first
/// entry (largest debtor) with its last (largest creditor). Tied debtors are
/// taken in order, tied creditors from the back, and the order carries over
/// to the next round. Callers that want the overview's order pass balances
/// largest first.
///
/// The balances are expected to sum to roughly zero; whatever cannot be
/// matched once only debtors or only creditors remain is left unsettled.
///
/// Fails with [`LedgerError::InvalidAmount`] when a balance is not finite.
pub fn compute_settlements(balances: &[Balance]) -> Result<Vec<Settlement>, LedgerError> {
    if let Some(bad) = balances.iter().find(|b| !b.amount.is_finite()) {
        return Err(LedgerError::invalid_amount(
            format!("balance of `{}`", bad.participant),
            bad.amount,
        ));
    }

    let mut working: Vec<Balance> = balances
        .iter()
        .filter(|b| !is_negligible(b.amount))
        .cloned()
        .collect();
    let mut settlements = Vec::new();

    while working.len() > 1 {
        working.sort_by(|a, b| a.amount.total_cmp(&b.amount));
        let (debtor, creditor) = (0, working.len() - 1);
        let owed = -working[debtor].amount;
        let due = working[creditor].amount;
        if owed < SETTLEMENT_TOLERANCE || due < SETTLEMENT_TOLERANCE {
            debug!(owed, due, "Remaining imbalance is below tolerance");
            break;
        }

        let amount = owed.min(due);
        debug!(
            from = %working[debtor].participant,
            to = %working[creditor].participant,
            amount,
            "Planned settlement"
        );
        settlements.push(Settlement {
            from: working[debtor].participant.clone(),
            to: working[creditor].participant.clone(),
            amount,
        });

        working = working
            .into_iter()
            .enumerate()
            .map(|(idx, mut balance)| {
                if idx == debtor {
                    balance.amount += amount;
                } else if idx == creditor {
                    balance.amount -= amount;
                }
                balance
            })
            .filter(|b| !is_settled(b.amount))
            .collect();
    }

    Ok(settlements)
}

/// Replays settlements on a copy of `balances`: the payer's balance rises and
/// the receiver's falls by each amount. Participants missing from `balances`
/// are appended.
pub fn apply_settlements(balances: &[Balance], settlements: &[Settlement]) -> Vec<Balance> {
    let mut result = balances.to_vec();
    for settlement in settlements {
        adjust(&mut result, &settlement.from, settlement.amount);
        adjust(&mut result, &settlement.to, -settlement.amount);
    }
    result
}

fn adjust(balances: &mut Vec<Balance>, participant: &ParticipantId, delta: f64) {
    match balances.iter_mut().find(|b| &b.participant == participant) {
        Some(balance) => balance.amount += delta,
        None => balances.push(Balance {
            participant: participant.clone(),
            amount: delta,
        }),
    }
}
