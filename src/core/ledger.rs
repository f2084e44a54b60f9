//! Participants, expenses and their shares.
use crate::core::error::{LedgerError, ensure_amount};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{debug, info};

/// Display name used for identifiers that match no participant.
pub const UNKNOWN_PARTICIPANT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        ParticipantId(s.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        ParticipantId(s)
    }
}

impl ParticipantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ShareEntry {
    pub participant: ParticipantId,
    pub amount: f64,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub paid_by: ParticipantId,
    #[serde(default)]
    pub shares: Vec<ShareEntry>,
    #[serde(default)]
    pub settled: bool,
}

impl ExpenseRecord {
    /// Difference between the total and the sum of its shares.
    pub fn share_drift(&self) -> f64 {
        unallocated(self.amount, &self.shares)
    }

    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        ensure_amount(|| format!("expense `{}`", self.id), self.amount)?;
        for share in &self.shares {
            ensure_amount(
                || format!("share of `{}` in expense `{}`", share.participant, self.id),
                share.amount,
            )?;
        }
        Ok(())
    }
}

/// Input for [`Ledger::add_expense`]; the ledger assigns the id and the
/// settled flag.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub paid_by: ParticipantId,
    pub shares: Vec<ShareEntry>,
}

/// Splits `total` evenly across `members`. The payer's own share is marked paid.
pub fn equal_split(
    total: f64,
    members: &[ParticipantId],
    payer: &ParticipantId,
) -> Vec<ShareEntry> {
    if members.is_empty() {
        return Vec::new();
    }
    let each = total / members.len() as f64;
    members
        .iter()
        .map(|member| ShareEntry {
            participant: member.clone(),
            amount: each,
            paid: member == payer,
        })
        .collect()
}

/// The part of `total` not yet assigned to any share. Negative when the
/// shares over-allocate.
pub fn unallocated(total: f64, shares: &[ShareEntry]) -> f64 {
    total - shares.iter().map(|s| s.amount).sum::<f64>()
}

/// Spreads the unallocated remainder evenly over the existing shares.
pub fn distribute_remaining(total: f64, shares: &mut [ShareEntry]) {
    let remaining = unallocated(total, shares);
    if remaining == 0.0 || shares.is_empty() {
        return;
    }
    let per_share = remaining / shares.len() as f64;
    for share in shares.iter_mut() {
        share.amount += per_share;
    }
}

/// A snapshot of everyone in the group and everything they spent.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new(participants: Vec<Participant>, expenses: Vec<ExpenseRecord>) -> Self {
        Ledger {
            participants,
            expenses,
        }
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn participant_name(&self, id: &ParticipantId) -> &str {
        self.participant(id)
            .map_or(UNKNOWN_PARTICIPANT, |p| p.name.as_str())
    }

    pub fn expense(&self, id: &str) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn add_participant(
        &mut self,
        name: &str,
        email: Option<String>,
    ) -> Result<ParticipantId, LedgerError> {
        let id = ParticipantId((self.participants.len() + 1).to_string());
        if self.participant(&id).is_some() {
            return Err(LedgerError::DuplicateParticipant(id.0));
        }
        self.participants.push(Participant {
            id: id.clone(),
            name: name.to_string(),
            email,
        });
        info!(%id, name, "Added participant");
        Ok(id)
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> Result<String, LedgerError> {
        let record = ExpenseRecord {
            id: (self.expenses.len() + 1).to_string(),
            description: expense.description,
            amount: expense.amount,
            date: expense.date,
            paid_by: expense.paid_by,
            shares: expense.shares,
            settled: false,
        };
        record.validate()?;
        let id = record.id.clone();
        info!(
            %id,
            description = %record.description,
            amount = record.amount,
            "Added expense"
        );
        self.expenses.push(record);
        Ok(id)
    }

    /// Marks an expense settled. There is no way back.
    pub fn settle_expense(&mut self, id: &str) -> Result<(), LedgerError> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| LedgerError::UnknownExpense(id.to_string()))?;
        if expense.settled {
            debug!(id, "Expense already settled");
        } else {
            expense.settled = true;
            info!(id, "Expense settled");
        }
        Ok(())
    }

    /// Expenses whose shares miss the total by at least `tolerance`.
    pub fn drifting_expenses(&self, tolerance: f64) -> Vec<(&ExpenseRecord, f64)> {
        self.expenses
            .iter()
            .filter_map(|e| {
                let drift = e.share_drift();
                (drift.abs() >= tolerance).then_some((e, drift))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn id(s: &str) -> ParticipantId {
        ParticipantId::from(s)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
    }

    #[fixture]
    fn ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.add_participant("You", None).unwrap();
        ledger
            .add_participant("Alex", Some("alex@example.com".to_string()))
            .unwrap();
        ledger.add_participant("Sam", None).unwrap();
        ledger
    }

    #[rstest]
    fn add_participant_assigns_sequential_ids(ledger: Ledger) {
        let ids: Vec<_> = ledger.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(ledger.participant_name(&id("2")), "Alex");
    }

    #[test]
    fn add_participant_rejects_id_clash() {
        let mut ledger = Ledger::new(
            vec![Participant {
                id: id("2"),
                name: "Imported".to_string(),
                email: None,
            }],
            Vec::new(),
        );
        let err = ledger.add_participant("Other", None).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateParticipant("2".to_string()));
    }

    #[rstest]
    fn unknown_participant_falls_back(ledger: Ledger) {
        assert_eq!(ledger.participant_name(&id("42")), UNKNOWN_PARTICIPANT);
    }

    #[rstest]
    fn add_and_settle_expense(mut ledger: Ledger) {
        let members = [id("1"), id("2"), id("3")];
        let expense_id = ledger
            .add_expense(NewExpense {
                description: "Dinner".to_string(),
                amount: 90.0,
                date: date(),
                paid_by: id("1"),
                shares: equal_split(90.0, &members, &id("1")),
            })
            .unwrap();
        assert_eq!(expense_id, "1");
        assert!(!ledger.expenses[0].settled);

        ledger.settle_expense("1").unwrap();
        assert!(ledger.expense("1").is_some_and(|e| e.settled));

        // Settling again keeps it settled.
        ledger.settle_expense("1").unwrap();
        assert!(ledger.expenses[0].settled);
    }

    #[rstest]
    fn settle_unknown_expense_fails(mut ledger: Ledger) {
        assert_eq!(
            ledger.settle_expense("9"),
            Err(LedgerError::UnknownExpense("9".to_string()))
        );
    }

    #[rstest]
    #[case::negative_total(-5.0, 0.0)]
    #[case::nan_share(10.0, f64::NAN)]
    fn add_expense_rejects_invalid_amounts(
        mut ledger: Ledger,
        #[case] total: f64,
        #[case] share: f64,
    ) {
        let result = ledger.add_expense(NewExpense {
            description: "Broken".to_string(),
            amount: total,
            date: date(),
            paid_by: id("1"),
            shares: vec![ShareEntry {
                participant: id("2"),
                amount: share,
                paid: false,
            }],
        });
        assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));
        assert!(ledger.expenses.is_empty());
    }

    #[test]
    fn equal_split_marks_payer_paid() {
        let shares = equal_split(60.0, &[id("1"), id("2"), id("3")], &id("2"));
        assert_eq!(shares.len(), 3);
        assert!(shares.iter().all(|s| s.amount == 20.0));
        let paid: Vec<_> = shares.iter().map(|s| s.paid).collect();
        assert_eq!(paid, vec![false, true, false]);
    }

    #[test]
    fn equal_split_without_members_is_empty() {
        assert!(equal_split(60.0, &[], &id("1")).is_empty());
    }

    #[test]
    fn distribute_remaining_fills_shares() {
        let mut shares = vec![
            ShareEntry {
                participant: id("1"),
                amount: 10.0,
                paid: true,
            },
            ShareEntry {
                participant: id("2"),
                amount: 20.0,
                paid: false,
            },
        ];
        assert_eq!(unallocated(50.0, &shares), 20.0);
        distribute_remaining(50.0, &mut shares);
        assert_eq!(shares[0].amount, 20.0);
        assert_eq!(shares[1].amount, 30.0);
        assert_eq!(unallocated(50.0, &shares), 0.0);
    }

    #[rstest]
    fn drifting_expenses_reports_mismatched_shares(mut ledger: Ledger) {
        ledger
            .add_expense(NewExpense {
                description: "Balanced".to_string(),
                amount: 40.0,
                date: date(),
                paid_by: id("1"),
                shares: equal_split(40.0, &[id("1"), id("2")], &id("1")),
            })
            .unwrap();
        ledger
            .add_expense(NewExpense {
                description: "Short".to_string(),
                amount: 50.0,
                date: date(),
                paid_by: id("2"),
                shares: vec![ShareEntry {
                    participant: id("3"),
                    amount: 30.0,
                    paid: false,
                }],
            })
            .unwrap();

        let drifting = ledger.drifting_expenses(0.01);
        assert_eq!(drifting.len(), 1);
        assert_eq!(drifting[0].0.description, "Short");
        assert_eq!(drifting[0].1, 20.0);
    }
}
