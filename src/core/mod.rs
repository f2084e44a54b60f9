//! Core business logic: the ledger model and the balance/settlement math.

pub mod balance;
pub mod config;
pub mod error;
pub mod ledger;
pub mod log;
pub mod query;
pub mod settlement;

// Re-export main types for cleaner imports
pub use balance::{Balance, compute_balances};
pub use error::LedgerError;
pub use ledger::{ExpenseRecord, Ledger, Participant, ParticipantId, ShareEntry};
pub use settlement::{SETTLEMENT_TOLERANCE, Settlement, compute_settlements};
