//! Errors raised by the ledger computations.
//!
//! - [`InvalidAmount`] when an amount is negative or not finite.
//! - [`UnknownExpense`] when an expense id is not in the ledger.
//! - [`DuplicateParticipant`] when a participant id is already taken.
//!
//! [`InvalidAmount`]: LedgerError::InvalidAmount
//! [`UnknownExpense`]: LedgerError::UnknownExpense
//! [`DuplicateParticipant`]: LedgerError::DuplicateParticipant
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("invalid amount {amount} for {context}")]
    InvalidAmount { context: String, amount: f64 },
    #[error("expense `{0}` not found")]
    UnknownExpense(String),
    #[error("participant `{0}` already exists")]
    DuplicateParticipant(String),
}

impl LedgerError {
    pub(crate) fn invalid_amount(context: impl Into<String>, amount: f64) -> Self {
        LedgerError::InvalidAmount {
            context: context.into(),
            amount,
        }
    }
}

/// Rejects NaN, infinities and negative values.
pub(crate) fn ensure_amount(
    context: impl FnOnce() -> String,
    amount: f64,
) -> Result<f64, LedgerError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(LedgerError::invalid_amount(context(), amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(12.5)]
    fn accepts_non_negative_finite(#[case] amount: f64) {
        assert_eq!(ensure_amount(|| "share".to_string(), amount), Ok(amount));
    }

    #[rstest]
    #[case(-0.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_bad_amounts(#[case] amount: f64) {
        let err = ensure_amount(|| "expense 1".to_string(), amount).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidAmount { ref context, .. } if context == "expense 1"
        ));
    }
}
