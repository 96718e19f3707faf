//! Transaction events — the ephemeral output of a scenario rule.
//!
//! RULE: An event only names parties, amount, time and rail.
//! Profile snapshots and categorical attributes are added by the
//! emitter when the event is expanded into a row; events are then dropped.

use crate::{categorical::TxnType, types::AccountId};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEvent {
    pub sender_id: AccountId,
    pub receiver_id: AccountId,
    /// Positive, rounded to cents.
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    pub txn_type: TxnType,
}

impl TransactionEvent {
    pub fn new(
        sender_id: &str,
        receiver_id: &str,
        amount: f64,
        timestamp: NaiveDateTime,
        txn_type: TxnType,
    ) -> Self {
        Self {
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            amount: round_cents(amount),
            timestamp,
            txn_type,
        }
    }
}

/// Round a currency amount to two fractional digits.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
