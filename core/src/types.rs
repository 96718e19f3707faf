//! Shared primitive types used across the entire generator.

/// A stable, unique account identifier (`acc######`).
pub type AccountId = String;

/// Transaction identifier. Assigned in emission order, starting at 0.
pub type TxnId = u64;

/// The canonical run identifier.
pub type RunId = String;
