use thiserror::Error;

use crate::roles::Role;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot draw from empty {role} pool")]
    EmptyPool { role: Role },

    #[error("Population has {available} accounts, scenario needs {needed} distinct accounts")]
    PopulationTooSmall { available: usize, needed: usize },

    #[error("Account '{id}' not in population")]
    UnknownAccount { id: String },

    #[error("Unique values for pattern '{pattern}' exhausted after {attempts} attempts")]
    UniquenessExhausted { pattern: String, attempts: u32 },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Row count {actual} outside [{target}, {target}+1]")]
    RowCountViolation { target: usize, actual: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
