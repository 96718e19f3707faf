//! Run configuration.
//!
//! Only run-level settings live here (size, seed, reference date, output).
//! Scenario probabilities and ranges are fixed and live next to the rules
//! that use them (`NormalParams`, `FraudCycleParams`, `NoiseParams`,
//! `MULE_SHARE`, `BOSS_SHARE`, `Scenario::TABLE`).

use crate::error::{GenError, GenResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_ROWS: usize = 100_000;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_OUTPUT_DIR: &str = "data/01_raw";
pub const TRANSACTIONS_FILE: &str = "synthetic_dataset.csv";
pub const LABELS_FILE: &str = "accounts_labels.csv";
pub const DEFAULT_DB_FILE: &str = "synthetic_dataset.db";

/// Default reference "now". Fixed so default runs are reproducible.
pub fn default_as_of() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub format: OutputFormat,
    /// SQLite file name inside `dir`.
    pub db_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.into(),
            format: OutputFormat::Csv,
            db_file: DEFAULT_DB_FILE.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Requested transaction rows. The run emits N or N+1.
    pub target_rows: usize,
    pub seed: u64,
    /// Reference "now" for every timestamp window.
    pub as_of: NaiveDateTime,
    pub output: OutputConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_rows: DEFAULT_TARGET_ROWS,
            seed: DEFAULT_SEED,
            as_of: default_as_of(),
            output: OutputConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.target_rows == 0 {
            return Err(GenError::InvalidConfig {
                reason: "target_rows must be positive".into(),
            });
        }
        Ok(())
    }

    /// Config with a small population for use in tests.
    /// 2,000 rows -> 900 accounts -> 45 mules, 9 bosses.
    pub fn default_test() -> Self {
        Self {
            target_rows: 2_000,
            ..Self::default()
        }
    }
}
