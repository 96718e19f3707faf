//! Output sinks. A sink receives a finished dataset; generation never
//! streams into one, so a failed run writes nothing.

use crate::{
    config::{LABELS_FILE, TRANSACTIONS_FILE},
    dataset::Dataset,
    error::GenResult,
    store::SimStore,
    types::RunId,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The contract every output writer fulfills.
pub trait DatasetSink {
    fn name(&self) -> &'static str;

    fn write(&mut self, dataset: &Dataset) -> GenResult<()>;
}

/// Two CSV files in one directory: transactions and labels.
///
/// Both tables are written under temporary names and only renamed into
/// place once both succeeded. If the second rename fails the first is
/// undone, so the directory holds either both new tables or neither.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.dir.join(TRANSACTIONS_FILE)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.dir.join(LABELS_FILE)
    }

    fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> GenResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn staging_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}

fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

impl DatasetSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn write(&mut self, dataset: &Dataset) -> GenResult<()> {
        fs::create_dir_all(&self.dir)?;
        let txn_path = self.transactions_path();
        let label_path = self.labels_path();
        let txn_tmp = staging_path(&txn_path);
        let label_tmp = staging_path(&label_path);

        let staged = Self::write_table(&txn_tmp, &dataset.transactions)
            .and_then(|_| Self::write_table(&label_tmp, &dataset.labels));
        if let Err(e) = staged {
            let _ = fs::remove_file(&txn_tmp);
            let _ = fs::remove_file(&label_tmp);
            return Err(e);
        }

        // A previous run's transactions are set aside, not overwritten, until
        // the labels are in place too.
        let txn_backup = backup_path(&txn_path);
        let had_previous = txn_path.is_file();
        let discard_staged = || {
            let _ = fs::remove_file(&txn_tmp);
            let _ = fs::remove_file(&label_tmp);
        };
        if had_previous {
            if let Err(e) = fs::rename(&txn_path, &txn_backup) {
                discard_staged();
                return Err(e.into());
            }
        }
        let restore_previous = || {
            if had_previous {
                let _ = fs::rename(&txn_backup, &txn_path);
            }
        };

        if let Err(e) = fs::rename(&txn_tmp, &txn_path) {
            discard_staged();
            restore_previous();
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&label_tmp, &label_path) {
            log::warn!("labels could not be moved into place, rolling back {}", txn_path.display());
            let _ = fs::remove_file(&txn_path);
            discard_staged();
            restore_previous();
            return Err(e.into());
        }
        if had_previous {
            let _ = fs::remove_file(&txn_backup);
        }
        log::info!("Dataset saved to {}", txn_path.display());
        log::info!("Labels saved to {}", label_path.display());
        Ok(())
    }
}

/// A SQLite database; each run is keyed by its run id.
pub struct SqliteSink {
    store: SimStore,
    run_id: RunId,
    version: String,
}

impl SqliteSink {
    pub fn new(store: SimStore, run_id: impl Into<RunId>, version: impl Into<String>) -> Self {
        Self { store, run_id: run_id.into(), version: version.into() }
    }

    pub fn store(&self) -> &SimStore {
        &self.store
    }
}

impl DatasetSink for SqliteSink {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn write(&mut self, dataset: &Dataset) -> GenResult<()> {
        self.store.migrate()?;
        self.store.save_dataset(&self.run_id, &self.version, dataset)?;
        log::info!("Dataset saved as run {}", self.run_id);
        Ok(())
    }
}
