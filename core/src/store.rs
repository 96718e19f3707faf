//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! A dataset is written inside one transaction: either every table for the
//! run lands, or none does.

use rusqlite::{params, Connection};
use crate::{
    dataset::{Dataset, TIMESTAMP_FORMAT},
    error::GenResult,
    scenario::Scenario,
};

pub struct SimStore {
    conn: Connection,
}

impl SimStore {
    /// Open (or create) the dataset database at `path`.
    pub fn open(path: &str) -> GenResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GenResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> GenResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_dataset.sql"))?;
        Ok(())
    }

    /// Write the run record and every table of `dataset` atomically.
    pub fn save_dataset(&mut self, run_id: &str, version: &str, dataset: &Dataset) -> GenResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO run (run_id, seed, target_rows, as_of, version) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                run_id,
                dataset.seed as i64,
                dataset.target_rows as i64,
                dataset.clock.now.format(TIMESTAMP_FORMAT).to_string(),
                version,
            ],
        )?;

        // ── Transactions ───────────────────────────────────────
        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions (
                     run_id, transaction_id, transaction_time, transaction_amount,
                     sender_id, name, cpf, receiver_id, receiver_name,
                     transaction_type, transaction_city, birth_date, address_pcode,
                     phone_number, acc_creation_date, agency, account, credit_score,
                     device_id, device_model, receiver_bank, receiver_agency,
                     receiver_account, gender, account_type, device,
                     receiver_acc_type, device_os
                 ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,
                           ?19,?20,?21,?22,?23,?24,?25,?26,?27,?28)",
            )?;
            for row in &dataset.transactions {
                stmt.execute(params![
                    run_id,
                    row.transaction_id as i64,
                    row.transaction_time.format(TIMESTAMP_FORMAT).to_string(),
                    row.transaction_amount,
                    row.sender_id,
                    row.name,
                    row.cpf,
                    row.receiver_id,
                    row.receiver_name,
                    row.transaction_type.as_str(),
                    row.transaction_city,
                    row.birth_date.to_string(),
                    row.address_pcode,
                    row.phone_number,
                    row.acc_creation_date.to_string(),
                    row.agency,
                    row.account,
                    row.credit_score,
                    row.device_id,
                    row.device_model,
                    row.receiver_bank,
                    row.receiver_agency,
                    row.receiver_account,
                    row.gender.as_str(),
                    row.account_type.as_str(),
                    row.device.as_str(),
                    row.receiver_acc_type.as_str(),
                    row.device_os.as_str(),
                ])?;
            }
        }

        // ── Labels ─────────────────────────────────────────────
        {
            let mut stmt = tx.prepare(
                "INSERT INTO account_labels (run_id, account_id, is_fraud, role)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for label in &dataset.labels {
                stmt.execute(params![run_id, label.account_id, label.is_fraud, label.role.as_str()])?;
            }
        }

        // ── Scenario log ───────────────────────────────────────
        {
            let mut stmt = tx.prepare(
                "INSERT INTO scenario_log (run_id, step, scenario, first_txn_id, row_count)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for rec in &dataset.scenarios {
                stmt.execute(params![
                    run_id,
                    rec.step as i64,
                    rec.scenario.as_str(),
                    rec.first_txn_id as i64,
                    rec.row_count as i64,
                ])?;
            }
        }

        tx.commit()?;
        log::debug!(
            "store: saved run {run_id} ({} transactions, {} labels)",
            dataset.transactions.len(),
            dataset.labels.len()
        );
        Ok(())
    }

    // ── Queries (reporting and tests) ──────────────────────────

    pub fn run_count(&self) -> GenResult<i64> {
        Ok(self.conn.query_row("SELECT COUNT(*) FROM run", [], |r| r.get(0))?)
    }

    pub fn transaction_count(&self, run_id: &str) -> GenResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE run_id = ?1",
            params![run_id],
            |r| r.get(0),
        )?)
    }

    pub fn label_count(&self, run_id: &str) -> GenResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM account_labels WHERE run_id = ?1",
            params![run_id],
            |r| r.get(0),
        )?)
    }

    pub fn fraud_label_count(&self, run_id: &str) -> GenResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM account_labels WHERE run_id = ?1 AND is_fraud = 1",
            params![run_id],
            |r| r.get(0),
        )?)
    }

    pub fn scenario_step_count(&self, run_id: &str, scenario: Scenario) -> GenResult<i64> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM scenario_log WHERE run_id = ?1 AND scenario = ?2",
            params![run_id, scenario.as_str()],
            |r| r.get(0),
        )?)
    }

    /// Distinct (sender_id, cpf) pairs; one per sender when profiles are consistent.
    pub fn distinct_sender_cpfs(&self, run_id: &str) -> GenResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT sender_id, cpf FROM transactions WHERE run_id = ?1 ORDER BY sender_id",
        )?;
        let pairs = stmt
            .query_map(params![run_id], |r| Ok((r.get(0)?, r.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pairs)
    }
}
