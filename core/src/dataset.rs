//! Output rows and the in-memory dataset handed to sinks.
//!
//! Field order on `TransactionRow` is the column order of the
//! transaction table.

use crate::{
    categorical::{AccountType, DeviceClass, DeviceOs, Gender, TxnType},
    clock::ReferenceClock,
    population::Population,
    roles::{Role, RolePools},
    scenario::ScenarioRecord,
    types::{AccountId, TxnId},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub transaction_id: TxnId,
    #[serde(serialize_with = "timestamp")]
    pub transaction_time: NaiveDateTime,
    #[serde(serialize_with = "cents")]
    pub transaction_amount: f64,
    pub sender_id: AccountId,
    pub name: String,
    pub cpf: String,
    pub receiver_id: AccountId,
    pub receiver_name: String,
    pub transaction_type: TxnType,
    pub transaction_city: String,

    // Sender snapshot
    pub birth_date: NaiveDate,
    pub address_pcode: String,
    pub phone_number: String,
    pub acc_creation_date: NaiveDate,
    pub agency: u32,
    pub account: u32,
    pub credit_score: u16,
    pub device_id: String,
    pub device_model: String,

    // Receiver snapshot
    pub receiver_bank: String,
    pub receiver_agency: u32,
    pub receiver_account: u32,

    // Independent categorical attributes
    pub gender: Gender,
    pub account_type: AccountType,
    pub device: DeviceClass,
    pub receiver_acc_type: AccountType,
    pub device_os: DeviceOs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRow {
    pub account_id: AccountId,
    pub is_fraud: u8,
    pub role: Role,
}

/// Everything one run produced. Frozen once returned by the engine.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub seed: u64,
    pub target_rows: usize,
    pub clock: ReferenceClock,
    pub population: Population,
    pub pools: RolePools,
    pub transactions: Vec<TransactionRow>,
    pub labels: Vec<LabelRow>,
    pub scenarios: Vec<ScenarioRecord>,
}

impl Dataset {
    pub fn transaction(&self, id: TxnId) -> Option<&TransactionRow> {
        // Ids are dense and start at 0.
        self.transactions.get(id as usize).filter(|row| row.transaction_id == id)
    }

    /// Rows produced by one scenario step, in emission order.
    pub fn rows_for(&self, record: &ScenarioRecord) -> Vec<&TransactionRow> {
        record.txn_ids().filter_map(|id| self.transaction(id)).collect()
    }
}

fn timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn cents<S: Serializer>(amount: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{amount:.2}"))
}
