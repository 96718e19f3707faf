//! Scenario sampling and the rule contract every scenario implements.
//!
//! RULE: A scenario rule only draws parties, amounts and times.
//! It never touches profiles, ids or categorical columns; the emitter
//! owns row assembly so every scenario shares one code path for it.

use crate::{
    clock::ReferenceClock,
    error::GenResult,
    event::TransactionEvent,
    population::Population,
    rng::SimRng,
    roles::RolePools,
    types::TxnId,
    weighted::Weighted,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Normal,
    FraudCycle,
    Noise,
}

impl Weighted for Scenario {
    const TABLE: &'static [(Self, f64)] = &[
        (Scenario::Normal, 0.80),
        (Scenario::FraudCycle, 0.10),
        (Scenario::Noise, 0.10),
    ];
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal     => "normal",
            Self::FraudCycle => "fraud_cycle",
            Self::Noise      => "noise",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw the next scenario tag. Consumes one value from the stream.
pub fn sample_scenario(rng: &mut SimRng) -> Scenario {
    Scenario::draw(rng)
}

/// Read-only view of the frozen run state handed to scenario rules.
#[derive(Clone, Copy)]
pub struct World<'a> {
    pub population: &'a Population,
    pub pools: &'a RolePools,
    pub clock: &'a ReferenceClock,
}

/// The contract every scenario rule fulfills.
pub trait ScenarioRule {
    /// Draw this scenario's events, in emission order.
    fn emit(&self, world: &World<'_>, rng: &mut SimRng) -> GenResult<Vec<TransactionEvent>>;
}

/// Which scenario produced which transaction ids.
/// Kept off the transaction table; it is ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub step: u64,
    pub scenario: Scenario,
    pub first_txn_id: TxnId,
    pub row_count: usize,
}

impl ScenarioRecord {
    pub fn txn_ids(&self) -> std::ops::Range<TxnId> {
        self.first_txn_id..self.first_txn_id + self.row_count as TxnId
    }
}
