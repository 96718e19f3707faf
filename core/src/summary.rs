//! End-of-run summary numbers for logs and the runner's report.

use crate::{
    dataset::Dataset,
    roles::Role,
    scenario::Scenario,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub target_rows: usize,
    pub transactions: usize,
    pub accounts: usize,
    pub mules: usize,
    pub bosses: usize,
    pub honest: usize,
    pub normal_steps: usize,
    pub fraud_cycle_steps: usize,
    pub noise_steps: usize,
    pub total_volume: f64,
    /// Volume moved by fraud-cycle rows (entry and exit legs).
    pub fraud_volume: f64,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let steps = |s: Scenario| dataset.scenarios.iter().filter(|r| r.scenario == s).count();

        let fraud_volume = dataset
            .scenarios
            .iter()
            .filter(|r| r.scenario == Scenario::FraudCycle)
            .flat_map(|r| dataset.rows_for(r))
            .map(|row| row.transaction_amount)
            .sum();

        Self {
            target_rows: dataset.target_rows,
            transactions: dataset.transactions.len(),
            accounts: dataset.population.len(),
            mules: dataset.pools.pool(Role::Mule).len(),
            bosses: dataset.pools.pool(Role::Boss).len(),
            honest: dataset.pools.pool(Role::Honest).len(),
            normal_steps: steps(Scenario::Normal),
            fraud_cycle_steps: steps(Scenario::FraudCycle),
            noise_steps: steps(Scenario::Noise),
            total_volume: dataset.transactions.iter().map(|r| r.transaction_amount).sum(),
            fraud_volume,
        }
    }

    pub fn fraud_volume_share(&self) -> f64 {
        if self.total_volume > 0.0 {
            self.fraud_volume / self.total_volume
        } else {
            0.0
        }
    }
}
