//! Normal traffic: one everyday pix between any two distinct accounts.

use crate::{
    categorical::TxnType,
    error::GenResult,
    event::TransactionEvent,
    rng::SimRng,
    scenario::{ScenarioRule, World},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalParams {
    pub amount_min: f64,
    pub amount_max: f64,
    /// Timestamps fall in the last `lookback_days` up to now.
    pub lookback_days: i64,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self {
            amount_min: 10.0,
            amount_max: 2_500.0,
            lookback_days: 90,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalTransfer {
    pub params: NormalParams,
}

impl ScenarioRule for NormalTransfer {
    fn emit(&self, world: &World<'_>, rng: &mut SimRng) -> GenResult<Vec<TransactionEvent>> {
        let p = &self.params;
        // Any pair, not restricted to a pool.
        let sender = world.population.draw(rng)?;
        let receiver = world.population.draw_other(sender, rng)?;
        let amount = rng.uniform(p.amount_min, p.amount_max);
        let timestamp = world.clock.within_days_ago(p.lookback_days, 0, rng);

        Ok(vec![TransactionEvent::new(sender, receiver, amount, timestamp, TxnType::Pix)])
    }
}
