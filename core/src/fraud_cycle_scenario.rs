//! Fraud cycle: a two-hop laundering pair.
//!
//!   1. Entry (placement):  honest victim -> mule
//!   2. Exit  (layering):   same mule     -> boss, minus the mule's fee
//!
//! The exit delay is bimodal: most mules forward within hours, a
//! patient minority waits whole days. A single timing feature therefore
//! cannot separate fraud from the salary noise scenario.

use crate::{
    categorical::TxnType,
    error::GenResult,
    event::{round_cents, TransactionEvent},
    rng::SimRng,
    roles::Role,
    scenario::{ScenarioRule, World},
    types::AccountId,
};
use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FraudCycleParams {
    pub entry_amount_min: f64,
    pub entry_amount_max: f64,
    /// Entry falls between `entry_window_start_days` and
    /// `entry_window_end_days` before now.
    pub entry_window_start_days: i64,
    pub entry_window_end_days: i64,
    pub fee_min: f64,
    pub fee_max: f64,
    pub patient_probability: f64,
    pub patient_delay_days: (i64, i64),
    pub fast_delay_minutes: (i64, i64),
}

impl Default for FraudCycleParams {
    fn default() -> Self {
        Self {
            entry_amount_min: 1_000.0,
            entry_amount_max: 50_000.0,
            entry_window_start_days: 90,
            entry_window_end_days: 5,
            fee_min: 0.01,
            fee_max: 0.30,
            patient_probability: 0.2,
            patient_delay_days: (1, 4),
            fast_delay_minutes: (10, 300),
        }
    }
}

/// How long the mule sits on the funds before forwarding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuleDelay {
    Patient { days: i64 },
    Fast { minutes: i64 },
}

impl MuleDelay {
    pub fn duration(&self) -> Duration {
        match self {
            Self::Patient { days } => Duration::days(*days),
            Self::Fast { minutes } => Duration::minutes(*minutes),
        }
    }
}

/// Every draw behind one fraud-cycle pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FraudCyclePlan {
    pub victim: AccountId,
    pub mule: AccountId,
    pub boss: AccountId,
    pub entry_amount: f64,
    pub entry_time: NaiveDateTime,
    pub fee: f64,
    pub delay: MuleDelay,
}

impl FraudCyclePlan {
    pub fn exit_amount(&self) -> f64 {
        round_cents(self.entry_amount * (1.0 - self.fee))
    }

    pub fn exit_time(&self) -> NaiveDateTime {
        self.entry_time + self.delay.duration()
    }

    pub fn events(&self) -> Vec<TransactionEvent> {
        vec![
            TransactionEvent::new(&self.victim, &self.mule, self.entry_amount, self.entry_time, TxnType::Pix),
            TransactionEvent::new(&self.mule, &self.boss, self.exit_amount(), self.exit_time(), TxnType::Pix),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct FraudCycle {
    pub params: FraudCycleParams,
}

impl FraudCycle {
    pub fn plan(&self, world: &World<'_>, rng: &mut SimRng) -> GenResult<FraudCyclePlan> {
        let p = &self.params;
        let victim = world.pools.draw(Role::Honest, rng)?.clone();
        let mule = world.pools.draw(Role::Mule, rng)?.clone();
        let boss = world.pools.draw(Role::Boss, rng)?.clone();

        let entry_amount = round_cents(rng.uniform(p.entry_amount_min, p.entry_amount_max));
        let entry_time = world.clock.within_days_ago(
            p.entry_window_start_days,
            p.entry_window_end_days,
            rng,
        );
        let fee = rng.uniform(p.fee_min, p.fee_max);
        let delay = self.draw_delay(rng);

        Ok(FraudCyclePlan { victim, mule, boss, entry_amount, entry_time, fee, delay })
    }

    fn draw_delay(&self, rng: &mut SimRng) -> MuleDelay {
        let p = &self.params;
        if rng.chance(p.patient_probability) {
            let (lo, hi) = p.patient_delay_days;
            MuleDelay::Patient { days: rng.range_inclusive(lo, hi) }
        } else {
            let (lo, hi) = p.fast_delay_minutes;
            MuleDelay::Fast { minutes: rng.range_inclusive(lo, hi) }
        }
    }
}

impl ScenarioRule for FraudCycle {
    fn emit(&self, world: &World<'_>, rng: &mut SimRng) -> GenResult<Vec<TransactionEvent>> {
        Ok(self.plan(world, rng)?.events())
    }
}
