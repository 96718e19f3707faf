//! Salary noise: "receive salary, spend fast".
//!
//! An employer pays an honest account by ted, and the recipient pays most
//! of it onward by boleto within minutes to hours. The pair looks like a
//! fraud cycle on timing alone but involves no mule.

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
pub struct NoiseParams {
    pub income_min: f64,
    pub income_max: f64,
    pub income_window_start_days: i64,
    pub income_window_end_days: i64,
    /// Share of the income spent onward.
    pub spend_share_min: f64,
    pub spend_share_max: f64,
    pub spend_delay_minutes: (i64, i64),
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            income_min: 2_500.0,
            income_max: 15_000.0,
            income_window_start_days: 90,
            income_window_end_days: 5,
            spend_share_min: 0.90,
            spend_share_max: 0.99,
            spend_delay_minutes: (5, 400),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryPlan {
    pub employer: AccountId,
    pub employee: AccountId,
    pub payee: AccountId,
    pub income: f64,
    pub income_time: NaiveDateTime,
    pub spend_share: f64,
    pub spend_delay_minutes: i64,
}

impl SalaryPlan {
    pub fn spend_amount(&self) -> f64 {
        round_cents(self.income * self.spend_share)
    }

    pub fn spend_time(&self) -> NaiveDateTime {
        self.income_time + Duration::minutes(self.spend_delay_minutes)
    }

    pub fn events(&self) -> Vec<TransactionEvent> {
        vec![
            TransactionEvent::new(&self.employer, &self.employee, self.income, self.income_time, TxnType::Ted),
            TransactionEvent::new(&self.employee, &self.payee, self.spend_amount(), self.spend_time(), TxnType::Boleto),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct SalaryNoise {
    pub params: NoiseParams,
}

impl SalaryNoise {
    pub fn plan(&self, world: &World<'_>, rng: &mut SimRng) -> GenResult<SalaryPlan> {
        let p = &self.params;
        let employee = world.pools.draw(Role::Honest, rng)?.clone();
        let employer = world.population.draw_other(&employee, rng)?.clone();

        let income = round_cents(rng.uniform(p.income_min, p.income_max));
        let income_time = world.clock.within_days_ago(
            p.income_window_start_days,
            p.income_window_end_days,
            rng,
        );

        let payee = world.population.draw_other(&employee, rng)?.clone();
        let spend_share = rng.uniform(p.spend_share_min, p.spend_share_max);
        let (lo, hi) = p.spend_delay_minutes;
        let spend_delay_minutes = rng.range_inclusive(lo, hi);

        Ok(SalaryPlan {
            employer,
            employee,
            payee,
            income,
            income_time,
            spend_share,
            spend_delay_minutes,
        })
    }
}

impl ScenarioRule for SalaryNoise {
    fn emit(&self, world: &World<'_>, rng: &mut SimRng) -> GenResult<Vec<TransactionEvent>> {
        Ok(self.plan(world, rng)?.events())
    }
}
