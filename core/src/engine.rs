//! The dataset engine — one deterministic pass from seed to dataset.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Account population   (AccountPopulationGenerator)
//!   2. Role assignment      (RolePools::assign)
//!   3. Scenario loop        (sample_scenario + TransactionEmitter), until
//!                           the row count reaches the target
//!   4. Label export         (no randomness)
//!
//! RULES:
//!   - One SimRng, created here from the seed, threads through every step.
//!   - Population and pools are frozen before the first scenario draw.
//!   - Any error aborts the run; no partial dataset is returned.

use crate::{
    clock::ReferenceClock,
    config::GeneratorConfig,
    dataset::Dataset,
    emitter::TransactionEmitter,
    error::{GenError, GenResult},
    labels::export_labels,
    population::{account_count_for, AccountPopulationGenerator},
    rng::SimRng,
    roles::{Role, RolePools},
    scenario::{sample_scenario, World},
};

pub struct DatasetEngine {
    config: GeneratorConfig,
    rng: SimRng,
    emitter: TransactionEmitter,
}

impl DatasetEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = SimRng::new(config.seed).with_name("dataset");
        Self { config, rng, emitter: TransactionEmitter::default() }
    }

    /// Replace the scenario rules (tests use this to tighten parameters).
    pub fn with_emitter(mut self, emitter: TransactionEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn run(mut self) -> GenResult<Dataset> {
        self.config.validate()?;
        let target = self.config.target_rows;
        let clock = ReferenceClock::new(self.config.as_of);

        let num_accounts = account_count_for(target);
        let population = AccountPopulationGenerator::new(clock).generate(num_accounts, &mut self.rng)?;
        let pools = RolePools::assign(&population.ids(), &mut self.rng);
        log::info!(
            "population: {} accounts ({} mules, {} bosses, {} honest)",
            pools.len(),
            pools.pool(Role::Mule).len(),
            pools.pool(Role::Boss).len(),
            pools.pool(Role::Honest).len()
        );

        let world = World { population: &population, pools: &pools, clock: &clock };
        let mut transactions = Vec::with_capacity(target + 1);
        let mut scenarios = Vec::new();

        // A step adds one or two rows, so the loop may overshoot by one.
        // The pair is never split to hit the target exactly.
        while transactions.len() < target {
            let scenario = sample_scenario(&mut self.rng);
            let emission = self.emitter.emit(scenario, &world, &mut self.rng)?;
            transactions.extend(emission.rows);
            scenarios.push(emission.record);
        }

        if transactions.len() > target + 1 {
            return Err(GenError::RowCountViolation { target, actual: transactions.len() });
        }

        let labels = export_labels(&population, &pools)?;
        log::info!(
            "generated {} transactions in {} steps, {} labels (seed {})",
            transactions.len(),
            scenarios.len(),
            labels.len(),
            self.config.seed
        );

        Ok(Dataset {
            seed: self.config.seed,
            target_rows: target,
            clock,
            population,
            pools,
            transactions,
            labels,
            scenarios,
        })
    }
}

/// Build and run an engine with the default scenario rules.
pub fn generate(config: &GeneratorConfig) -> GenResult<Dataset> {
    DatasetEngine::new(config.clone()).run()
}
