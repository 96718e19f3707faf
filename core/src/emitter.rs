//! Transaction emitter — turns a scenario tag into finished rows.
//!
//! Per step the draw order is fixed:
//!   1. the scenario rule draws all of its events
//!   2. each event, in order, draws city, bank code and the five
//!      categorical attributes while being expanded into a row
//!
//! Transaction ids are assigned here, densely, in emission order.

use crate::{
    categorical::{AccountType, DeviceClass, DeviceOs, Gender},
    dataset::TransactionRow,
    error::GenResult,
    event::TransactionEvent,
    fraud_cycle_scenario::FraudCycle,
    noise_scenario::SalaryNoise,
    normal_scenario::NormalTransfer,
    profile_fields::ProfileFields,
    rng::SimRng,
    scenario::{Scenario, ScenarioRecord, ScenarioRule, World},
    types::TxnId,
    weighted::Weighted,
};

/// Rows produced by one scenario step.
#[derive(Debug, Clone)]
pub struct Emission {
    pub record: ScenarioRecord,
    pub rows: Vec<TransactionRow>,
}

pub struct TransactionEmitter {
    normal: NormalTransfer,
    fraud_cycle: FraudCycle,
    noise: SalaryNoise,
    next_txn_id: TxnId,
    steps: u64,
}

impl Default for TransactionEmitter {
    fn default() -> Self {
        Self::new(NormalTransfer::default(), FraudCycle::default(), SalaryNoise::default())
    }
}

impl TransactionEmitter {
    pub fn new(normal: NormalTransfer, fraud_cycle: FraudCycle, noise: SalaryNoise) -> Self {
        Self { normal, fraud_cycle, noise, next_txn_id: 0, steps: 0 }
    }

    fn rule(&self, scenario: Scenario) -> &dyn ScenarioRule {
        match scenario {
            Scenario::Normal     => &self.normal,
            Scenario::FraudCycle => &self.fraud_cycle,
            Scenario::Noise      => &self.noise,
        }
    }

    pub fn emit(
        &mut self,
        scenario: Scenario,
        world: &World<'_>,
        rng: &mut SimRng,
    ) -> GenResult<Emission> {
        let events = self.rule(scenario).emit(world, rng)?;

        let first_txn_id = self.next_txn_id;
        let mut rows = Vec::with_capacity(events.len());
        for event in events {
            rows.push(self.assemble(event, world, rng)?);
        }

        let record = ScenarioRecord {
            step: self.steps,
            scenario,
            first_txn_id,
            row_count: rows.len(),
        };
        self.steps += 1;
        log::trace!(
            "step={} {scenario}: txn {}..{}",
            record.step,
            first_txn_id,
            self.next_txn_id
        );
        Ok(Emission { record, rows })
    }

    /// Merge an event with both canonical profiles and the per-row draws.
    fn assemble(
        &mut self,
        event: TransactionEvent,
        world: &World<'_>,
        rng: &mut SimRng,
    ) -> GenResult<TransactionRow> {
        let sender = world.population.profile(&event.sender_id)?;
        let receiver = world.population.profile(&event.receiver_id)?;

        let transaction_city = ProfileFields::city(rng).to_string();
        let receiver_bank = ProfileFields::bank_code(rng);
        let gender = Gender::draw(rng);
        let account_type = AccountType::draw(rng);
        let device = DeviceClass::draw(rng);
        let receiver_acc_type = AccountType::draw(rng);
        let device_os = DeviceOs::draw(rng);

        let transaction_id = self.next_txn_id;
        self.next_txn_id += 1;

        Ok(TransactionRow {
            transaction_id,
            transaction_time: event.timestamp,
            transaction_amount: event.amount,
            name: sender.name.clone(),
            cpf: sender.cpf.clone(),
            receiver_name: receiver.name.clone(),
            transaction_type: event.txn_type,
            transaction_city,
            birth_date: sender.birth_date,
            address_pcode: sender.address_pcode.clone(),
            phone_number: sender.phone_number.clone(),
            acc_creation_date: sender.acc_creation_date,
            agency: sender.agency,
            account: sender.account,
            credit_score: sender.credit_score,
            device_id: sender.device_id.clone(),
            device_model: sender.device_model.clone(),
            receiver_bank,
            receiver_agency: receiver.agency,
            receiver_account: receiver.account,
            gender,
            account_type,
            device,
            receiver_acc_type,
            device_os,
            sender_id: event.sender_id,
            receiver_id: event.receiver_id,
        })
    }
}
