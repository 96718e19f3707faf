//! Scenario contract tests: pair structure, timing bands, amount rules,
//! row-count bound and profile consistency across the whole table.

use chrono::Duration;
use mulesim_core::{
    categorical::TxnType,
    config::GeneratorConfig,
    dataset::{Dataset, TransactionRow},
    engine::generate,
    error::GenError,
    event::round_cents,
    fraud_cycle_scenario::{FraudCycle, MuleDelay},
    noise_scenario::SalaryNoise,
    population::Population,
    rng::SimRng,
    roles::{Role, RolePools},
    scenario::{Scenario, World},
};

const EPS: f64 = 1e-4;

fn dataset() -> Dataset {
    generate(&GeneratorConfig { target_rows: 5_000, ..GeneratorConfig::default() })
        .expect("generate")
}

fn pairs(dataset: &Dataset, scenario: Scenario) -> Vec<Vec<&TransactionRow>> {
    dataset
        .scenarios
        .iter()
        .filter(|r| r.scenario == scenario)
        .map(|r| dataset.rows_for(r))
        .collect()
}

#[test]
fn row_count_within_one_of_target() {
    for target in [1_000, 1_001, 2_345, 5_000] {
        let dataset = generate(&GeneratorConfig { target_rows: target, ..GeneratorConfig::default() }).unwrap();
        let n = dataset.transactions.len();
        assert!(n == target || n == target + 1, "target {target}, got {n}");

        let from_steps: usize = dataset.scenarios.iter().map(|r| r.row_count).sum();
        assert_eq!(from_steps, n, "scenario log does not account for every row");
    }
}

#[test]
fn transaction_ids_dense_from_zero() {
    let dataset = dataset();
    for (i, row) in dataset.transactions.iter().enumerate() {
        assert_eq!(row.transaction_id, i as u64);
    }
}

#[test]
fn every_row_matches_canonical_profiles() {
    let dataset = dataset();
    for row in &dataset.transactions {
        let s = dataset.population.profile(&row.sender_id).expect("sender in population");
        let r = dataset.population.profile(&row.receiver_id).expect("receiver in population");

        assert_eq!(row.name, s.name);
        assert_eq!(row.cpf, s.cpf);
        assert_eq!(row.birth_date, s.birth_date);
        assert_eq!(row.address_pcode, s.address_pcode);
        assert_eq!(row.phone_number, s.phone_number);
        assert_eq!(row.acc_creation_date, s.acc_creation_date);
        assert_eq!(row.agency, s.agency);
        assert_eq!(row.account, s.account);
        assert_eq!(row.credit_score, s.credit_score);
        assert_eq!(row.device_id, s.device_id);
        assert_eq!(row.device_model, s.device_model);

        assert_eq!(row.receiver_name, r.name);
        assert_eq!(row.receiver_agency, r.agency);
        assert_eq!(row.receiver_account, r.account);
    }
}

#[test]
fn normal_rows_are_single_pix_between_distinct_accounts() {
    let dataset = dataset();
    let now = dataset.clock.now;
    let normals = pairs(&dataset, Scenario::Normal);
    assert!(!normals.is_empty());

    for rows in normals {
        assert_eq!(rows.len(), 1);
        let row = rows[0];
        assert_eq!(row.transaction_type, TxnType::Pix);
        assert_ne!(row.sender_id, row.receiver_id);
        assert!((10.0..=2_500.0).contains(&row.transaction_amount));
        assert!(row.transaction_time <= now);
        assert!(row.transaction_time >= now - Duration::days(90));
    }
}

#[test]
fn fraud_cycle_pairs_follow_the_laundering_topology() {
    let dataset = dataset();
    let cycles = pairs(&dataset, Scenario::FraudCycle);
    assert!(!cycles.is_empty(), "5,000 rows without a fraud cycle");

    for rows in cycles {
        assert_eq!(rows.len(), 2);
        let (entry, exit) = (rows[0], rows[1]);

        assert_eq!(dataset.pools.role_of(&entry.sender_id), Some(Role::Honest));
        assert_eq!(dataset.pools.role_of(&entry.receiver_id), Some(Role::Mule));
        assert_eq!(exit.sender_id, entry.receiver_id, "exit must leave from the same mule");
        assert_eq!(dataset.pools.role_of(&exit.receiver_id), Some(Role::Boss));
        assert_eq!(entry.transaction_type, TxnType::Pix);
        assert_eq!(exit.transaction_type, TxnType::Pix);
    }
}

#[test]
fn fraud_cycle_exit_timing_is_bimodal() {
    let dataset = dataset();
    let now = dataset.clock.now;
    let mut fast = 0;
    let mut patient = 0;

    for rows in pairs(&dataset, Scenario::FraudCycle) {
        let (entry, exit) = (rows[0], rows[1]);
        assert!(entry.transaction_time >= now - Duration::days(90));
        assert!(entry.transaction_time <= now - Duration::days(5));
        assert!(exit.transaction_time > entry.transaction_time);

        let gap = exit.transaction_time - entry.transaction_time;
        if gap >= Duration::minutes(10) && gap <= Duration::minutes(300) {
            fast += 1;
        } else if gap >= Duration::days(1) && gap <= Duration::days(4) {
            patient += 1;
        } else {
            panic!("exit gap {gap} outside both delay bands");
        }
    }
    assert!(fast > patient, "fast mules should dominate ({fast} fast, {patient} patient)");
}

#[test]
fn fraud_cycle_exit_keeps_fee_fraction() {
    let dataset = dataset();
    for rows in pairs(&dataset, Scenario::FraudCycle) {
        let (entry, exit) = (rows[0], rows[1]);
        assert!((1_000.0..=50_000.0).contains(&entry.transaction_amount));
        let kept = exit.transaction_amount / entry.transaction_amount;
        assert!(
            kept >= 0.70 - EPS && kept <= 0.99 + EPS,
            "exit keeps {kept:.4} of entry; fee outside [0.01, 0.30]"
        );
        assert_eq!(round_cents(exit.transaction_amount), exit.transaction_amount);
    }
}

#[test]
fn fraud_cycle_plan_amount_contract() {
    let dataset = dataset();
    let world = World { population: &dataset.population, pools: &dataset.pools, clock: &dataset.clock };
    let rule = FraudCycle::default();
    let mut rng = SimRng::new(77);

    for _ in 0..500 {
        let plan = rule.plan(&world, &mut rng).unwrap();
        assert!((0.01..=0.30).contains(&plan.fee));
        assert_eq!(plan.exit_amount(), round_cents(plan.entry_amount * (1.0 - plan.fee)));
        match plan.delay {
            MuleDelay::Patient { days } => assert!((1..=4).contains(&days)),
            MuleDelay::Fast { minutes } => assert!((10..=300).contains(&minutes)),
        }
        let events = plan.events();
        assert_eq!(events[1].amount, plan.exit_amount());
        assert_eq!(events[1].timestamp, plan.exit_time());
    }
}

#[test]
fn noise_pairs_spend_most_of_the_salary_quickly() {
    let dataset = dataset();
    let noise = pairs(&dataset, Scenario::Noise);
    assert!(!noise.is_empty(), "5,000 rows without a noise pair");

    for rows in noise {
        assert_eq!(rows.len(), 2);
        let (income, spend) = (rows[0], rows[1]);

        assert_eq!(income.transaction_type, TxnType::Ted);
        assert_eq!(spend.transaction_type, TxnType::Boleto);
        assert_eq!(dataset.pools.role_of(&income.receiver_id), Some(Role::Honest));
        assert_eq!(spend.sender_id, income.receiver_id);
        assert_ne!(spend.receiver_id, spend.sender_id);
        assert_ne!(income.sender_id, income.receiver_id);

        assert!((2_500.0..=15_000.0).contains(&income.transaction_amount));
        let share = spend.transaction_amount / income.transaction_amount;
        assert!(share >= 0.90 - EPS && share <= 0.99 + EPS, "spent {share:.4} of income");

        let gap = spend.transaction_time - income.transaction_time;
        assert!(gap >= Duration::minutes(5) && gap <= Duration::minutes(400), "gap {gap}");
    }
}

#[test]
fn salary_plan_is_deterministic() {
    let dataset = dataset();
    let world = World { population: &dataset.population, pools: &dataset.pools, clock: &dataset.clock };
    let rule = SalaryNoise::default();
    let a = rule.plan(&world, &mut SimRng::new(5)).unwrap();
    let b = rule.plan(&world, &mut SimRng::new(5)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_boss_pool_fails_the_run() {
    // 200 rows -> 90 accounts -> 4 mules, 0 bosses.
    let result = generate(&GeneratorConfig { target_rows: 200, ..GeneratorConfig::default() });
    match result {
        Err(GenError::EmptyPool { role }) => assert_eq!(role, Role::Boss),
        Err(other) => panic!("expected EmptyPool, got {other}"),
        Ok(d) => panic!("expected EmptyPool, got {} rows", d.transactions.len()),
    }
}

#[test]
fn fraud_cycle_rule_rejects_empty_mule_pool() {
    // Four accounts: 5% and 1% both floor to zero.
    let full = dataset();
    let population = Population::from_accounts(full.population.accounts()[..4].to_vec());
    let mut rng = SimRng::new(1);
    let pools = RolePools::assign(&population.ids(), &mut rng);
    let world = World { population: &population, pools: &pools, clock: &full.clock };

    let err = FraudCycle::default().plan(&world, &mut rng).unwrap_err();
    assert!(matches!(err, GenError::EmptyPool { role: Role::Mule }));
}

#[test]
fn patient_only_mules_wait_whole_days() {
    use mulesim_core::{
        emitter::TransactionEmitter,
        engine::DatasetEngine,
        fraud_cycle_scenario::FraudCycleParams,
        normal_scenario::NormalTransfer,
    };

    let fraud_cycle = FraudCycle {
        params: FraudCycleParams { patient_probability: 1.0, ..FraudCycleParams::default() },
    };
    let emitter = TransactionEmitter::new(NormalTransfer::default(), fraud_cycle, SalaryNoise::default());
    let dataset = DatasetEngine::new(GeneratorConfig::default_test())
        .with_emitter(emitter)
        .run()
        .unwrap();

    let cycles = pairs(&dataset, Scenario::FraudCycle);
    assert!(!cycles.is_empty());
    for rows in cycles {
        let gap = rows[1].transaction_time - rows[0].transaction_time;
        assert_eq!(gap.num_seconds() % 86_400, 0, "gap {gap} is not whole days");
        assert!((1..=4).contains(&gap.num_days()));
    }
}
