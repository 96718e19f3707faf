//! Role partition and label table tests.

use mulesim_core::{
    config::GeneratorConfig,
    engine::generate,
    roles::Role,
};
use std::collections::HashSet;

#[test]
fn pools_partition_the_population() {
    let dataset = generate(&GeneratorConfig::default_test()).unwrap();
    let pools = &dataset.pools;

    let mules = pools.pool(Role::Mule).len();
    let bosses = pools.pool(Role::Boss).len();
    let honest = pools.pool(Role::Honest).len();
    assert_eq!(mules + bosses + honest, dataset.population.len());

    let mut seen = HashSet::new();
    for role in [Role::Mule, Role::Boss, Role::Honest] {
        for id in pools.pool(role) {
            assert!(seen.insert(id.clone()), "{id} is in more than one pool");
            assert_eq!(pools.role_of(id), Some(role));
        }
    }
    for account in dataset.population.accounts() {
        assert!(seen.contains(&account.id), "{} has no role", account.id);
    }
}

#[test]
fn pool_proportions() {
    let dataset = generate(&GeneratorConfig::default_test()).unwrap();
    let n = dataset.population.len();
    assert_eq!(dataset.pools.pool(Role::Mule).len(), n * 5 / 100);
    assert_eq!(dataset.pools.pool(Role::Boss).len(), n / 100);
}

#[test]
fn one_label_per_account() {
    let dataset = generate(&GeneratorConfig::default_test()).unwrap();
    assert_eq!(dataset.labels.len(), dataset.population.len());

    let ids: HashSet<_> = dataset.labels.iter().map(|l| l.account_id.clone()).collect();
    assert_eq!(ids.len(), dataset.labels.len(), "duplicate account ids in labels");
}

#[test]
fn labels_agree_with_pools() {
    let dataset = generate(&GeneratorConfig::default_test()).unwrap();
    for label in &dataset.labels {
        let role = dataset.pools.role_of(&label.account_id).expect("labelled id has a role");
        assert_eq!(label.role, role);
        assert_eq!(label.is_fraud, u8::from(role != Role::Honest));
    }
    let fraud = dataset.labels.iter().filter(|l| l.is_fraud == 1).count();
    assert_eq!(fraud, 45 + 9);
}

#[test]
fn label_count_independent_of_activity() {
    // Some accounts never transact; they are still labelled.
    let dataset = generate(&GeneratorConfig::default_test()).unwrap();
    let active: HashSet<&str> = dataset
        .transactions
        .iter()
        .flat_map(|t| [t.sender_id.as_str(), t.receiver_id.as_str()])
        .collect();
    assert!(active.len() <= dataset.labels.len());
    assert_eq!(dataset.labels.len(), 900);
}
