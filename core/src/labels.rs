//! Label export — ground truth per account, from pool membership alone.

use crate::{
    dataset::LabelRow,
    error::{GenError, GenResult},
    population::Population,
    roles::RolePools,
};

/// One label per account, in the shuffled order roles were assigned in.
/// Accounts that never transact are labelled too.
///
/// Every account in `population` must hold a role, and every role must
/// belong to an account; a mismatch is an error, never a default label.
pub fn export_labels(population: &Population, pools: &RolePools) -> GenResult<Vec<LabelRow>> {
    let labels = pools
        .shuffled_ids()
        .iter()
        .map(|id| {
            if population.get(id).is_none() {
                return Err(GenError::UnknownAccount { id: id.clone() });
            }
            let role = pools
                .role_of(id)
                .ok_or_else(|| GenError::UnknownAccount { id: id.clone() })?;
            Ok(LabelRow {
                account_id: id.clone(),
                is_fraud: u8::from(role.is_fraud()),
                role,
            })
        })
        .collect::<GenResult<Vec<_>>>()?;

    if let Some(unlabelled) = population.accounts().iter().find(|a| pools.role_of(&a.id).is_none()) {
        return Err(GenError::UnknownAccount { id: unlabelled.id.clone() });
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ReferenceClock, config::default_as_of, population::AccountPopulationGenerator,
        rng::SimRng, roles::Role,
    };

    fn population(n: usize, rng: &mut SimRng) -> Population {
        AccountPopulationGenerator::new(ReferenceClock::new(default_as_of()))
            .generate(n, rng)
            .unwrap()
    }

    #[test]
    fn flags_follow_roles() {
        let mut rng = SimRng::new(13);
        let population = population(300, &mut rng);
        let pools = RolePools::assign(&population.ids(), &mut rng);
        let labels = export_labels(&population, &pools).unwrap();

        assert_eq!(labels.len(), 300);
        for label in &labels {
            let expected = pools.role_of(&label.account_id).unwrap();
            assert_eq!(label.role, expected);
            assert_eq!(label.is_fraud == 1, expected != Role::Honest);
        }
        assert_eq!(labels.iter().filter(|l| l.role == Role::Mule).count(), 15);
        assert_eq!(labels.iter().filter(|l| l.role == Role::Boss).count(), 3);
    }

    #[test]
    fn account_without_role_is_an_error() {
        let mut rng = SimRng::new(13);
        let population = population(50, &mut rng);
        let ids = population.ids();
        let pools = RolePools::assign(&ids[..49], &mut rng);

        match export_labels(&population, &pools) {
            Err(GenError::UnknownAccount { id }) => assert_eq!(id, ids[49]),
            other => panic!("expected UnknownAccount, got {other:?}"),
        }
    }

    #[test]
    fn role_without_account_is_an_error() {
        let mut rng = SimRng::new(13);
        let population = population(50, &mut rng);
        let mut ids = population.ids();
        ids.push("acc999999x".to_string());
        let pools = RolePools::assign(&ids, &mut rng);

        match export_labels(&population, &pools) {
            Err(GenError::UnknownAccount { id }) => assert_eq!(id, "acc999999x"),
            other => panic!("expected UnknownAccount, got {other:?}"),
        }
    }
}
