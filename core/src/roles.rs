//! Role assignment — the single source of truth for who is a mule or boss.
//!
//! The account ids are shuffled once on the shared stream, then cut into
//! three consecutive slices. Pools are never recomputed; the emitter and
//! the label exporter both read the same `RolePools`.

use crate::{
    error::{GenError, GenResult},
    rng::SimRng,
    types::AccountId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const MULE_SHARE: f64 = 0.05;
pub const BOSS_SHARE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Honest,
    Mule,
    Boss,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Honest => "Honest",
            Self::Mule   => "Mule",
            Self::Boss   => "Boss",
        }
    }

    pub fn is_fraud(&self) -> bool {
        !matches!(self, Self::Honest)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RolePools {
    shuffled: Vec<AccountId>,
    mules: Vec<AccountId>,
    bosses: Vec<AccountId>,
    honest: Vec<AccountId>,
    roles: HashMap<AccountId, Role>,
}

impl RolePools {
    /// Shuffle `ids` and partition them: mules first, then bosses,
    /// the remainder honest.
    pub fn assign(ids: &[AccountId], rng: &mut SimRng) -> Self {
        let mut shuffled = ids.to_vec();
        rng.shuffle(&mut shuffled);

        let n_mules = (shuffled.len() as f64 * MULE_SHARE).floor() as usize;
        let n_bosses = (shuffled.len() as f64 * BOSS_SHARE).floor() as usize;

        let mules = shuffled[..n_mules].to_vec();
        let bosses = shuffled[n_mules..n_mules + n_bosses].to_vec();
        let honest = shuffled[n_mules + n_bosses..].to_vec();

        let roles = mules
            .iter()
            .map(|id| (id.clone(), Role::Mule))
            .chain(bosses.iter().map(|id| (id.clone(), Role::Boss)))
            .chain(honest.iter().map(|id| (id.clone(), Role::Honest)))
            .collect();

        if mules.is_empty() || bosses.is_empty() {
            log::warn!(
                "roles: {} accounts leave {} mules and {} bosses; fraud cycles cannot be drawn",
                shuffled.len(),
                mules.len(),
                bosses.len()
            );
        }

        Self { shuffled, mules, bosses, honest, roles }
    }

    pub fn pool(&self, role: Role) -> &[AccountId] {
        match role {
            Role::Honest => &self.honest,
            Role::Mule   => &self.mules,
            Role::Boss   => &self.bosses,
        }
    }

    pub fn role_of(&self, id: &str) -> Option<Role> {
        self.roles.get(id).copied()
    }

    /// Uniformly draw from one pool. An empty pool is fatal; substituting
    /// another pool would corrupt the labels.
    pub fn draw<'a>(&'a self, role: Role, rng: &mut SimRng) -> GenResult<&'a AccountId> {
        rng.pick(self.pool(role)).ok_or(GenError::EmptyPool { role })
    }

    /// All ids in shuffled order.
    pub fn shuffled_ids(&self) -> &[AccountId] {
        &self.shuffled
    }

    pub fn len(&self) -> usize {
        self.shuffled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shuffled.is_empty()
    }
}
