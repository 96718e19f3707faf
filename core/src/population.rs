//! Account population — canonical profiles generated once per run.
//!
//! Every transaction row copies sender/receiver fields from these
//! profiles, so a profile is never regenerated or mutated after this step.

use crate::{
    clock::{date_between, years_after, years_before, ReferenceClock},
    error::{GenError, GenResult},
    profile_fields::{ProfileFields, UniqueIds},
    rng::SimRng,
    types::AccountId,
    weighted::Weighted,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accounts per requested transaction row.
pub const ACCOUNTS_PER_ROW: f64 = 0.45;

pub const ACCOUNT_ID_PATTERN: &str = "acc######";

pub const CREDIT_SCORE_MEAN: f64 = 600.0;
pub const CREDIT_SCORE_STD: f64 = 150.0;
pub const CREDIT_SCORE_MIN: u16 = 300;
pub const CREDIT_SCORE_MAX: u16 = 850;

/// How far back account opening dates reach.
pub const ACCOUNT_HISTORY_YEARS: u32 = 5;
pub const MIN_HOLDER_AGE: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub address_pcode: String,
    pub phone_number: String,
    pub acc_creation_date: NaiveDate,
    pub agency: u32,
    pub account: u32,
    pub credit_score: u16,
    pub device_id: String,
    pub device_model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub profile: AccountProfile,
}

/// Age bracket of the account holder, mapped to disjoint age ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBracket {
    Young,
    Adult,
    Mid,
    Senior,
}

impl Weighted for AgeBracket {
    const TABLE: &'static [(Self, f64)] = &[
        (AgeBracket::Young, 0.20),
        (AgeBracket::Adult, 0.45),
        (AgeBracket::Mid, 0.25),
        (AgeBracket::Senior, 0.10),
    ];
}

impl AgeBracket {
    /// Inclusive age range in whole years on the reference date.
    pub fn ages(&self) -> (u32, u32) {
        match self {
            Self::Young  => (18, 25),
            Self::Adult  => (26, 40),
            Self::Mid    => (41, 60),
            Self::Senior => (61, 90),
        }
    }

    /// Birth dates that put the holder inside this bracket on `today`.
    pub fn birth_window(&self, today: NaiveDate) -> GenResult<(NaiveDate, NaiveDate)> {
        let (min_age, max_age) = self.ages();
        let latest = years_before(today, min_age)?;
        let earliest = years_before(today, max_age + 1)? + chrono::Duration::days(1);
        Ok((earliest, latest))
    }
}

/// Number of accounts backing a run of `target_rows` transactions.
pub fn account_count_for(target_rows: usize) -> usize {
    (target_rows as f64 * ACCOUNTS_PER_ROW).floor() as usize
}

/// The frozen account table, in generation order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
}

impl Population {
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        let index = accounts
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        Self { accounts, index }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.index.get(id).map(|&i| &self.accounts[i])
    }

    /// Canonical profile for `id`; an unknown id is a generator bug.
    pub fn profile(&self, id: &str) -> GenResult<&AccountProfile> {
        self.get(id)
            .map(|a| &a.profile)
            .ok_or_else(|| GenError::UnknownAccount { id: id.to_string() })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn ids(&self) -> Vec<AccountId> {
        self.accounts.iter().map(|a| a.id.clone()).collect()
    }

    /// Uniformly draw any account id.
    pub fn draw<'a>(&'a self, rng: &mut SimRng) -> GenResult<&'a AccountId> {
        rng.pick(&self.accounts)
            .map(|a| &a.id)
            .ok_or(GenError::PopulationTooSmall { available: 0, needed: 1 })
    }

    /// Uniformly draw an account id different from `other`.
    pub fn draw_other<'a>(&'a self, other: &str, rng: &mut SimRng) -> GenResult<&'a AccountId> {
        if self.len() < 2 {
            return Err(GenError::PopulationTooSmall { available: self.len(), needed: 2 });
        }
        loop {
            let id = self.draw(rng)?;
            if id != other {
                return Ok(id);
            }
        }
    }
}

pub struct AccountPopulationGenerator {
    clock: ReferenceClock,
    ids: UniqueIds,
}

impl AccountPopulationGenerator {
    pub fn new(clock: ReferenceClock) -> Self {
        Self { clock, ids: UniqueIds::new() }
    }

    /// Generate `count` accounts. Fails on the first field that cannot be
    /// drawn; no partial population is returned.
    pub fn generate(&mut self, count: usize, rng: &mut SimRng) -> GenResult<Population> {
        let mut accounts = Vec::with_capacity(count);
        for _ in 0..count {
            accounts.push(self.generate_account(rng)?);
        }
        log::debug!("population: generated {} accounts", accounts.len());
        Ok(Population::from_accounts(accounts))
    }

    fn generate_account(&mut self, rng: &mut SimRng) -> GenResult<Account> {
        let today = self.clock.today();
        let id = self.ids.issue(ACCOUNT_ID_PATTERN, rng)?;
        let name = ProfileFields::full_name(rng);
        let cpf = ProfileFields::cpf(rng);

        let bracket = AgeBracket::draw(rng);
        let (earliest, latest) = bracket.birth_window(today)?;
        let birth_date = date_between(earliest, latest, rng);

        let address_pcode = ProfileFields::postcode(rng);
        let phone_number = ProfileFields::phone_number(rng);

        // Opened within the history window, never before the holder was an adult.
        let history_start = years_before(today, ACCOUNT_HISTORY_YEARS)?;
        let adult_from = years_after(birth_date, MIN_HOLDER_AGE)?;
        let acc_creation_date = date_between(history_start.max(adult_from), today, rng);

        let agency = ProfileFields::random_number(4, rng);
        let account = ProfileFields::random_number(6, rng);
        let credit_score = draw_credit_score(rng);
        let device_id = ProfileFields::bothify("dv##", rng);
        let device_model = ProfileFields::bothify("md##", rng);

        Ok(Account {
            id,
            profile: AccountProfile {
                name,
                cpf,
                birth_date,
                address_pcode,
                phone_number,
                acc_creation_date,
                agency,
                account,
                credit_score,
                device_id,
                device_model,
            },
        })
    }
}

/// Bell-shaped score, rounded and clamped to the bureau range.
pub fn draw_credit_score(rng: &mut SimRng) -> u16 {
    let raw = rng.normal(CREDIT_SCORE_MEAN, CREDIT_SCORE_STD).round();
    raw.clamp(CREDIT_SCORE_MIN as f64, CREDIT_SCORE_MAX as f64) as u16
}
