//! Deterministic fake identity and banking fields using curated pt-BR lists.
//!
//! Values look like Brazilian retail banking data (CPF, CEP, +55 phones)
//! but are entirely synthetic. All lists are pre-folded to ASCII.
//! All generation is deterministic (same RNG stream = same fields).

use crate::{
    error::{GenError, GenResult},
    rng::SimRng,
};
use std::collections::HashSet;

/// Faker-style attempt budget for a unique draw.
pub const MAX_UNIQUE_ATTEMPTS: u32 = 1_000;

/// Stateless field generator over the shared RNG.
pub struct ProfileFields;

impl ProfileFields {
    /// Full name (first + last).
    pub fn full_name(rng: &mut SimRng) -> String {
        let first = Self::pick(Self::first_names(), rng);
        let last = Self::pick(Self::last_names(), rng);
        format!("{first} {last}")
    }

    /// CPF with valid check digits, formatted `###.###.###-##`.
    pub fn cpf(rng: &mut SimRng) -> String {
        let mut digits: Vec<u32> = (0..9).map(|_| rng.next_u64_below(10) as u32).collect();
        let first = cpf_check_digit(&digits);
        digits.push(first);
        let second = cpf_check_digit(&digits);
        digits.push(second);

        let s: String = digits.iter().map(|d| char::from(b'0' + *d as u8)).collect();
        format!("{}.{}.{}-{}", &s[0..3], &s[3..6], &s[6..9], &s[9..11])
    }

    /// CEP postal code, `#####-###`.
    pub fn postcode(rng: &mut SimRng) -> String {
        Self::bothify("#####-###", rng)
    }

    /// Mobile number with a real DDD area code.
    pub fn phone_number(rng: &mut SimRng) -> String {
        let ddd = Self::pick(Self::area_codes(), rng);
        let local = Self::bothify("9####-####", rng);
        format!("+55 ({ddd}) {local}")
    }

    pub fn city(rng: &mut SimRng) -> &'static str {
        Self::pick(Self::cities(), rng)
    }

    /// Counterparty bank code, `bk##`.
    pub fn bank_code(rng: &mut SimRng) -> String {
        Self::bothify("bk##", rng)
    }

    /// Integer with at most `digits` decimal digits, in [0, 10^digits).
    pub fn random_number(digits: u32, rng: &mut SimRng) -> u32 {
        rng.next_u64_below(10u64.pow(digits)) as u32
    }

    /// Replace each `#` with a digit and each `?` with a lowercase letter.
    pub fn bothify(pattern: &str, rng: &mut SimRng) -> String {
        pattern
            .chars()
            .map(|c| match c {
                '#' => char::from(b'0' + rng.next_u64_below(10) as u8),
                '?' => char::from(b'a' + rng.next_u64_below(26) as u8),
                other => other,
            })
            .collect()
    }

    fn pick<'a>(items: &'a [&'a str], rng: &mut SimRng) -> &'a str {
        items[rng.index(items.len())]
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Ana", "Maria", "Julia", "Beatriz", "Mariana", "Larissa", "Fernanda", "Camila",
            "Leticia", "Gabriela", "Amanda", "Bruna", "Isabela", "Carolina", "Vitoria",
            "Luiza", "Helena", "Alice", "Sofia", "Manuela", "Lara", "Yasmin", "Rafaela",
            "Clara", "Livia", "Natalia", "Patricia", "Aline", "Jessica", "Sabrina",
            "Joao", "Pedro", "Lucas", "Gabriel", "Mateus", "Rafael", "Gustavo", "Felipe",
            "Bruno", "Thiago", "Rodrigo", "Leonardo", "Vinicius", "Eduardo", "Daniel",
            "Henrique", "Samuel", "Enzo", "Miguel", "Arthur", "Heitor", "Bernardo",
            "Davi", "Lorenzo", "Caio", "Murilo", "Otavio", "Vitor", "Diego", "Marcelo",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Silva", "Santos", "Oliveira", "Souza", "Rodrigues", "Ferreira", "Alves",
            "Pereira", "Lima", "Gomes", "Costa", "Ribeiro", "Martins", "Carvalho",
            "Almeida", "Lopes", "Soares", "Fernandes", "Vieira", "Barbosa", "Rocha",
            "Dias", "Nascimento", "Andrade", "Moreira", "Nunes", "Marques", "Machado",
            "Mendes", "Freitas", "Cardoso", "Ramos", "Goncalves", "Santana", "Teixeira",
            "Araujo", "Pinto", "Correia", "Cavalcanti", "Monteiro", "Moura", "Campos",
            "Peixoto", "Farias", "Duarte", "Castro", "Azevedo", "Porto", "Cunha", "Melo",
        ]
    }

    fn cities() -> &'static [&'static str] {
        &[
            "Sao Paulo", "Rio de Janeiro", "Belo Horizonte", "Brasilia", "Salvador",
            "Fortaleza", "Curitiba", "Recife", "Porto Alegre", "Manaus", "Belem",
            "Goiania", "Campinas", "Sao Luis", "Maceio", "Natal", "Teresina",
            "Joao Pessoa", "Florianopolis", "Vitoria", "Cuiaba", "Campo Grande",
            "Aracaju", "Londrina", "Uberlandia", "Ribeirao Preto", "Sorocaba",
            "Niteroi", "Juiz de Fora", "Joinville", "Santos", "Feira de Santana",
        ]
    }

    fn area_codes() -> &'static [&'static str] {
        &[
            "11", "21", "31", "41", "51", "61", "71", "81", "85", "91", "92", "62",
            "19", "98", "82", "84", "86", "83", "48", "27", "65", "67", "79", "43",
        ]
    }
}

/// Mod-11 CPF check digit over the digits so far (weights descend to 2).
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let rem = sum % 11;
    if rem < 2 { 0 } else { 11 - rem }
}

/// Issues `bothify` values that never repeat within one run.
#[derive(Debug, Default)]
pub struct UniqueIds {
    issued: HashSet<String>,
}

impl UniqueIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, pattern: &str, rng: &mut SimRng) -> GenResult<String> {
        for _ in 0..MAX_UNIQUE_ATTEMPTS {
            let candidate = ProfileFields::bothify(pattern, rng);
            if self.issued.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(GenError::UniquenessExhausted {
            pattern: pattern.to_string(),
            attempts: MAX_UNIQUE_ATTEMPTS,
        })
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
