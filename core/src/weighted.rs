//! Typed weighted tables and the single weighted-choice utility.
//!
//! Every categorical field is an enum with a static `(variant, weight)`
//! table. Drawing walks the cumulative weights against one uniform roll,
//! so each draw consumes exactly one value from the stream.

use crate::rng::SimRng;

/// A categorical value with a fixed weighted distribution.
pub trait Weighted: Copy + 'static {
    const TABLE: &'static [(Self, f64)];

    fn draw(rng: &mut SimRng) -> Self {
        weighted_choice(Self::TABLE, rng)
    }
}

/// Draw one entry from a `(value, weight)` table.
/// Weights need not sum to 1.0; they are normalised by their total.
pub fn weighted_choice<T: Copy>(table: &[(T, f64)], rng: &mut SimRng) -> T {
    assert!(!table.is_empty(), "weighted table must not be empty");
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let roll = rng.next_f64() * total;
    let mut cumulative = 0.0;
    for (value, weight) in table {
        cumulative += weight;
        if roll < cumulative {
            return *value;
        }
    }
    // Float drift on the last bucket.
    table[table.len() - 1].0
}
