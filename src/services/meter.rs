//! Beat strength from a metre hierarchy
//!
//! A bar is split recursively: first into its beats (or beat groups), then
//! into halves (or thirds for compound beats). An offset that first lands on
//! the grid at depth `k` has strength `1 / 2^k`, so the downbeat is 1.0.

use num_rational::Ratio;

use crate::models::{TimeSignature, DURATION_EPSILON};

/// Grid levels examined below the bar
const MAX_DEPTH: usize = 8;

/// Division factor applied at each level of the metre hierarchy
///
/// 4/4 → [2, 2, 2, ...], 3/4 → [3, 2, ...], 6/8 → [2, 3, 2, ...],
/// 12/8 → [2, 2, 3, 2, ...], 5/4 → [5, 2, ...]
pub fn division_factors(ts: &TimeSignature) -> Vec<u32> {
    let mut factors = Vec::new();

    if ts.is_compound() {
        factors.extend(beat_group_factors(ts.numerator / 3));
        factors.push(3);
    } else {
        factors.extend(beat_group_factors(ts.numerator));
    }

    while factors.len() < MAX_DEPTH {
        factors.push(2);
    }
    factors
}

fn beat_group_factors(beats: u32) -> Vec<u32> {
    if beats <= 1 {
        vec![]
    } else if beats.is_power_of_two() {
        vec![2; beats.trailing_zeros() as usize]
    } else {
        vec![beats]
    }
}

/// Metrical strength of `offset` (quarter lengths from the barline)
///
/// # Examples
/// ```
/// use chord_reducer_wasm::models::TimeSignature;
/// use chord_reducer_wasm::services::meter::beat_strength;
///
/// let ts = TimeSignature::new(4, 4).unwrap();
/// assert_eq!(beat_strength(0.0, &ts), 1.0);
/// assert_eq!(beat_strength(2.0, &ts), 0.5);
/// assert_eq!(beat_strength(1.0, &ts), 0.25);
/// ```
pub fn beat_strength(offset: f64, ts: &TimeSignature) -> f64 {
    let bar = ts.bar_ratio();
    let bar_length = *bar.numer() as f64 / *bar.denom() as f64;
    let position = offset.rem_euclid(bar_length);

    let mut step = bar;
    let mut strength = 1.0;
    for factor in std::iter::once(1).chain(division_factors(ts)) {
        step /= Ratio::from_integer(factor as i64);
        if factor != 1 {
            strength /= 2.0;
        }
        let step_length = *step.numer() as f64 / *step.denom() as f64;
        let steps = position / step_length;
        if (steps - steps.round()).abs() * step_length < DURATION_EPSILON {
            return strength;
        }
    }

    strength / 2.0
}
