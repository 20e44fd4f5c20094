//! Measure reduction
//!
//! Reduces one chordified measure to a handful of representative chords:
//!
//! ```text
//! events → weight table → kept pitch-class sets → greedy merge → smoothing
//! ```
//!
//! The merge is a single greedy pass: a new chord starts exactly where the
//! next kept sonority begins, and everything else (trimmed sonorities,
//! repeats of the open sonority, rests, gaps) lengthens the chord that is
//! currently open. The first surviving chord always starts at offset 0.

use serde::{Deserialize, Serialize};

use super::errors::{ReduceError, Result};
use super::options::{check_max_chords, check_trim_below, ReductionOptions};
use super::weighting::WeightingPolicy;
use super::weights::{compute_measure_chord_weights, WeightTable};
use crate::models::{Event, Measure, PitchClassKey, DURATION_EPSILON};

/// Fractional beat offsets (in thousandths) that count as short syncopations.
/// 62 and 63 both stand for 1/16 of a beat, depending on rounding.
const SYNCOPATION_MARKERS: [i64; 5] = [250, 125, 333, 63, 62];

/// Result of reducing one measure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReducedMeasure {
    /// Number of the source measure
    pub number: usize,
    /// Contiguous events starting at offset 0
    pub events: Vec<Event>,
}

impl ReducedMeasure {
    pub fn duration(&self) -> f64 {
        self.events.iter().map(|e| e.duration).sum()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of distinct pitch-class sets among the events
    pub fn distinct_sonorities(&self) -> usize {
        let mut keys: Vec<PitchClassKey> = Vec::new();
        for event in self.events.iter().filter(|e| !e.is_rest()) {
            let key = event.pitch_class_key();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys.len()
    }
}

/// Reduces single measures with a fixed configuration
#[derive(Debug, Clone, Copy)]
pub struct MeasureReducer {
    pub max_chords: usize,
    pub trim_below: f64,
    pub policy: WeightingPolicy,
}

impl MeasureReducer {
    pub fn new(max_chords: usize, policy: WeightingPolicy, trim_below: f64) -> Self {
        MeasureReducer {
            max_chords,
            trim_below,
            policy,
        }
    }

    pub fn from_options(options: &ReductionOptions) -> Self {
        Self::new(options.max_chords, options.weighting, options.trim_below)
    }

    pub fn weights(&self, measure: &Measure) -> WeightTable {
        compute_measure_chord_weights(&measure.events, self.policy)
    }

    /// Reduce `measure` to at most `max_chords` distinct sonorities spanning
    /// the whole measure
    pub fn reduce(&self, measure: &Measure) -> Result<ReducedMeasure> {
        check_max_chords(self.max_chords)?;
        check_trim_below(self.trim_below)?;
        measure.validate()?;
        if measure.events.is_empty() {
            return Err(ReduceError::MalformedMeasure {
                measure: measure.number,
                reason: "measure has no events".to_string(),
            });
        }

        let table = self.weights(measure);
        let kept = select_kept_keys(&table, self.max_chords, self.trim_below);

        let events = if kept.is_empty() {
            log::debug!("measure {}: no pitched events, replacing with a rest", measure.number);
            vec![Event::rest(0.0, measure.duration())]
        } else {
            let mut merged = greedy_merge(&measure.events, &kept);
            smooth_syncopations(&mut merged);
            merged
        };

        let reduced = ReducedMeasure {
            number: measure.number,
            events,
        };

        let expected = measure.duration();
        let actual = reduced.duration();
        if (expected - actual).abs() > DURATION_EPSILON {
            return Err(ReduceError::DurationDrift {
                measure: measure.number,
                expected,
                actual,
            });
        }

        log::debug!(
            "measure {}: {} events, {} sonorities → {} chords",
            measure.number,
            measure.events.len(),
            table.len(),
            reduced.len()
        );

        Ok(reduced)
    }
}

/// Reduce a measure with explicit parameters
pub fn reduce_measure_to_n_chords(
    measure: &Measure,
    max_chords: usize,
    policy: WeightingPolicy,
    trim_below: f64,
) -> Result<ReducedMeasure> {
    MeasureReducer::new(max_chords, policy, trim_below).reduce(measure)
}

/// Pick the top `max_chords` pitch-class sets, then drop everything from the
/// first candidate scoring below `top * trim_below`
pub fn select_kept_keys(table: &WeightTable, max_chords: usize, trim_below: f64) -> Vec<PitchClassKey> {
    let ranked = table.ranked();
    let limit = max_chords.min(ranked.len());
    let Some((_, max_score)) = ranked.first() else {
        return Vec::new();
    };
    let threshold = max_score * trim_below;

    ranked
        .iter()
        .take(limit)
        .take_while(|(_, score)| *score >= threshold)
        .map(|(key, _)| key.clone())
        .collect()
}

/// Keep one event per run of a kept sonority and stretch it over everything
/// up to the next kept sonority
fn greedy_merge(events: &[Event], kept: &[PitchClassKey]) -> Vec<Event> {
    let mut output: Vec<Event> = Vec::new();
    let mut open_key: Option<PitchClassKey> = None;
    let mut span = 0.0;
    let mut cursor = 0.0;

    for event in events {
        let gap = (event.offset - cursor).max(0.0);
        cursor = event.end();

        let key = event.pitch_class_key();
        let starts_new_chord = kept.contains(&key) && open_key.as_ref() != Some(&key);

        if !starts_new_chord {
            span += gap + event.duration;
            continue;
        }

        let mut chord = event.clone();
        match output.last_mut() {
            Some(previous) => {
                previous.duration = span + gap;
                span = 0.0;
            }
            None => {
                // leading material belongs to the first chord
                span = chord.offset;
                chord.offset = 0.0;
            }
        }
        chord.reset_presentation();
        span += chord.duration;
        open_key = Some(key);
        output.push(chord);
    }

    if let Some(last) = output.last_mut() {
        last.duration = span;
    }

    output
}

/// Move chords that start just after a beat back onto the beat
fn smooth_syncopations(events: &mut [Event]) {
    for i in 1..events.len() {
        let offset = events[i].offset;
        let beat = offset.floor();
        let fraction = offset - beat;
        let thousandths = (fraction * 1000.0).round() as i64;

        if !SYNCOPATION_MARKERS.contains(&thousandths) {
            continue;
        }
        if events[i - 1].duration - fraction <= DURATION_EPSILON {
            // would swallow the previous chord entirely
            continue;
        }

        events[i - 1].duration -= fraction;
        events[i].offset = beat;
        events[i].duration += fraction;
    }
}
