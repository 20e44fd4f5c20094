//! Per-measure chord weights
//!
//! Groups a measure's pitched events by pitch-class set and sums their
//! weighted scores. The table keeps discovery order, which is the
//! tie-breaker when ranking equal scores.

use serde::Serialize;

use super::weighting::WeightingPolicy;
use crate::models::{Event, PitchClassKey};

/// Ordered mapping from pitch-class set to accumulated score
///
/// Returns Vec-backed storage to maintain insertion order (unlike HashMap)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightTable {
    entries: Vec<(PitchClassKey, f64)>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `score` to `key`, inserting it at the end if unseen
    pub fn add(&mut self, key: PitchClassKey, score: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 += score;
        } else {
            self.entries.push((key, score));
        }
    }

    pub fn get(&self, key: &PitchClassKey) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| *s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in discovery order
    pub fn entries(&self) -> &[(PitchClassKey, f64)] {
        &self.entries
    }

    /// Entries by descending score; equal scores keep discovery order
    pub fn ranked(&self) -> Vec<(PitchClassKey, f64)> {
        let mut ranked = self.entries.clone();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Build the weight table for a measure's events
///
/// Rests are skipped and do not count toward the event total used for
/// positional weighting.
pub fn compute_measure_chord_weights(events: &[Event], policy: WeightingPolicy) -> WeightTable {
    let pitched: Vec<&Event> = events.iter().filter(|e| !e.is_rest()).collect();
    let count = pitched.len();

    let mut table = WeightTable::new();
    for (position, event) in pitched.iter().enumerate() {
        table.add(event.pitch_class_key(), policy.weigh(event, position, count));
    }
    table
}
