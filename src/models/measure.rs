//! Measures, parts and multi-part scores
//!
//! A [`Score`] is a list of parts with (nominally) equal measure counts.
//! Measure `i` of every part together forms a measure stack, which is what
//! gets chordified and reduced.

use serde::{Deserialize, Serialize};

use super::event::{Event, DURATION_EPSILON};
use super::time_signature::TimeSignature;
use crate::reduction::errors::{ReduceError, Result};

/// One bar of one part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    #[serde(default)]
    pub number: usize,

    /// Time signature stated in this measure (None = inherited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<TimeSignature>,

    /// Events in temporal order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Measure {
    pub fn new(number: usize, events: Vec<Event>) -> Self {
        Measure {
            number,
            time_signature: None,
            events,
        }
    }

    pub fn with_time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = Some(time_signature);
        self
    }

    /// Highest end time of any event (0 for an empty measure)
    pub fn duration(&self) -> f64 {
        self.events.iter().map(Event::end).fold(0.0, f64::max)
    }

    /// True when the measure holds no notes, chords or rests
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check structural consistency: finite non-negative offsets, positive
    /// durations, events in temporal order without overlaps
    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: String| ReduceError::MalformedMeasure {
            measure: self.number,
            reason,
        };

        let mut previous_end = 0.0;
        for (i, event) in self.events.iter().enumerate() {
            if !event.offset.is_finite() || event.offset < 0.0 {
                return Err(malformed(format!(
                    "event {} has invalid offset {}",
                    i, event.offset
                )));
            }
            if !event.duration.is_finite() || event.duration <= 0.0 {
                return Err(malformed(format!(
                    "event {} has non-positive duration {}",
                    i, event.duration
                )));
            }
            if event.offset + DURATION_EPSILON < previous_end {
                return Err(malformed(format!(
                    "event {} at offset {} overlaps previous event ending at {}",
                    i, event.offset, previous_end
                )));
            }
            previous_end = event.end();
        }

        Ok(())
    }
}

/// One instrument/voice line of a score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub name: String,
    pub measures: Vec<Measure>,
}

/// Multi-part input score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub parts: Vec<Part>,
}

impl Score {
    /// Largest measure count across parts
    pub fn measure_count(&self) -> usize {
        self.parts.iter().map(|p| p.measures.len()).max().unwrap_or(0)
    }

    /// Measure `index` of every part that has one
    pub fn measure_stack(&self, index: usize) -> Vec<&Measure> {
        self.parts
            .iter()
            .filter_map(|part| part.measures.get(index))
            .collect()
    }

    /// True when no part has a note, chord or rest in measure `index`
    pub fn is_stack_empty(&self, index: usize) -> bool {
        self.measure_stack(index).iter().all(|m| m.is_empty())
    }

    /// Time signature governing measure `index`, looked up in the first part
    /// (the closest statement at or before `index`)
    pub fn time_signature_at(&self, index: usize) -> Result<TimeSignature> {
        self.parts
            .first()
            .and_then(|part| {
                part.measures
                    .iter()
                    .take(index + 1)
                    .rev()
                    .find_map(|m| m.time_signature)
            })
            .ok_or(ReduceError::MissingTimeSignature { measure: index })
    }
}
