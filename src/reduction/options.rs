//! Reduction configuration

use serde::{Deserialize, Serialize};

use super::errors::{ReduceError, Result};
use super::weighting::WeightingPolicy;

/// Options for reducing a piece (or a single measure)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReductionOptions {
    /// Maximum chords kept per measure
    pub max_chords: usize,

    /// Re-voice chords in closed position
    pub closed_position: bool,

    /// Octave for the bass of closed-position chords (None = keep)
    pub force_octave: Option<i8>,

    /// Candidates scoring below `top score * trim_below` are dropped
    pub trim_below: f64,

    pub weighting: WeightingPolicy,
}

impl Default for ReductionOptions {
    fn default() -> Self {
        ReductionOptions {
            max_chords: 3,
            closed_position: false,
            force_octave: None,
            trim_below: 0.3,
            weighting: WeightingPolicy::default(),
        }
    }
}

impl ReductionOptions {
    pub fn with_max_chords(mut self, max_chords: usize) -> Self {
        self.max_chords = max_chords;
        self
    }

    pub fn with_trim_below(mut self, trim_below: f64) -> Self {
        self.trim_below = trim_below;
        self
    }

    pub fn with_closed_position(mut self, force_octave: Option<i8>) -> Self {
        self.closed_position = true;
        self.force_octave = force_octave;
        self
    }

    pub fn with_weighting(mut self, weighting: WeightingPolicy) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_max_chords(self.max_chords)?;
        check_trim_below(self.trim_below)?;
        if let Some(octave) = self.force_octave {
            if !(-1..=9).contains(&octave) {
                return Err(ReduceError::InvalidOptions(format!(
                    "forceOctave must be between -1 and 9, got {}",
                    octave
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_max_chords(max_chords: usize) -> Result<()> {
    if max_chords == 0 {
        return Err(ReduceError::InvalidOptions(
            "maxChords must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_trim_below(trim_below: f64) -> Result<()> {
    if !(trim_below > 0.0 && trim_below <= 1.0) {
        return Err(ReduceError::InvalidOptions(format!(
            "trimBelow must be in (0, 1], got {}",
            trim_below
        )));
    }
    Ok(())
}
