//! Weighting policies
//!
//! Each policy scores one event's contribution to the importance of its
//! pitch-class group within a measure. Position and count are passed
//! explicitly, so every policy is a pure function of its arguments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ReduceError;
use crate::models::Event;

/// Multiplier applied to dissonant events by [`WeightingPolicy::ConsonanceWeighted`]
pub const DISSONANCE_FACTOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightingPolicy {
    /// Duration alone
    DurationOnly,
    /// Duration × beat strength
    DurationBeatStrength,
    /// Duration × beat strength, with the last event counted at full strength
    DurationBeatStrengthPositional,
    /// Positional weighting, scaled down for dissonant events
    #[default]
    ConsonanceWeighted,
}

impl WeightingPolicy {
    pub const ALL: [WeightingPolicy; 4] = [
        WeightingPolicy::DurationOnly,
        WeightingPolicy::DurationBeatStrength,
        WeightingPolicy::DurationBeatStrengthPositional,
        WeightingPolicy::ConsonanceWeighted,
    ];

    /// Score `event`, the `position`-th of `count` weighted events in its measure
    pub fn weigh(&self, event: &Event, position: usize, count: usize) -> f64 {
        match self {
            WeightingPolicy::DurationOnly => duration_only(event),
            WeightingPolicy::DurationBeatStrength => duration_beat_strength(event),
            WeightingPolicy::DurationBeatStrengthPositional => {
                duration_beat_strength_positional(event, position, count)
            }
            WeightingPolicy::ConsonanceWeighted => consonance_weighted(event, position, count),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeightingPolicy::DurationOnly => "durationOnly",
            WeightingPolicy::DurationBeatStrength => "durationBeatStrength",
            WeightingPolicy::DurationBeatStrengthPositional => "durationBeatStrengthPositional",
            WeightingPolicy::ConsonanceWeighted => "consonanceWeighted",
        }
    }
}

impl FromStr for WeightingPolicy {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeightingPolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == s)
            .ok_or_else(|| ReduceError::InvalidOptions(format!("unknown weighting policy '{}'", s)))
    }
}

impl fmt::Display for WeightingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_last(position: usize, count: usize) -> bool {
    count > 0 && position == count - 1
}

pub fn duration_only(event: &Event) -> f64 {
    event.duration
}

pub fn duration_beat_strength(event: &Event) -> f64 {
    event.duration * event.beat_strength
}

/// The last event of a measure is treated as having beat strength 1
pub fn duration_beat_strength_positional(event: &Event, position: usize, count: usize) -> f64 {
    if is_last(position, count) {
        event.duration
    } else {
        duration_beat_strength(event)
    }
}

pub fn consonance_weighted(event: &Event, position: usize, count: usize) -> f64 {
    let factor = if event.consonant { 1.0 } else { DISSONANCE_FACTOR };
    if is_last(position, count) {
        return event.duration * factor;
    }
    duration_beat_strength_positional(event, position, count) * factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pitch;

    fn event(duration: f64, beat_strength: f64, consonant: bool) -> Event {
        let mut e = Event::note(0.0, duration, Pitch::new(60));
        e.beat_strength = beat_strength;
        e.consonant = consonant;
        e
    }

    #[test]
    fn test_duration_only_ignores_everything_else() {
        let e = event(1.5, 0.25, false);
        assert_eq!(WeightingPolicy::DurationOnly.weigh(&e, 0, 4), 1.5);
    }

    #[test]
    fn test_duration_beat_strength() {
        let e = event(2.0, 0.5, true);
        assert_eq!(WeightingPolicy::DurationBeatStrength.weigh(&e, 3, 4), 1.0);
    }

    #[test]
    fn test_positional_override_on_last_event() {
        let e = event(2.0, 0.25, true);
        let policy = WeightingPolicy::DurationBeatStrengthPositional;
        assert_eq!(policy.weigh(&e, 0, 2), 0.5);
        assert_eq!(policy.weigh(&e, 1, 2), 2.0);
    }

    #[test]
    fn test_consonance_factor() {
        let policy = WeightingPolicy::ConsonanceWeighted;
        let consonant = event(1.0, 0.5, true);
        let dissonant = event(1.0, 0.5, false);

        assert!((policy.weigh(&consonant, 0, 3) - 0.5).abs() < 1e-12);
        assert!((policy.weigh(&dissonant, 0, 3) - 0.05).abs() < 1e-12);
        // last position bypasses beat strength but keeps the factor
        assert!((policy.weigh(&dissonant, 2, 3) - 0.1).abs() < 1e-12);
        assert!((policy.weigh(&consonant, 2, 3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(WeightingPolicy::default(), WeightingPolicy::ConsonanceWeighted);
    }

    #[test]
    fn test_policy_names_round_trip() {
        for policy in WeightingPolicy::ALL {
            assert_eq!(policy.name().parse::<WeightingPolicy>().unwrap(), policy);
        }
        assert!("loudest".parse::<WeightingPolicy>().is_err());
    }

    #[test]
    fn test_serde_names_match() {
        let json = serde_json::to_string(&WeightingPolicy::DurationBeatStrengthPositional).unwrap();
        assert_eq!(json, "\"durationBeatStrengthPositional\"");
    }
}
