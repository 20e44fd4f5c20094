//! Timed events inside a measure
//!
//! An [`Event`] is a note, chord or rest with an offset and a duration in
//! quarter lengths. Beat strength and consonance are supplied from outside
//! (see [`crate::services::NotationServices`]) when the event is built.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pitch::Pitch;

/// Tolerance used for all quarter-length comparisons
pub const DURATION_EPSILON: f64 = 1e-6;

/// Pitch content of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "pitches", rename_all = "camelCase")]
pub enum PitchContent {
    Rest,
    Note(Pitch),
    Chord(Vec<Pitch>),
}

impl PitchContent {
    /// Build content from a list of pitches: none → rest, one → note, more → chord
    pub fn from_pitches(mut pitches: Vec<Pitch>) -> Self {
        match pitches.len() {
            0 => PitchContent::Rest,
            1 => PitchContent::Note(pitches.remove(0)),
            _ => PitchContent::Chord(pitches),
        }
    }

    /// All pitches, in stored order
    pub fn pitches(&self) -> &[Pitch] {
        match self {
            PitchContent::Rest => &[],
            PitchContent::Note(pitch) => std::slice::from_ref(pitch),
            PitchContent::Chord(pitches) => pitches,
        }
    }

    pub fn pitches_mut(&mut self) -> &mut [Pitch] {
        match self {
            PitchContent::Rest => &mut [],
            PitchContent::Note(pitch) => std::slice::from_mut(pitch),
            PitchContent::Chord(pitches) => pitches,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, PitchContent::Rest)
    }

    /// Order-independent pitch-class set of this content
    pub fn pitch_class_key(&self) -> PitchClassKey {
        PitchClassKey::from_pitches(self.pitches())
    }

    /// Whether two contents sound identically for tie purposes:
    /// equal single notes, or chords with pairwise-equal pitches in order
    pub fn ties_with(&self, other: &PitchContent) -> bool {
        match (self, other) {
            (PitchContent::Note(a), PitchContent::Note(b)) => a.same_pitch(b),
            (PitchContent::Chord(a), PitchContent::Chord(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same_pitch(y))
            }
            _ => false,
        }
    }
}

/// Sorted, de-duplicated set of pitch classes (0-11)
///
/// Used as the grouping identity when weighting and selecting sonorities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClassKey(Vec<u8>);

impl PitchClassKey {
    pub fn from_pitches(pitches: &[Pitch]) -> Self {
        let mut classes: Vec<u8> = pitches.iter().map(|p| p.pitch_class()).collect();
        classes.sort_unstable();
        classes.dedup();
        PitchClassKey(classes)
    }

    pub fn from_classes(classes: &[u8]) -> Self {
        let mut classes: Vec<u8> = classes.iter().map(|c| c % 12).collect();
        classes.sort_unstable();
        classes.dedup();
        PitchClassKey(classes)
    }

    pub fn classes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PitchClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// Tie marking on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieType {
    Start,
    Continue,
    Stop,
}

/// One musical occurrence inside a measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Start time within the measure, in quarter lengths
    pub offset: f64,

    /// Duration in quarter lengths (must be positive)
    pub duration: f64,

    pub content: PitchContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie: Option<TieType>,

    /// Metrical prominence at `offset`, in [0, 1]
    #[serde(default = "default_beat_strength")]
    pub beat_strength: f64,

    #[serde(default)]
    pub consonant: bool,
}

fn default_beat_strength() -> f64 {
    1.0
}

impl Event {
    pub fn new(offset: f64, duration: f64, content: PitchContent) -> Self {
        Event {
            offset,
            duration,
            content,
            tie: None,
            beat_strength: default_beat_strength(),
            consonant: false,
        }
    }

    pub fn rest(offset: f64, duration: f64) -> Self {
        Self::new(offset, duration, PitchContent::Rest)
    }

    pub fn note(offset: f64, duration: f64, pitch: Pitch) -> Self {
        Self::new(offset, duration, PitchContent::Note(pitch))
    }

    pub fn chord(offset: f64, duration: f64, pitches: Vec<Pitch>) -> Self {
        Self::new(offset, duration, PitchContent::Chord(pitches))
    }

    /// End time within the measure
    pub fn end(&self) -> f64 {
        self.offset + self.duration
    }

    pub fn is_rest(&self) -> bool {
        self.content.is_rest()
    }

    pub fn is_note(&self) -> bool {
        matches!(self.content, PitchContent::Note(_))
    }

    pub fn is_chord(&self) -> bool {
        matches!(self.content, PitchContent::Chord(_))
    }

    pub fn pitches(&self) -> &[Pitch] {
        self.content.pitches()
    }

    pub fn pitch_class_key(&self) -> PitchClassKey {
        self.content.pitch_class_key()
    }

    /// Drop tie markings and accidental display overrides
    pub fn reset_presentation(&mut self) {
        self.tie = None;
        for pitch in self.content.pitches_mut() {
            pitch.accidental_display = None;
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:.1}}} ", self.offset)?;
        match &self.content {
            PitchContent::Rest => write!(f, "<Rest {}ql>", self.duration),
            PitchContent::Note(pitch) => write!(f, "<Note {}>", pitch),
            PitchContent::Chord(pitches) => {
                let names: Vec<String> = pitches.iter().map(|p| p.name()).collect();
                write!(f, "<Chord {}>", names.join(" "))
            }
        }
    }
}
