//! Pitch representation
//!
//! Pitches are stored as MIDI note numbers (C4 = 60). Spelling is not
//! modelled: names are parsed from letter + accidental + octave and always
//! displayed with sharps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reduction::errors::ReduceError;

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// A single sounding pitch
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    /// MIDI note number (C4 = 60)
    pub midi: u8,

    /// Whether the accidental should be printed
    /// (None = undecided, filled in by notation finishing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accidental_display: Option<bool>,
}

impl Pitch {
    /// Create a pitch from a MIDI note number
    pub fn new(midi: u8) -> Self {
        Self {
            midi,
            accidental_display: None,
        }
    }

    /// Parse a pitch name such as "C4", "F#3", "Bb5" or "C##4"
    ///
    /// # Examples
    /// ```
    /// use chord_reducer_wasm::models::Pitch;
    ///
    /// assert_eq!(Pitch::from_name("C4").unwrap().midi, 60);
    /// assert_eq!(Pitch::from_name("Bb3").unwrap().midi, 58);
    /// ```
    pub fn from_name(name: &str) -> Result<Self, ReduceError> {
        let invalid = || ReduceError::InvalidPitch(name.to_string());
        let mut chars = name.trim().chars();

        let letter = chars.next().ok_or_else(invalid)?;
        let base: i16 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };

        let rest: String = chars.collect();
        let octave_start = rest
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(invalid)?;
        let (accidentals, octave) = rest.split_at(octave_start);

        let mut alter: i16 = 0;
        for c in accidentals.chars() {
            match c {
                '#' | '♯' => alter += 1,
                'b' | '♭' => alter -= 1,
                _ => return Err(invalid()),
            }
        }

        let octave: i16 = octave.parse().map_err(|_| invalid())?;
        let midi = (octave + 1) * 12 + base + alter;
        if !(0..=127).contains(&midi) {
            return Err(invalid());
        }

        Ok(Self::new(midi as u8))
    }

    /// Pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        self.midi % 12
    }

    /// Octave number in scientific pitch notation (C4 = middle C)
    pub fn octave(&self) -> i8 {
        (self.midi / 12) as i8 - 1
    }

    /// True when the pitch is a black key (spelled with a sharp)
    pub fn is_altered(&self) -> bool {
        matches!(self.pitch_class(), 1 | 3 | 6 | 8 | 10)
    }

    /// Letter index of the sharp spelling (C=0 .. B=6)
    pub fn letter_index(&self) -> u8 {
        match self.pitch_class() {
            0 | 1 => 0,
            2 | 3 => 1,
            4 => 2,
            5 | 6 => 3,
            7 | 8 => 4,
            9 | 10 => 5,
            _ => 6,
        }
    }

    /// Same sounding pitch, ignoring presentation flags
    pub fn same_pitch(&self, other: &Pitch) -> bool {
        self.midi == other.midi
    }

    /// Name with sharp spelling, e.g. "F#4"
    pub fn name(&self) -> String {
        format!("{}{}", SHARP_NAMES[self.pitch_class() as usize], self.octave())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse a space-separated list of pitch names ("C4 E4 G4")
pub fn parse_pitches(names: &str) -> Result<Vec<Pitch>, ReduceError> {
    names.split_whitespace().map(Pitch::from_name).collect()
}
