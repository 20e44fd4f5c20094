//! Automatic clef guessing based on pitch range analysis
//!
//! This module selects a clef (treble, treble 8vb or bass) for the reduced
//! part based on its pitch content.

use crate::models::{Clef, OutputPart};

/// Guess the best clef for a part based on pitch range
///
/// # Algorithm
/// 1. Collect the MIDI note numbers of every pitch in the part (C4 = 60)
/// 2. Take the median (robust to outliers)
/// 3. Median at/above middle C → treble; from E3 up → treble 8vb (when
///    allowed); lower → bass
///
/// # Examples
/// ```
/// use chord_reducer_wasm::models::{Clef, OutputPart};
/// use chord_reducer_wasm::services::clef::best_clef;
///
/// let part = OutputPart::new();
/// assert_eq!(best_clef(&part, true), Clef::Treble); // Empty parts default to treble
/// ```
pub fn best_clef(part: &OutputPart, allow_treble_8vb: bool) -> Clef {
    let mut midi_notes: Vec<u8> = part
        .events()
        .flat_map(|event| event.pitches().iter().map(|p| p.midi))
        .collect();

    if midi_notes.is_empty() {
        return Clef::Treble;
    }

    midi_notes.sort_unstable();
    let median = midi_notes[midi_notes.len() / 2];

    match median {
        60..=127 => Clef::Treble,
        52..=59 if allow_treble_8vb => Clef::Treble8vb,
        _ => Clef::Bass,
    }
}
