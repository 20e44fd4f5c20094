//! Notation services used by the reduction pipeline
//!
//! The reducer treats music theory and notation as black boxes behind the
//! [`NotationServices`] trait. [`StandardServices`] is the built-in
//! implementation.
//!
//! # Modules
//!
//! - **chordify**: collapse a measure stack into one event sequence
//! - **consonance**: consonant/dissonant classification
//! - **meter**: beat strength from the time signature
//! - **voicing**: closed position and duplicate-pitch removal
//! - **clef**: best-fit clef for the output part
//! - **notation**: final accidental display pass

pub mod chordify;
pub mod clef;
pub mod consonance;
pub mod meter;
pub mod notation;
pub mod voicing;

use crate::models::{Clef, Event, Measure, OutputPart, PitchContent, TimeSignature};
use crate::reduction::errors::Result;

/// Collaborator interface for everything the reducer does not compute itself
pub trait NotationServices {
    /// Collapse one measure stack into a single sequence of notes, chords
    /// and rests, annotated with beat strength and consonance
    fn chordify(&self, stack: &[&Measure], time_signature: &TimeSignature) -> Result<Vec<Event>> {
        let mut events = chordify::chordify_stack(stack)?;
        for event in &mut events {
            event.beat_strength = self.beat_strength(event.offset, time_signature);
            event.consonant = self.is_consonant(&event.content);
        }
        Ok(events)
    }

    fn is_consonant(&self, content: &PitchContent) -> bool;

    fn beat_strength(&self, offset: f64, time_signature: &TimeSignature) -> f64;

    fn closed_position(&self, content: &PitchContent, force_octave: Option<i8>) -> PitchContent;

    fn remove_redundant_pitches(&self, content: &PitchContent) -> PitchContent;

    fn best_clef(&self, part: &OutputPart, allow_treble_8vb: bool) -> Clef;

    /// Final notation pass (accidental display etc.)
    fn make_notation(&self, part: &mut OutputPart);
}

/// Default services backed by this crate's theory helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardServices;

impl NotationServices for StandardServices {
    fn is_consonant(&self, content: &PitchContent) -> bool {
        consonance::is_consonant(content)
    }

    fn beat_strength(&self, offset: f64, time_signature: &TimeSignature) -> f64 {
        meter::beat_strength(offset, time_signature)
    }

    fn closed_position(&self, content: &PitchContent, force_octave: Option<i8>) -> PitchContent {
        voicing::closed_position(content, force_octave)
    }

    fn remove_redundant_pitches(&self, content: &PitchContent) -> PitchContent {
        voicing::remove_redundant_pitches(content)
    }

    fn best_clef(&self, part: &OutputPart, allow_treble_8vb: bool) -> Clef {
        clef::best_clef(part, allow_treble_8vb)
    }

    fn make_notation(&self, part: &mut OutputPart) {
        notation::make_accidentals(part);
    }
}
