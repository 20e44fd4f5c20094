//! Chord voicing transforms
//!
//! Both transforms are pure: they take content by reference and return a
//! new value.

use crate::models::{Pitch, PitchContent};

/// Compress a chord into closed position above its lowest pitch
///
/// The bass stays where it is unless `force_octave` is given, in which case
/// it moves into that octave. Every other pitch is folded into the octave
/// just above the bass. Notes and rests are returned unchanged.
pub fn closed_position(content: &PitchContent, force_octave: Option<i8>) -> PitchContent {
    let PitchContent::Chord(pitches) = content else {
        return content.clone();
    };
    let Some(bass) = pitches.iter().min_by_key(|p| p.midi).copied() else {
        return content.clone();
    };

    let bass_midi = match force_octave {
        Some(octave) => {
            let midi = (octave as i16 + 1) * 12 + bass.pitch_class() as i16;
            midi.clamp(0, 127) as u8
        }
        None => bass.midi,
    };

    let mut voiced: Vec<Pitch> = pitches
        .iter()
        .map(|p| {
            let above = (p.pitch_class() + 12 - bass_midi % 12) % 12;
            let midi = (bass_midi as u16 + above as u16).min(127) as u8;
            Pitch { midi, ..*p }
        })
        .collect();
    voiced.sort_by_key(|p| p.midi);

    PitchContent::Chord(voiced)
}

/// Drop pitches that repeat an earlier pitch exactly
pub fn remove_redundant_pitches(content: &PitchContent) -> PitchContent {
    match content {
        PitchContent::Chord(pitches) => {
            let mut unique: Vec<Pitch> = Vec::with_capacity(pitches.len());
            for pitch in pitches {
                if !unique.iter().any(|p| p.same_pitch(pitch)) {
                    unique.push(*pitch);
                }
            }
            if unique.len() == 1 {
                PitchContent::Note(unique[0])
            } else {
                PitchContent::Chord(unique)
            }
        }
        other => other.clone(),
    }
}
