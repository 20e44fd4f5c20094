//! Final notation pass over the reduced part
//!
//! Decides accidental display per measure: an altered pitch shows its sharp
//! on first appearance and hides it on repetition; a natural pitch shows a
//! natural sign when its letter was altered earlier in the same octave.
//! Accidental state resets at every barline.

use crate::models::{OutputPart, TieType};

pub fn make_accidentals(part: &mut OutputPart) {
    for measure in &mut part.measures {
        // (letter, octave, midi) of alterations currently in force
        let mut altered: Vec<(u8, i8, u8)> = Vec::new();

        for event in &mut measure.events {
            let tied_over = matches!(event.tie, Some(TieType::Stop) | Some(TieType::Continue));

            for pitch in event.content.pitches_mut() {
                if tied_over {
                    pitch.accidental_display = Some(false);
                    continue;
                }

                let letter = pitch.letter_index();
                let octave = pitch.octave();
                let in_force = altered
                    .iter()
                    .position(|&(l, o, _)| l == letter && o == octave);

                if pitch.is_altered() {
                    let already_shown = in_force.is_some_and(|i| altered[i].2 == pitch.midi);
                    pitch.accidental_display = Some(!already_shown);
                    if !already_shown {
                        altered.push((letter, octave, pitch.midi));
                    }
                } else if let Some(i) = in_force {
                    pitch.accidental_display = Some(true);
                    altered.remove(i);
                } else {
                    pitch.accidental_display = Some(false);
                }
            }
        }
    }
}
