//! Chordify: collapse a measure stack into one event sequence
//!
//! Every onset and release across all parts becomes a segment boundary.
//! Each segment turns into a note, chord or rest holding whatever is sounding
//! in any part during that span.

use crate::models::{Event, Measure, Pitch, PitchContent, DURATION_EPSILON};
use crate::reduction::errors::Result;

/// Flatten the parts of one measure into a single event sequence
///
/// Beat strength and consonance are left at their defaults; the caller
/// annotates them (see [`super::NotationServices::chordify`]).
pub fn chordify_stack(stack: &[&Measure]) -> Result<Vec<Event>> {
    for measure in stack {
        measure.validate()?;
    }

    let mut boundaries: Vec<f64> = stack
        .iter()
        .flat_map(|m| m.events.iter())
        .flat_map(|e| [e.offset, e.end()])
        .collect();
    boundaries.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    boundaries.dedup_by(|a, b| (*a - *b).abs() < DURATION_EPSILON);

    let mut events = Vec::new();
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);

        let mut sounding: Vec<Pitch> = Vec::new();
        let mut covered = false;
        for event in stack.iter().flat_map(|m| m.events.iter()) {
            if event.offset < end - DURATION_EPSILON && event.end() > start + DURATION_EPSILON {
                covered = true;
                for pitch in event.pitches() {
                    if !sounding.iter().any(|p| p.same_pitch(pitch)) {
                        sounding.push(Pitch::new(pitch.midi));
                    }
                }
            }
        }

        if !covered {
            // nothing in any part; the reducer absorbs the gap
            continue;
        }

        sounding.sort_by_key(|p| p.midi);
        events.push(Event::new(start, end - start, PitchContent::from_pitches(sounding)));
    }

    Ok(events)
}
