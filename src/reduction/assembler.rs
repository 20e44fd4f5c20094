//! Measure assembly
//!
//! Turns a [`ReducedMeasure`] into a finished [`OutputMeasure`]: optional
//! closed-position voicing, gap filling up to the bar length, tie
//! continuation from the previous measure and time-signature stamping.
//!
//! Cross-measure state is an explicit accumulator ([`AssemblyState`]) that
//! goes in with each call and comes back updated.

use super::errors::{ReduceError, Result};
use super::measure_reducer::ReducedMeasure;
use super::options::ReductionOptions;
use crate::models::{Event, OutputMeasure, TieType, TimeSignature, DURATION_EPSILON};
use crate::services::NotationServices;

/// State carried from one assembled measure to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyState {
    /// Final event of the previous output measure
    pub last_pitched: Option<Event>,
    /// Time signature last stamped on the output
    pub last_time_signature: Option<TimeSignature>,
}

/// An assembled measure plus the tie decision for the previous measure
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledMeasure {
    pub measure: OutputMeasure,
    /// The previous measure's final event should start a tie into this one
    pub ties_from_previous: bool,
}

pub struct MeasureAssembler<'a, S: NotationServices + ?Sized> {
    services: &'a S,
    closed_position: bool,
    force_octave: Option<i8>,
}

impl<'a, S: NotationServices + ?Sized> MeasureAssembler<'a, S> {
    pub fn new(services: &'a S, closed_position: bool, force_octave: Option<i8>) -> Self {
        MeasureAssembler {
            services,
            closed_position,
            force_octave,
        }
    }

    pub fn from_options(services: &'a S, options: &ReductionOptions) -> Self {
        Self::new(services, options.closed_position, options.force_octave)
    }

    /// Assemble measure `index` from its reduction
    ///
    /// `time_signature` is the signature governing the source measure.
    pub fn assemble(
        &self,
        reduced: &ReducedMeasure,
        index: usize,
        time_signature: &TimeSignature,
        state: AssemblyState,
    ) -> Result<(AssemblyState, AssembledMeasure)> {
        if reduced.is_empty() {
            return Err(ReduceError::MalformedMeasure {
                measure: index,
                reason: "reduced measure has no events".to_string(),
            });
        }

        let mut events = self.voiced_copies(reduced);
        fill_to_bar(&mut events, time_signature.bar_duration());

        let ties_from_previous = match (&state.last_pitched, events.first()) {
            (Some(previous), Some(first)) => previous.content.ties_with(&first.content),
            _ => false,
        };
        if ties_from_previous {
            if let Some(first) = events.first_mut() {
                first.tie = Some(TieType::Stop);
            }
        }

        let mut measure = OutputMeasure {
            number: index,
            time_signature: None,
            clef: None,
            events,
        };

        let mut last_time_signature = state.last_time_signature;
        if last_time_signature.as_ref() != Some(time_signature) {
            measure.time_signature = Some(*time_signature);
            last_time_signature = Some(*time_signature);
        }

        log::debug!(
            "assembled measure {}: {} events, tie from previous: {}",
            index,
            measure.events.len(),
            ties_from_previous
        );

        let new_state = AssemblyState {
            last_pitched: measure.events.last().cloned(),
            last_time_signature,
        };

        Ok((
            new_state,
            AssembledMeasure {
                measure,
                ties_from_previous,
            },
        ))
    }

    fn voiced_copies(&self, reduced: &ReducedMeasure) -> Vec<Event> {
        reduced
            .events
            .iter()
            .map(|event| {
                let mut copy = event.clone();
                if self.closed_position && copy.is_chord() {
                    let closed = self.services.closed_position(&copy.content, self.force_octave);
                    copy.content = self.services.remove_redundant_pitches(&closed);
                }
                copy
            })
            .collect()
    }
}

/// Close gaps between consecutive events and stretch the last one to the
/// end of the bar
fn fill_to_bar(events: &mut [Event], bar_duration: f64) {
    for i in 1..events.len() {
        let gap = events[i].offset - events[i - 1].end();
        if gap.abs() > DURATION_EPSILON {
            events[i - 1].duration += gap;
        }
    }

    if let Some(last) = events.last_mut() {
        let remainder = bar_duration - last.end();
        if remainder > DURATION_EPSILON {
            last.duration += remainder;
        }
    }
}
