//! Whole-piece reduction
//!
//! ```text
//! Score (multi-part)
//!     ↓ per measure: chordify → MeasureReducer   (independent)
//! Vec<ReducedMeasure>
//!     ↓ fold: MeasureAssembler + AssemblyState  (sequential)
//! OutputPart (single part) → clef → notation finishing
//! ```

use super::assembler::{AssemblyState, MeasureAssembler};
use super::errors::Result;
use super::measure_reducer::{MeasureReducer, ReducedMeasure};
use super::options::ReductionOptions;
use crate::models::{Measure, OutputPart, Score, TimeSignature};
use crate::services::NotationServices;

/// One measure after the independent reduction phase
#[derive(Debug, Clone)]
struct PendingMeasure {
    index: usize,
    time_signature: TimeSignature,
    reduced: ReducedMeasure,
}

/// Reduce every measure of `score` and stitch the results into one part
///
/// Iteration starts at measure 0. An empty first measure (pickup
/// placeholder) is skipped; any later empty measure ends the piece.
pub fn reduce_parts<S: NotationServices + ?Sized>(
    score: &Score,
    options: &ReductionOptions,
    services: &S,
) -> Result<OutputPart> {
    options.validate()?;

    let pending = reduce_measures(score, options, services)?;

    let assembler = MeasureAssembler::from_options(services, options);
    let mut part = OutputPart::new();
    let mut state = AssemblyState::default();
    for measure in &pending {
        let (next_state, assembled) =
            assembler.assemble(&measure.reduced, measure.index, &measure.time_signature, state)?;
        state = next_state;
        part.push_measure(assembled.measure, assembled.ties_from_previous);
    }

    let clef = services.best_clef(&part, true);
    if let Some(first) = part.measures.first_mut() {
        first.clef = Some(clef);
    }
    services.make_notation(&mut part);

    log::info!(
        "reduced {} measures to {} events ({} parts in, clef {:?})",
        part.measures.len(),
        part.events().count(),
        score.parts.len(),
        clef
    );

    Ok(part)
}

/// Independent phase: chordify and reduce each measure stack
fn reduce_measures<S: NotationServices + ?Sized>(
    score: &Score,
    options: &ReductionOptions,
    services: &S,
) -> Result<Vec<PendingMeasure>> {
    let reducer = MeasureReducer::from_options(options);
    let mut pending = Vec::new();

    for index in 0..score.measure_count() {
        if score.is_stack_empty(index) {
            if index == 0 {
                log::debug!("measure 0 is empty, skipping");
                continue;
            }
            log::debug!("measure {} is empty, ending the piece", index);
            break;
        }

        let time_signature = score.time_signature_at(index)?;
        let stack = score.measure_stack(index);
        let events = services.chordify(&stack, &time_signature)?;
        let chordified = Measure {
            number: index,
            time_signature: Some(time_signature),
            events,
        };

        let reduced = reducer.reduce(&chordified)?;
        pending.push(PendingMeasure {
            index,
            time_signature,
            reduced,
        });
    }

    Ok(pending)
}
