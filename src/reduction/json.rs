//! JSON boundary for the reduction pipeline
//!
//! Plain-string entry points used by the WASM API; kept free of
//! `wasm_bindgen` so they run in native tests.

use super::errors::Result;
use super::options::ReductionOptions;
use super::piece::reduce_parts;
use super::weighting::WeightingPolicy;
use super::weights::compute_measure_chord_weights;
use super::measure_reducer::MeasureReducer;
use crate::models::{Measure, Score, TimeSignature};
use crate::services::{NotationServices, StandardServices};

/// Parse options, treating an empty string as "all defaults"
pub fn parse_options(options_json: &str) -> Result<ReductionOptions> {
    if options_json.trim().is_empty() {
        return Ok(ReductionOptions::default());
    }
    Ok(serde_json::from_str(options_json)?)
}

/// Reduce a JSON-encoded [`Score`] and return the JSON-encoded output part
pub fn reduce_score_json(score_json: &str, options_json: &str) -> Result<String> {
    let score: Score = serde_json::from_str(score_json)?;
    let options = parse_options(options_json)?;
    let part = reduce_parts(&score, &options, &StandardServices)?;
    Ok(serde_json::to_string(&part)?)
}

/// Reduce a single JSON-encoded measure (one part, already chordified or
/// monophonic) under the given time signature
pub fn reduce_measure_json(measure_json: &str, time_signature: &str, options_json: &str) -> Result<String> {
    let measure = annotated_measure(measure_json, time_signature)?;
    let options = parse_options(options_json)?;
    options.validate()?;
    let reduced = MeasureReducer::from_options(&options).reduce(&measure)?;
    Ok(serde_json::to_string(&reduced)?)
}

/// Weight table of a single measure as a JSON list of `[pitchClasses, score]`
pub fn measure_chord_weights_json(measure_json: &str, time_signature: &str, policy: &str) -> Result<String> {
    let measure = annotated_measure(measure_json, time_signature)?;
    let policy: WeightingPolicy = if policy.trim().is_empty() {
        WeightingPolicy::default()
    } else {
        policy.parse()?
    };
    let table = compute_measure_chord_weights(&measure.events, policy);
    let entries: Vec<(Vec<u8>, f64)> = table
        .entries()
        .iter()
        .map(|(key, score)| (key.classes().to_vec(), *score))
        .collect();
    Ok(serde_json::to_string(&entries)?)
}

/// Parse a measure and chordify it so beat strength and consonance are set
fn annotated_measure(measure_json: &str, time_signature: &str) -> Result<Measure> {
    let mut measure: Measure = serde_json::from_str(measure_json)?;
    let time_signature: TimeSignature = time_signature.parse()?;
    measure.events = StandardServices.chordify(&[&measure], &time_signature)?;
    measure.time_signature = Some(time_signature);
    Ok(measure)
}
