//! Reduction operations for the WASM API
//!
//! - `reduceScore`: score object in, reduced part object out
//! - `reduceScoreJson`: the same over JSON strings
//! - `reduceMeasureJson`: reduce one measure for inspection
//! - `measureChordWeightsJson`: weight table of one measure

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, is_absent, reduce_error, serialize};
use crate::models::Score;
use crate::reduction::{json, reduce_parts, ReductionOptions, WeightingPolicy};
use crate::services::StandardServices;
use crate::{wasm_info, wasm_log, wasm_warn};

/// Reduce a score object to a single part
///
/// # Parameters
/// - `score`: `{ parts: [{ name, measures: [...] }] }`
/// - `options`: `ReductionOptions` object, or `undefined` for the defaults
///
/// # Returns
/// The reduced part as `{ measures: [...] }`
#[wasm_bindgen(js_name = reduceScore)]
pub fn reduce_score(score: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("reduceScore called");

    let score: Score = deserialize(score, "Failed to deserialize score")?;
    let options: ReductionOptions = if is_absent(&options) {
        ReductionOptions::default()
    } else {
        deserialize(options, "Failed to deserialize options")?
    };

    wasm_log!(
        "  {} parts, {} measures, maxChords={}",
        score.parts.len(),
        score.measure_count(),
        options.max_chords
    );

    let part = reduce_parts(&score, &options, &StandardServices)
        .map_err(|e| reduce_error(e, "Reduction failed"))?;

    if part.is_empty() {
        wasm_warn!("reduceScore: score has no non-empty measures");
    }

    wasm_info!("reduceScore completed: {} measures", part.measures.len());
    serialize(&part, "Failed to serialize reduced part")
}

/// Reduce a JSON-encoded score; an empty options string means defaults
#[wasm_bindgen(js_name = reduceScoreJson)]
pub fn reduce_score_json(score_json: &str, options_json: &str) -> Result<String, JsValue> {
    wasm_info!("reduceScoreJson called ({} bytes)", score_json.len());

    let output = json::reduce_score_json(score_json, options_json)
        .map_err(|e| reduce_error(e, "Reduction failed"))?;

    wasm_info!("reduceScoreJson completed: {} bytes", output.len());
    Ok(output)
}

/// Reduce one JSON-encoded measure under a time signature such as `"3/4"`
#[wasm_bindgen(js_name = reduceMeasureJson)]
pub fn reduce_measure_json(
    measure_json: &str,
    time_signature: &str,
    options_json: &str,
) -> Result<String, JsValue> {
    wasm_log!("reduceMeasureJson called ({})", time_signature);

    json::reduce_measure_json(measure_json, time_signature, options_json)
        .map_err(|e| reduce_error(e, "Measure reduction failed"))
}

/// Weight table for one JSON-encoded measure as `[[pitchClasses, score], ...]`
#[wasm_bindgen(js_name = measureChordWeightsJson)]
pub fn measure_chord_weights_json(
    measure_json: &str,
    time_signature: &str,
    policy: &str,
) -> Result<String, JsValue> {
    wasm_log!("measureChordWeightsJson called ({}, {})", time_signature, policy);

    json::measure_chord_weights_json(measure_json, time_signature, policy)
        .map_err(|e| reduce_error(e, "Weight computation failed"))
}

/// Names accepted for the `weighting` option
#[wasm_bindgen(js_name = weightingPolicies)]
pub fn weighting_policies() -> Vec<JsValue> {
    WeightingPolicy::ALL
        .iter()
        .map(|policy| JsValue::from_str(policy.name()))
        .collect()
}
