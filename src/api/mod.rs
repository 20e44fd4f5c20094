//! Chord Reducer WASM API
//!
//! This module provides the JavaScript-facing API for the chord reducer.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error conversion, and logging
//! - `reduce`: Score, measure and weight-table operations

pub mod helpers;
pub mod reduce;

pub use reduce::{
    measure_chord_weights_json, reduce_measure_json, reduce_score, reduce_score_json,
    weighting_policies,
};
