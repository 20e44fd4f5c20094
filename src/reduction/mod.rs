//! Chord reduction pipeline
//!
//! # Pipeline
//!
//! - **weighting**: scores one event under a [`WeightingPolicy`]
//! - **weights**: aggregates scores per pitch-class set for a measure
//! - **measure_reducer**: keeps the best N sonorities and rewrites the
//!   measure's rhythm around them
//! - **assembler**: voicing, bar fill, ties and time-signature stamping
//! - **piece**: drives the above over a whole score
//! - **json**: string-in/string-out entry points for the WASM layer

pub mod errors;
pub mod options;
pub mod weighting;
pub mod weights;
pub mod measure_reducer;
pub mod assembler;
pub mod piece;
pub mod json;

pub use errors::{ReduceError, Result};
pub use options::ReductionOptions;
pub use weighting::WeightingPolicy;
pub use weights::{compute_measure_chord_weights, WeightTable};
pub use measure_reducer::{reduce_measure_to_n_chords, select_kept_keys, MeasureReducer, ReducedMeasure};
pub use assembler::{AssembledMeasure, AssemblyState, MeasureAssembler};
pub use piece::reduce_parts;
