//! Models module for the chord reducer
//!
//! This module contains the data models shared by the reduction
//! pipeline: pitches, timed events, measures, scores and the
//! single-part output.

pub mod pitch;
pub mod event;
pub mod time_signature;
pub mod measure;
pub mod output;

// Re-export commonly used types
pub use pitch::{parse_pitches, Pitch};
pub use event::{Event, PitchClassKey, PitchContent, TieType, DURATION_EPSILON};
pub use time_signature::TimeSignature;
pub use measure::{Measure, Part, Score};
pub use output::{Clef, OutputMeasure, OutputPart};
