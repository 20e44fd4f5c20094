//! Chord Reducer WASM Module
//!
//! Reduces a multi-part score to a single part holding at most a few
//! chords per measure, weighted by duration, metric position and
//! consonance.

pub mod models;
pub mod reduction;
pub mod services;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use reduction::{reduce_parts, MeasureReducer, ReduceError, ReductionOptions, WeightingPolicy};
pub use services::{NotationServices, StandardServices};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        return;
    }

    log::info!("Chord reducer WASM module initialized");
}
