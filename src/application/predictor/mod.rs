//! Heuristic next-round predictor.
//!
//! `detectors` holds the independent pattern functions; `engine` folds their
//! findings, in a fixed order, into one `Prediction`.

pub mod detectors;
pub mod engine;

pub use engine::{ANALYSIS_WINDOW, MAX_CONFIDENCE, MIN_CONFIDENCE, PredictionEngine};
