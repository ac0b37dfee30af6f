//! Spectral-frame model and extraction stages for the comparison harness.
//!
//! The modules mirror a classic long-slit reduction layout: frame/trace data
//! types, boxcar and Horne extraction stages behind a shared trait, and small
//! math helpers for the Gaussian spatial profile.

pub mod extraction;
pub mod frame;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use prelude::{ExtractError, ExtractResult, Extractor};
