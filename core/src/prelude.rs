use crate::frame::{FlatTrace, SpectralFrame, Spectrum1D};

/// Common error type for extraction stages.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("invalid aperture: {0}")]
    InvalidAperture(String),
    #[error("invalid trace: {0}")]
    InvalidTrace(String),
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("missing variance: {0}")]
    MissingVariance(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Trait describing stages that reduce a 2D frame to a 1D spectrum along a trace.
pub trait Extractor {
    fn extract(&self, frame: &SpectralFrame, trace: &FlatTrace) -> ExtractResult<Spectrum1D>;
}
