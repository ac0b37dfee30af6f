use serde::{Deserialize, Serialize};

use crate::frame::FluxUnit;

/// Extracted 1D spectrum: one flux value per dispersion column.
///
/// Immutable after creation; comparison helpers return copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum1D {
    flux: Vec<f64>,
    unit: FluxUnit,
}

impl Spectrum1D {
    pub fn new(flux: Vec<f64>, unit: FluxUnit) -> Self {
        Self { flux, unit }
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn unit(&self) -> FluxUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flux.is_empty()
    }

    /// Largest flux value, ignoring NaNs; 0.0 for an empty spectrum.
    pub fn peak(&self) -> f64 {
        self.flux
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(0.0_f64, f64::max)
    }

    /// Peak-normalized copy for overlay comparison; unchanged if the peak is 0.
    pub fn normalized(&self) -> Self {
        let peak = self.peak();
        if peak == 0.0 {
            return self.clone();
        }
        Self {
            flux: self.flux.iter().map(|v| v / peak).collect(),
            unit: FluxUnit::Dimensionless,
        }
    }
}
