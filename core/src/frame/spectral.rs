use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prelude::{ExtractError, ExtractResult};

/// Physical unit carried by frame pixels and extracted flux values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluxUnit {
    Adu,
    Jansky,
    #[default]
    Dimensionless,
}

impl fmt::Display for FluxUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FluxUnit::Adu => write!(f, "adu"),
            FluxUnit::Jansky => write!(f, "Jy"),
            FluxUnit::Dimensionless => write!(f, "dimensionless"),
        }
    }
}

/// A 2D spectral frame: image plane plus optional variance and bad-pixel mask.
///
/// The spatial axis runs along rows, the dispersion axis along columns.
/// Variance and mask planes are validated against the image shape on attach
/// and the frame is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SpectralFrame {
    image: Array2<f64>,
    variance: Option<Array2<f64>>,
    mask: Option<Array2<bool>>,
    unit: FluxUnit,
}

impl SpectralFrame {
    pub fn new(image: Array2<f64>, unit: FluxUnit) -> Self {
        Self {
            image,
            variance: None,
            mask: None,
            unit,
        }
    }

    /// Attaches a per-pixel variance plane, rejecting shape mismatches.
    pub fn with_variance(mut self, variance: Array2<f64>) -> ExtractResult<Self> {
        if variance.dim() != self.image.dim() {
            return Err(ExtractError::ShapeMismatch(format!(
                "variance shape {:?} does not match image shape {:?}",
                variance.dim(),
                self.image.dim()
            )));
        }
        self.variance = Some(variance);
        Ok(self)
    }

    /// Attaches a bad-pixel mask (true = bad), rejecting shape mismatches.
    pub fn with_mask(mut self, mask: Array2<bool>) -> ExtractResult<Self> {
        if mask.dim() != self.image.dim() {
            return Err(ExtractError::ShapeMismatch(format!(
                "mask shape {:?} does not match image shape {:?}",
                mask.dim(),
                self.image.dim()
            )));
        }
        self.mask = Some(mask);
        Ok(self)
    }

    pub fn nrows(&self) -> usize {
        self.image.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.image.ncols()
    }

    pub fn image(&self) -> ArrayView2<'_, f64> {
        self.image.view()
    }

    pub fn variance(&self) -> Option<ArrayView2<'_, f64>> {
        self.variance.as_ref().map(|v| v.view())
    }

    pub fn mask(&self) -> Option<&Array2<bool>> {
        self.mask.as_ref()
    }

    pub fn unit(&self) -> FluxUnit {
        self.unit
    }

    /// Whether the pixel at (row, col) is usable (not flagged by the mask).
    pub fn is_good(&self, row: usize, col: usize) -> bool {
        self.mask.as_ref().map_or(true, |m| !m[[row, col]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn frame_accepts_matching_planes() {
        let image = Array2::<f64>::zeros((8, 6));
        let frame = SpectralFrame::new(image, FluxUnit::Adu)
            .with_variance(Array2::from_elem((8, 6), 1.0))
            .unwrap()
            .with_mask(Array2::from_elem((8, 6), false))
            .unwrap();

        assert_eq!(frame.nrows(), 8);
        assert_eq!(frame.ncols(), 6);
        assert!(frame.variance().is_some());
        assert!(frame.is_good(0, 0));
    }

    #[test]
    fn frame_rejects_mismatched_variance() {
        let image = Array2::<f64>::zeros((8, 6));
        let result =
            SpectralFrame::new(image, FluxUnit::Adu).with_variance(Array2::from_elem((8, 5), 1.0));
        assert!(matches!(result, Err(ExtractError::ShapeMismatch(_))));
    }

    #[test]
    fn frame_rejects_mismatched_mask() {
        let image = Array2::<f64>::zeros((8, 6));
        let result =
            SpectralFrame::new(image, FluxUnit::Adu).with_mask(Array2::from_elem((4, 6), false));
        assert!(matches!(result, Err(ExtractError::ShapeMismatch(_))));
    }

    #[test]
    fn masked_pixels_are_not_good() {
        let image = Array2::<f64>::zeros((4, 4));
        let mut mask = Array2::from_elem((4, 4), false);
        mask[[2, 3]] = true;
        let frame = SpectralFrame::new(image, FluxUnit::Dimensionless)
            .with_mask(mask)
            .unwrap();
        assert!(frame.is_good(0, 0));
        assert!(!frame.is_good(2, 3));
    }
}
