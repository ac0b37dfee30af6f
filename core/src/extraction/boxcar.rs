use crate::frame::{FlatTrace, SpectralFrame, Spectrum1D};
use crate::prelude::{ExtractError, ExtractResult, Extractor};
use crate::telemetry::log::LogManager;

/// Boxcar extraction: per-column sum of flux across a fixed-width aperture
/// centered on the trace.
///
/// Pixels partially covered by the aperture contribute fractionally; pixel
/// `r` spans the interval [r - 0.5, r + 0.5). The aperture is clipped to the
/// frame, so a width equal to the full image height sums (almost) every
/// pixel in the column. Variance and mask planes are ignored, matching the
/// plain aperture-sum definition.
pub struct BoxcarExtract {
    width: f64,
    logger: LogManager,
}

impl BoxcarExtract {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            logger: LogManager::for_stage("boxcar"),
        }
    }

    fn aperture_weights(&self, trace_row: f64, nrows: usize) -> Vec<f64> {
        let lower = trace_row - self.width / 2.0;
        let upper = trace_row + self.width / 2.0;
        (0..nrows)
            .map(|row| {
                let pixel_lower = row as f64 - 0.5;
                let pixel_upper = row as f64 + 0.5;
                (upper.min(pixel_upper) - lower.max(pixel_lower)).clamp(0.0, 1.0)
            })
            .collect()
    }
}

impl Extractor for BoxcarExtract {
    fn extract(&self, frame: &SpectralFrame, trace: &FlatTrace) -> ExtractResult<Spectrum1D> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ExtractError::InvalidAperture(format!(
                "boxcar width {} must be positive",
                self.width
            )));
        }
        trace.validate(frame.nrows())?;

        let image = frame.image();
        let weights = self.aperture_weights(trace.row(), frame.nrows());

        let flux: Vec<f64> = (0..frame.ncols())
            .map(|col| {
                weights
                    .iter()
                    .enumerate()
                    .map(|(row, &w)| w * image[[row, col]])
                    .sum()
            })
            .collect();

        let spectrum = Spectrum1D::new(flux, frame.unit());
        self.logger.record(&format!(
            "width {:.1} peak {:.4}",
            self.width,
            spectrum.peak()
        ));
        Ok(spectrum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FluxUnit;
    use ndarray::Array2;

    fn uniform_frame(nrows: usize, ncols: usize, value: f64) -> SpectralFrame {
        SpectralFrame::new(Array2::from_elem((nrows, ncols), value), FluxUnit::Adu)
    }

    #[test]
    fn full_width_extraction_yields_one_value_per_column() {
        let frame = uniform_frame(20, 12, 1.0);
        let trace = FlatTrace::centered(20);
        let spectrum = BoxcarExtract::new(20.0).extract(&frame, &trace).unwrap();
        assert_eq!(spectrum.len(), 12);
    }

    #[test]
    fn narrow_aperture_sums_fractional_pixels() {
        // Width 3 centered on row 5.0 covers [3.5, 6.5): exactly pixels
        // 4, 5 and 6 given pixel r spanning [r - 0.5, r + 0.5).
        let frame = uniform_frame(10, 4, 2.0);
        let trace = FlatTrace::at_row(5.0);
        let spectrum = BoxcarExtract::new(3.0).extract(&frame, &trace).unwrap();
        for &value in spectrum.flux() {
            assert!((value - 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn aperture_is_clipped_at_frame_edges() {
        // Full-height aperture [0, 10] over a uniform 10-row frame: pixel 0
        // only overlaps by half, pixels 1..=9 fully, so columns sum to 9.5.
        let frame = uniform_frame(10, 3, 1.0);
        let trace = FlatTrace::centered(10);
        let spectrum = BoxcarExtract::new(10.0).extract(&frame, &trace).unwrap();
        for &value in spectrum.flux() {
            assert!((value - 9.5).abs() < 1e-12);
        }
    }

    #[test]
    fn non_positive_width_is_rejected() {
        let frame = uniform_frame(10, 3, 1.0);
        let trace = FlatTrace::centered(10);
        let result = BoxcarExtract::new(0.0).extract(&frame, &trace);
        assert!(matches!(result, Err(ExtractError::InvalidAperture(_))));
    }

    #[test]
    fn trace_outside_frame_is_rejected() {
        let frame = uniform_frame(10, 3, 1.0);
        let result = BoxcarExtract::new(4.0).extract(&frame, &FlatTrace::at_row(12.0));
        assert!(matches!(result, Err(ExtractError::InvalidTrace(_))));
    }

    #[test]
    fn gaussian_column_sums_to_profile_integral() {
        use crate::math::Gaussian1D;

        let truth = Gaussian1D::new(1.0, 16.0, 3.0);
        let image = Array2::from_shape_fn((32, 5), |(row, _)| truth.eval(row as f64));
        let frame = SpectralFrame::new(image, FluxUnit::Adu);
        let trace = FlatTrace::centered(32);

        let spectrum = BoxcarExtract::new(32.0).extract(&frame, &trace).unwrap();
        for &value in spectrum.flux() {
            assert!((value - truth.integral()).abs() < 0.01);
        }
    }
}
