use ndarray::Array2;

use crate::frame::{FlatTrace, FluxUnit, SpectralFrame, Spectrum1D};
use crate::math::Gaussian1D;
use crate::prelude::{ExtractError, ExtractResult, Extractor};
use crate::telemetry::log::LogManager;

/// Horne (optimal) extraction: variance-weighted per-column flux estimate.
///
/// The spatial profile is estimated from the frame itself: the image is
/// collapsed along the dispersion axis, a Gaussian is fitted to the
/// collapsed profile, and the model is evaluated per row and normalized to
/// unit sum. Each column then yields
///
///   flux = sum(M * P * D / V) / sum(M * P^2 / V)
///
/// with M the good-pixel mask, P the normalized profile, D the data and V
/// the variance. Masked and non-positive-variance pixels are excluded from
/// both sums; a column with no usable pixels yields 0.0.
pub struct HorneExtract {
    logger: LogManager,
}

impl HorneExtract {
    pub fn new() -> Self {
        Self {
            logger: LogManager::for_stage("horne"),
        }
    }

    /// Separate-inputs invocation form: raw image plus variance, optional
    /// mask and unit supplied individually.
    ///
    /// Assembles a [`SpectralFrame`] and delegates to [`Extractor::extract`],
    /// so both invocation forms share one code path and produce identical
    /// flux sequences for equivalent inputs.
    pub fn extract_parts(
        &self,
        image: Array2<f64>,
        variance: Array2<f64>,
        mask: Option<Array2<bool>>,
        unit: FluxUnit,
        trace: &FlatTrace,
    ) -> ExtractResult<Spectrum1D> {
        let mut frame = SpectralFrame::new(image, unit).with_variance(variance)?;
        if let Some(mask) = mask {
            frame = frame.with_mask(mask)?;
        }
        self.extract(&frame, trace)
    }

    /// Collapses the frame along the dispersion axis and returns the
    /// unit-sum Gaussian spatial profile sampled at each row.
    fn spatial_profile(&self, frame: &SpectralFrame) -> ExtractResult<Vec<f64>> {
        let image = frame.image();
        let (nrows, ncols) = image.dim();

        let mut collapsed = vec![0.0; nrows];
        for (row, value) in collapsed.iter_mut().enumerate() {
            let mut sum = 0.0;
            let mut count = 0usize;
            for col in 0..ncols {
                if frame.is_good(row, col) {
                    sum += image[[row, col]];
                    count += 1;
                }
            }
            if count > 0 {
                *value = sum / count as f64;
            }
        }

        let model = Gaussian1D::from_profile(&collapsed).ok_or_else(|| {
            ExtractError::InvalidProfile("collapsed frame has no usable spatial peak".into())
        })?;

        let mut profile: Vec<f64> = (0..nrows).map(|row| model.eval(row as f64)).collect();
        let total: f64 = profile.iter().sum();
        if total <= 0.0 {
            return Err(ExtractError::InvalidProfile(
                "spatial profile sums to zero".into(),
            ));
        }
        for p in &mut profile {
            *p /= total;
        }
        Ok(profile)
    }
}

impl Default for HorneExtract {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for HorneExtract {
    fn extract(&self, frame: &SpectralFrame, trace: &FlatTrace) -> ExtractResult<Spectrum1D> {
        trace.validate(frame.nrows())?;
        let variance = frame.variance().ok_or_else(|| {
            ExtractError::MissingVariance("Horne extraction requires a variance plane".into())
        })?;

        let profile = self.spatial_profile(frame)?;
        let image = frame.image();

        let mut usable_columns = 0usize;
        let mut flux = Vec::with_capacity(frame.ncols());
        for col in 0..frame.ncols() {
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for (row, &p) in profile.iter().enumerate() {
                if !frame.is_good(row, col) {
                    continue;
                }
                let v = variance[[row, col]];
                if v <= 0.0 {
                    continue;
                }
                numerator += p * image[[row, col]] / v;
                denominator += p * p / v;
            }
            if denominator > 0.0 {
                usable_columns += 1;
                flux.push(numerator / denominator);
            } else {
                flux.push(0.0);
            }
        }

        // An all-zero output from a fully skipped frame would look like a
        // valid spectrum; refuse it instead.
        if usable_columns == 0 {
            return Err(ExtractError::MissingVariance(
                "no unmasked pixels with positive variance in any column".into(),
            ));
        }

        let spectrum = Spectrum1D::new(flux, frame.unit());
        self.logger.record(&format!(
            "columns {} peak {:.4}",
            spectrum.len(),
            spectrum.peak()
        ));
        Ok(spectrum)
    }
}
