use anyhow::{anyhow, Context};
use serde::Serialize;
use std::f64::consts::PI;

use spexcore::extraction::{BoxcarExtract, HorneExtract};
use spexcore::frame::{FlatTrace, SpectralFrame, Spectrum1D};
use spexcore::Extractor;

use crate::workflow::config::HarnessConfig;

/// Outputs of one comparison run: four extracted spectra plus the checks
/// the harness performs on them.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub narrow: Spectrum1D,
    pub full: Spectrum1D,
    pub horne_separate: Spectrum1D,
    pub horne_combined: Spectrum1D,
    /// Element-wise equality of the two Horne invocation forms.
    pub horne_forms_identical: bool,
    /// Expected peak flux for the configured source: amplitude * sigma * sqrt(2 pi).
    pub peak_reference: f64,
}

#[derive(Clone)]
pub struct Runner {
    config: HarnessConfig,
}

impl Runner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Runs the four extractions over a centered flat trace, in order:
    /// narrow boxcar, full-height boxcar, Horne from separate inputs,
    /// Horne from the combined frame. Strictly sequential, no recovery.
    pub fn execute(&self, frame: &SpectralFrame) -> anyhow::Result<ComparisonResult> {
        let trace = FlatTrace::centered(frame.nrows());

        let narrow = BoxcarExtract::new(self.config.narrow_width)
            .extract(frame, &trace)
            .context("executing narrow boxcar extraction")?;
        let full = BoxcarExtract::new(frame.nrows() as f64)
            .extract(frame, &trace)
            .context("executing full-height boxcar extraction")?;

        let horne = HorneExtract::new();
        let variance = frame
            .variance()
            .ok_or_else(|| anyhow!("synthesized frame is missing its variance plane"))?
            .to_owned();
        let horne_separate = horne
            .extract_parts(
                frame.image().to_owned(),
                variance,
                frame.mask().cloned(),
                frame.unit(),
                &trace,
            )
            .context("executing Horne extraction from separate inputs")?;
        let horne_combined = horne
            .extract(frame, &trace)
            .context("executing Horne extraction from the combined frame")?;

        let horne_forms_identical = horne_separate.flux() == horne_combined.flux();
        let peak_reference =
            self.config.scene.amplitude * self.config.scene.sigma_pix * (2.0 * PI).sqrt();

        Ok(ComparisonResult {
            narrow,
            full,
            horne_separate,
            horne_combined,
            horne_forms_identical,
            peak_reference,
        })
    }
}
