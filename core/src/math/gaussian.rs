use std::f64::consts::PI;

/// FWHM of a unit-stddev Gaussian: 2 * sqrt(2 * ln 2).
const FWHM_PER_STDDEV: f64 = 2.354_820_045_030_949;

/// 1D Gaussian model used for both scene synthesis and the Horne spatial
/// profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian1D {
    pub amplitude: f64,
    pub mean: f64,
    pub stddev: f64,
}

impl Gaussian1D {
    pub fn new(amplitude: f64, mean: f64, stddev: f64) -> Self {
        Self {
            amplitude,
            mean,
            stddev,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.stddev;
        self.amplitude * (-0.5 * z * z).exp()
    }

    /// Analytic integral over the whole axis: amplitude * stddev * sqrt(2 pi).
    pub fn integral(&self) -> f64 {
        self.amplitude * self.stddev * (2.0 * PI).sqrt()
    }

    /// Estimates a Gaussian from a sampled profile via its peak and FWHM.
    ///
    /// The half-maximum crossings are located by walking outward from the
    /// peak sample and interpolating linearly, which keeps the estimate
    /// stable against low-level noise in the profile wings. Returns `None`
    /// when the profile has no positive peak or no usable half-maximum
    /// crossing on either side.
    pub fn from_profile(values: &[f64]) -> Option<Self> {
        let (peak_idx, peak) = values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .fold(None, |best: Option<(usize, f64)>, (idx, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((idx, v)),
            })?;
        if peak <= 0.0 {
            return None;
        }

        let half = peak / 2.0;
        let left = crossing_below(values, peak_idx, half, Direction::Left);
        let right = crossing_below(values, peak_idx, half, Direction::Right);

        let (mean, fwhm) = match (left, right) {
            (Some(l), Some(r)) => ((l + r) / 2.0, r - l),
            // One-sided profile (peak near an edge): mirror the good side.
            (Some(l), None) => (peak_idx as f64, 2.0 * (peak_idx as f64 - l)),
            (None, Some(r)) => (peak_idx as f64, 2.0 * (r - peak_idx as f64)),
            (None, None) => return None,
        };

        let stddev = fwhm / FWHM_PER_STDDEV;
        if !stddev.is_finite() || stddev <= 0.0 {
            return None;
        }
        Some(Self::new(peak, mean, stddev))
    }
}

enum Direction {
    Left,
    Right,
}

/// First sub-sample position at which the profile drops to `threshold`,
/// scanning outward from `peak_idx`.
fn crossing_below(
    values: &[f64],
    peak_idx: usize,
    threshold: f64,
    direction: Direction,
) -> Option<f64> {
    let indices: Box<dyn Iterator<Item = usize>> = match direction {
        Direction::Left => Box::new((0..peak_idx).rev()),
        Direction::Right => Box::new(peak_idx + 1..values.len()),
    };

    for idx in indices {
        let outer = values[idx];
        if outer <= threshold {
            let inner_idx = match direction {
                Direction::Left => idx + 1,
                Direction::Right => idx - 1,
            };
            let inner = values[inner_idx];
            if inner == outer {
                return Some(idx as f64);
            }
            let fraction = (inner - threshold) / (inner - outer);
            let offset = match direction {
                Direction::Left => -fraction,
                Direction::Right => fraction,
            };
            return Some(inner_idx as f64 + offset);
        }
    }
    None
}
