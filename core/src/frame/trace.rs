use serde::{Deserialize, Serialize};

use crate::prelude::{ExtractError, ExtractResult};

/// A flat trace: the aperture center sits at the same row for every column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatTrace {
    row: f64,
}

impl FlatTrace {
    /// Trace anchored at the vertical center of a frame with `nrows` rows.
    pub fn centered(nrows: usize) -> Self {
        Self {
            row: nrows as f64 / 2.0,
        }
    }

    pub fn at_row(row: f64) -> Self {
        Self { row }
    }

    pub fn row(&self) -> f64 {
        self.row
    }

    /// Checks that the trace row lies inside [0, nrows).
    pub fn validate(&self, nrows: usize) -> ExtractResult<()> {
        if !self.row.is_finite() || self.row < 0.0 || self.row >= nrows as f64 {
            return Err(ExtractError::InvalidTrace(format!(
                "trace row {} outside frame with {} rows",
                self.row, nrows
            )));
        }
        Ok(())
    }
}
