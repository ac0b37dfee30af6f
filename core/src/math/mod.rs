pub mod gaussian;
pub mod stats;

pub use gaussian::Gaussian1D;
pub use stats::StatsHelper;
