pub mod spectral;
pub mod spectrum;
pub mod trace;

pub use spectral::{FluxUnit, SpectralFrame};
pub use spectrum::Spectrum1D;
pub use trace::FlatTrace;
