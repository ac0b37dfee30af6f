pub mod boxcar;
pub mod horne;

pub use boxcar::BoxcarExtract;
pub use horne::HorneExtract;
