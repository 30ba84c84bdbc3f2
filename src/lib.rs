pub mod analysis;
pub mod error;
pub mod features;
pub mod geometry;
pub mod parameters;
pub mod run_analysis;
pub mod steps;

// results with at most this area are slivers, not polygons
pub const DEFAULT_AREA_TOLERANCE: f64 = 1e-9;
// signature value of fragments from layers analysed without a value field
pub const NO_VALUE: &str = "<no value>";

pub use error::{Error, Result};
pub use parameters::AnalysisParameters;
pub use run_analysis::{run_request, Analysis};
