//! Comparison tool abstraction.
//!
//! The report only ever consumes the text a comparison tool prints, so the
//! seam is a single `compare` call returning that text. `Benchstat` shells
//! out to the real executable; `MockTool` hands back canned output.

pub mod benchstat;
pub mod mock;
pub mod traits;

// Re-export key types
pub use benchstat::{Benchstat, BenchstatConfig};
pub use mock::MockTool;
pub use traits::ComparisonTool;
