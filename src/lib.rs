//! SWP Calculator - Projection engine for systematic withdrawal plans
//!
//! This library provides:
//! - Month-by-month simulation of a lump sum with growth and inflation-indexed withdrawals
//! - Year-by-year projection records with depletion tracking
//! - Input validation, clamping and typed parameter updates
//! - Sustainability analysis and report export (text, CSV, JSON)
//! - Batch scenario runs and withdrawal sweeps

pub mod error;
pub mod params;
pub mod projection;
pub mod analysis;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{Result, SwpError};
pub use params::{SwpParams, ParamUpdate, ParamBounds};
pub use projection::{project, Projection, ProjectionConfig, ProjectionEngine, YearlyRecord};
pub use analysis::ResultsInsights;
pub use scenario::ScenarioRunner;
