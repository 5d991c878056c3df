//! Projection engine for systematic withdrawal plans

mod state;
mod engine;
mod results;
mod solver;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig, project, inflation_adjusted_withdrawal};
pub use results::{FinalSummary, MonthlyRow, Projection, YearlyRecord};
pub use solver::max_sustainable_withdrawal;
