//! Plan parameters, input bounds and scenario loading

mod data;
pub mod loader;

pub use data::{SwpParams, ParamUpdate, ParamBounds, parse_percentage};
pub use loader::{Scenario, load_scenarios, load_scenarios_from_reader};
