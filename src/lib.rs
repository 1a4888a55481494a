//! TAXDEED-COSTS — lifecycle cost estimation for tax-deed properties.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod calculators;
pub mod config;
pub mod engine;
pub mod money;
pub mod reference;
pub mod types;

pub use config::AppConfig;
pub use engine::{calculate_total_costs, CostEngine, ProfitAnalysis};
pub use types::{CostBreakdown, CostError, CostInputs};
