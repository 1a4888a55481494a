//! Category calculators.
//!
//! Each calculator owns its fee schedule (`*Config`, serde-defaulted so it
//! can be loaded from TOML), takes a borrowed `*Inputs` view and returns a
//! category record whose total is the exact sum of its components.

pub mod acquisition;
pub mod holding;
pub mod rehab;
pub mod selling;

pub use acquisition::{AcquisitionCalculator, AcquisitionConfig, AcquisitionInputs};
pub use holding::{loan_payment, HoldingCalculator, HoldingConfig, HoldingInputs};
pub use rehab::{RehabCalculator, RehabEstimate, RehabInputs};
pub use selling::{
    agent_commission, calculate_agent_commission, CommissionOptions, SellingCalculator,
    SellingConfig, SellingInputs,
};
