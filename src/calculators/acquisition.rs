//! Acquisition costs.
//!
//! Winning bid plus everything paid to take and insure title: platform
//! premium, transfer tax (state + local), recording, title work and legal
//! review. Inputs are assumed validated upstream; this calculator has no
//! error paths.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::to_cents;
use crate::reference::local::local_transfer_surcharge;
use crate::reference::states::{StateProfile, UsState};
use crate::reference::buyers_premium_rate;
use crate::types::{AcquisitionCosts, CostInputs};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Title and legal fee schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Title search before the state multiplier. Default: $350.
    pub title_search_base: f64,
    /// Owner's policy floor. Default: $500.
    pub title_insurance_min: f64,
    /// Owner's policy rate on the insured value. Default: 0.5%.
    pub title_insurance_rate: f64,
    /// Closing attorney in attorney-closing states. Default: $1,200.
    pub attorney_closing_fee: f64,
    /// Optional deed review elsewhere. Default: $750.
    pub legal_review_fee: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            title_search_base: 350.0,
            title_insurance_min: 500.0,
            title_insurance_rate: 0.005,
            attorney_closing_fee: 1_200.0,
            legal_review_fee: 750.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AcquisitionInputs<'a> {
    pub bid_amount: f64,
    pub state: &'a str,
    pub county: Option<&'a str>,
    pub platform: Option<&'a str>,
    /// Insured value for the title policy; the bid is used when absent.
    pub property_value: Option<f64>,
    pub legal_fees_override: Option<f64>,
}

impl<'a> AcquisitionInputs<'a> {
    pub fn new(bid_amount: f64, state: &'a str) -> Self {
        Self {
            bid_amount,
            state,
            county: None,
            platform: None,
            property_value: None,
            legal_fees_override: None,
        }
    }
}

impl<'a> From<&'a CostInputs> for AcquisitionInputs<'a> {
    fn from(inputs: &'a CostInputs) -> Self {
        Self {
            bid_amount: inputs.bid_amount,
            state: &inputs.state,
            county: inputs.county.as_deref(),
            platform: inputs.auction_platform.as_deref(),
            property_value: inputs.property_value,
            legal_fees_override: inputs.legal_fees_override,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AcquisitionCalculator {
    config: AcquisitionConfig,
}

impl AcquisitionCalculator {
    pub fn new(config: AcquisitionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    pub fn calculate(&self, inputs: &AcquisitionInputs<'_>) -> AcquisitionCosts {
        let state = UsState::parse(inputs.state);
        let profile = state.map(|s| s.profile()).unwrap_or(StateProfile::NEUTRAL);
        let bid = inputs.bid_amount;

        let premium_rate = buyers_premium_rate(inputs.platform);
        let surcharge = state
            .map(|s| local_transfer_surcharge(s, inputs.county, bid))
            .unwrap_or(0.0);
        let transfer_rate = profile.transfer_tax_rate + surcharge;

        let bid_amount = to_cents(bid);
        let buyers_premium = to_cents(bid * premium_rate);
        let transfer_tax = to_cents(bid * transfer_rate);
        let recording_fees = to_cents(profile.recording_fee);
        let title_search = to_cents(self.config.title_search_base * profile.title_multiplier);
        let title_insurance = self.title_insurance(inputs.property_value.unwrap_or(bid), &profile);
        let legal_fees = to_cents(self.legal_fees(inputs.legal_fees_override, &profile));

        let total_acquisition = bid_amount
            + buyers_premium
            + transfer_tax
            + recording_fees
            + title_search
            + title_insurance
            + legal_fees;

        debug!(
            state = inputs.state,
            county = ?inputs.county,
            platform = ?inputs.platform,
            premium_rate,
            transfer_rate,
            total = %total_acquisition,
            "Acquisition costs calculated"
        );

        AcquisitionCosts {
            bid_amount,
            buyers_premium,
            transfer_tax,
            recording_fees,
            title_search,
            title_insurance,
            legal_fees,
            total_acquisition,
        }
    }

    fn title_insurance(&self, insured_value: f64, profile: &StateProfile) -> Decimal {
        let premium = (insured_value * self.config.title_insurance_rate)
            .max(self.config.title_insurance_min);
        to_cents(premium * profile.title_multiplier)
    }

    fn legal_fees(&self, override_fee: Option<f64>, profile: &StateProfile) -> f64 {
        match override_fee {
            Some(fee) => fee.max(0.0),
            None if profile.attorney_closing => self.config.attorney_closing_fee,
            None => self.config.legal_review_fee,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
