//! Holding costs.
//!
//! Monthly carrying costs while the property is renovated and listed:
//! property tax, insurance, utilities, maintenance, debt service and HOA.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::to_cents;
use crate::reference::local::county_tax_rate;
use crate::reference::states::{StateProfile, UsState};
use crate::reference::{regional_multiplier_for, RegionalMultiplier};
use crate::types::{CostInputs, FinancingParams, HoldingBreakdown, PropertyType};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldingConfig {
    /// Assessed value as a share of market value when unknown. Default: 0.8.
    pub assessed_ratio: f64,
    /// Monthly utilities for a vacant house. Default: $150.
    pub vacant_utilities: f64,
    /// Monthly utilities for an occupied house. Default: $200.
    pub occupied_utilities: f64,
    /// Monthly lawn, inspections and minor upkeep. Default: $100.
    pub base_maintenance: f64,
    /// Size at which utilities scale 1.0. Default: 1500 sqft.
    pub reference_sqft: f64,
}

impl Default for HoldingConfig {
    fn default() -> Self {
        Self {
            assessed_ratio: 0.8,
            vacant_utilities: 150.0,
            occupied_utilities: 200.0,
            base_maintenance: 100.0,
            reference_sqft: 1500.0,
        }
    }
}

/// Annual insurance premium as a share of property value.
pub fn insurance_rate(property_type: PropertyType) -> f64 {
    match property_type {
        PropertyType::VacantLand => 0.002,
        PropertyType::Condo => 0.004,
        PropertyType::SingleFamily => 0.005,
        PropertyType::MultiFamily => 0.006,
        PropertyType::VacantBuilding => 0.010,
    }
}

/// 1.0 at the reference size, clamped to [0.7, 1.5].
pub fn size_multiplier(sqft: f64, reference_sqft: f64) -> f64 {
    (sqft / reference_sqft).clamp(0.7, 1.5)
}

/// 1.0 at a quarter acre, clamped to [0.8, 2.0]; 1.0 when unknown.
pub fn lot_size_multiplier(acres: Option<f64>) -> f64 {
    match acres {
        Some(a) if a.is_finite() => (1.0 + (a - 0.25) * 0.5).clamp(0.8, 2.0),
        _ => 1.0,
    }
}

/// Monthly debt service rounded to cents.
///
/// Interest-only: `loan × rate / 12`. Amortizing: standard annuity
/// `L·r / (1 − (1+r)^−n)` with `r = rate / 12`. Zero for a non-positive
/// loan, rate or term.
pub fn loan_payment(loan_amount: f64, annual_rate: f64, term_months: u32, interest_only: bool) -> Decimal {
    if loan_amount <= 0.0 || annual_rate <= 0.0 || !loan_amount.is_finite() || !annual_rate.is_finite() {
        return Decimal::ZERO;
    }
    let monthly_rate = annual_rate / 12.0;
    if interest_only {
        return to_cents(loan_amount * monthly_rate);
    }
    if term_months == 0 {
        return Decimal::ZERO;
    }
    let n = term_months as i32;
    let payment = loan_amount * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-n));
    to_cents(payment)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HoldingInputs<'a> {
    pub property_value: f64,
    /// Falls back to `assessed_ratio × property_value`.
    pub assessed_value: Option<f64>,
    /// Falls back to the reference size.
    pub sqft: Option<u32>,
    pub state: &'a str,
    pub county: Option<&'a str>,
    pub metro: Option<&'a str>,
    pub holding_months: u32,
    pub is_vacant: bool,
    pub lot_size_acres: Option<f64>,
    /// Falls back to vacant_building.
    pub property_type: Option<PropertyType>,
    pub financing: Option<&'a FinancingParams>,
    /// Known annual tax bill; replaces the computed tax.
    pub annual_taxes: Option<f64>,
    pub monthly_hoa: Option<f64>,
}

impl<'a> HoldingInputs<'a> {
    pub fn new(property_value: f64, state: &'a str) -> Self {
        Self {
            property_value,
            assessed_value: None,
            sqft: None,
            state,
            county: None,
            metro: None,
            holding_months: 6,
            is_vacant: true,
            lot_size_acres: None,
            property_type: None,
            financing: None,
            annual_taxes: None,
            monthly_hoa: None,
        }
    }
}

impl<'a> From<&'a CostInputs> for HoldingInputs<'a> {
    fn from(inputs: &'a CostInputs) -> Self {
        Self {
            property_value: inputs.effective_property_value(),
            assessed_value: inputs.assessed_value,
            sqft: inputs.effective_sqft(),
            state: &inputs.state,
            county: inputs.county.as_deref(),
            metro: inputs.metro.as_deref(),
            holding_months: inputs.holding_months,
            is_vacant: inputs.is_vacant,
            lot_size_acres: inputs.lot_size_acres,
            property_type: inputs.property_type,
            financing: inputs.active_financing(),
            annual_taxes: inputs.annual_taxes,
            monthly_hoa: inputs.monthly_hoa,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct HoldingCalculator {
    config: HoldingConfig,
}

impl HoldingCalculator {
    pub fn new(config: HoldingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HoldingConfig {
        &self.config
    }

    pub fn calculate(&self, inputs: &HoldingInputs<'_>) -> HoldingBreakdown {
        let state = UsState::parse(inputs.state);
        let profile = state.map(|s| s.profile()).unwrap_or(StateProfile::NEUTRAL);
        let region = state
            .map(|s| regional_multiplier_for(s, inputs.metro))
            .unwrap_or(RegionalMultiplier::NEUTRAL);

        let monthly_taxes = to_cents(self.monthly_tax(inputs, state, &region));

        let property_type = inputs.property_type.unwrap_or_default();
        let monthly_insurance = to_cents(
            inputs.property_value.max(0.0) * insurance_rate(property_type) / 12.0
                * profile.catastrophe_multiplier,
        );

        let sqft = inputs
            .sqft
            .map(f64::from)
            .unwrap_or(self.config.reference_sqft);
        let utilities_base = if inputs.is_vacant {
            self.config.vacant_utilities
        } else {
            self.config.occupied_utilities
        };
        let monthly_utilities = to_cents(
            utilities_base
                * size_multiplier(sqft, self.config.reference_sqft)
                * profile.climate_multiplier,
        );

        let monthly_maintenance = to_cents(
            self.config.base_maintenance
                * lot_size_multiplier(inputs.lot_size_acres)
                * region.labor
                * profile.seasonal_multiplier,
        );

        let monthly_loan_payment = inputs
            .financing
            .filter(|f| f.is_financed)
            .map(|f| loan_payment(f.loan_amount, f.interest_rate, f.term_months, f.interest_only))
            .unwrap_or(Decimal::ZERO);

        let monthly_hoa = to_cents(inputs.monthly_hoa.unwrap_or(0.0).max(0.0));

        let total_monthly = monthly_taxes
            + monthly_insurance
            + monthly_utilities
            + monthly_maintenance
            + monthly_loan_payment
            + monthly_hoa;
        let total_holding = total_monthly * Decimal::from(inputs.holding_months);

        debug!(
            state = inputs.state,
            county = ?inputs.county,
            months = inputs.holding_months,
            property_type = ?property_type,
            total_monthly = %total_monthly,
            total = %total_holding,
            "Holding costs calculated"
        );

        HoldingBreakdown {
            monthly_taxes,
            monthly_insurance,
            monthly_utilities,
            monthly_maintenance,
            monthly_loan_payment,
            monthly_hoa,
            total_monthly,
            holding_period_months: inputs.holding_months,
            total_holding,
        }
    }

    fn monthly_tax(&self, inputs: &HoldingInputs<'_>, state: Option<UsState>, region: &RegionalMultiplier) -> f64 {
        if let Some(annual) = inputs.annual_taxes {
            return annual.max(0.0) / 12.0;
        }
        let assessed = inputs
            .assessed_value
            .unwrap_or(inputs.property_value * self.config.assessed_ratio)
            .max(0.0);
        let rate = match (state, inputs.county) {
            (Some(s), Some(county)) => county_tax_rate(s, county).unwrap_or(region.tax_rate),
            _ => region.tax_rate,
        };
        assessed * rate / 12.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn calc() -> HoldingCalculator {
        HoldingCalculator::default()
    }

    #[test]
    fn test_interest_only_payment() {
        assert_eq!(loan_payment(70_000.0, 0.08, 60, true), dec!(466.67));
    }

    #[test]
    fn test_amortizing_payment() {
        let payment = loan_payment(70_000.0, 0.08, 60, false);
        assert!(payment > dec!(1400), "{payment}");
        assert_eq!(payment, dec!(1419.33));
    }

    #[test]
    fn test_loan_payment_degenerate_inputs() {
        assert_eq!(loan_payment(0.0, 0.08, 60, false), Decimal::ZERO);
        assert_eq!(loan_payment(-5.0, 0.08, 60, true), Decimal::ZERO);
        assert_eq!(loan_payment(70_000.0, 0.0, 60, false), Decimal::ZERO);
        assert_eq!(loan_payment(70_000.0, 0.08, 0, false), Decimal::ZERO);
    }

    #[test]
    fn test_property_tax_new_jersey_vs_hawaii() {
        let nj = calc().calculate(&HoldingInputs {
            assessed_value: Some(100_000.0),
            ..HoldingInputs::new(100_000.0, "NJ")
        });
        let hi = calc().calculate(&HoldingInputs {
            assessed_value: Some(100_000.0),
            ..HoldingInputs::new(100_000.0, "HI")
        });
        assert_eq!(nj.monthly_taxes, dec!(207.50));
        assert_eq!(hi.monthly_taxes, dec!(23.33));
        assert!(nj.monthly_taxes > hi.monthly_taxes * dec!(5));
    }

    #[test]
    fn test_assessed_value_defaults_to_eighty_percent() {
        let b = calc().calculate(&HoldingInputs::new(100_000.0, "Atlantis"));
        // 80,000 × 1% / 12
        assert_eq!(b.monthly_taxes, dec!(66.67));
    }

    #[test]
    fn test_high_tax_county_overrides_state_rate() {
        let b = calc().calculate(&HoldingInputs {
            assessed_value: Some(120_000.0),
            county: Some("camden county"),
            ..HoldingInputs::new(150_000.0, "NJ")
        });
        // 120,000 × 2.99% / 12
        assert_eq!(b.monthly_taxes, dec!(299.00));
    }

    #[test]
    fn test_annual_taxes_override() {
        let b = calc().calculate(&HoldingInputs {
            annual_taxes: Some(3_000.0),
            ..HoldingInputs::new(100_000.0, "NJ")
        });
        assert_eq!(b.monthly_taxes, dec!(250.00));
    }

    #[test]
    fn test_negative_values_cost_nothing() {
        let b = calc().calculate(&HoldingInputs {
            assessed_value: Some(-50_000.0),
            ..HoldingInputs::new(-100_000.0, "NJ")
        });
        assert_eq!(b.monthly_taxes, Decimal::ZERO);
        assert_eq!(b.monthly_insurance, Decimal::ZERO);

        let derived = calc().calculate(&HoldingInputs::new(-100_000.0, "NJ"));
        assert_eq!(derived.monthly_taxes, Decimal::ZERO);
        assert_eq!(derived.total_monthly, derived.sum_of_monthly());
    }

    #[test]
    fn test_insurance_defaults_to_vacant_building() {
        let b = calc().calculate(&HoldingInputs::new(120_000.0, "PA"));
        assert_eq!(b.monthly_insurance, dec!(100.00));
        let sf = calc().calculate(&HoldingInputs {
            property_type: Some(PropertyType::SingleFamily),
            ..HoldingInputs::new(120_000.0, "PA")
        });
        assert_eq!(sf.monthly_insurance, dec!(50.00));
    }

    #[test]
    fn test_catastrophe_states_cost_more_to_insure() {
        let pa = calc().calculate(&HoldingInputs::new(200_000.0, "PA")).monthly_insurance;
        let fl = calc().calculate(&HoldingInputs::new(200_000.0, "FL")).monthly_insurance;
        let la = calc().calculate(&HoldingInputs::new(200_000.0, "LA")).monthly_insurance;
        assert!(fl > pa);
        assert!(la > pa);
    }

    #[test]
    fn test_utilities_scale_with_size_and_occupancy() {
        let small = calc().calculate(&HoldingInputs {
            sqft: Some(500),
            ..HoldingInputs::new(100_000.0, "Atlantis")
        });
        assert_eq!(small.monthly_utilities, dec!(105.00));
        let huge_occupied = calc().calculate(&HoldingInputs {
            sqft: Some(9_000),
            is_vacant: false,
            ..HoldingInputs::new(100_000.0, "Atlantis")
        });
        assert_eq!(huge_occupied.monthly_utilities, dec!(300.00));
    }

    #[test]
    fn test_lot_size_multiplier_bounds() {
        assert_eq!(lot_size_multiplier(None), 1.0);
        assert_eq!(lot_size_multiplier(Some(0.25)), 1.0);
        assert_eq!(lot_size_multiplier(Some(0.0)), 0.875);
        assert_eq!(lot_size_multiplier(Some(-3.0)), 0.8);
        assert_eq!(lot_size_multiplier(Some(10.0)), 2.0);
    }

    #[test]
    fn test_financing_only_counts_when_financed() {
        let loan = FinancingParams {
            is_financed: true,
            loan_amount: 70_000.0,
            interest_rate: 0.08,
            term_months: 60,
            interest_only: true,
        };
        let financed = calc().calculate(&HoldingInputs {
            financing: Some(&loan),
            ..HoldingInputs::new(100_000.0, "PA")
        });
        assert_eq!(financed.monthly_loan_payment, dec!(466.67));

        let unflagged = FinancingParams { is_financed: false, ..loan.clone() };
        let cash = calc().calculate(&HoldingInputs {
            financing: Some(&unflagged),
            ..HoldingInputs::new(100_000.0, "PA")
        });
        assert_eq!(cash.monthly_loan_payment, Decimal::ZERO);
    }

    #[test]
    fn test_totals() {
        let b = calc().calculate(&HoldingInputs {
            holding_months: 9,
            monthly_hoa: Some(125.0),
            lot_size_acres: Some(1.0),
            county: Some("Harris"),
            ..HoldingInputs::new(187_500.0, "TX")
        });
        assert_eq!(b.monthly_hoa, dec!(125.00));
        assert_eq!(b.total_monthly, b.sum_of_monthly());
        assert_eq!(b.total_holding, b.total_monthly * dec!(9));
        assert_eq!(b.holding_period_months, 9);
    }

    #[test]
    fn test_zero_months_costs_nothing() {
        let b = calc().calculate(&HoldingInputs {
            holding_months: 0,
            ..HoldingInputs::new(100_000.0, "PA")
        });
        assert_eq!(b.total_holding, Decimal::ZERO);
        assert!(b.total_monthly > Decimal::ZERO);
    }
}
