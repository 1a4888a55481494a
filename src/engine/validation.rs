//! Input validation.
//!
//! Fatal problems are collected together and returned as one
//! `CostError::Validation`; suspicious-but-usable inputs become warnings.

use tracing::debug;

use crate::config::WarningThresholds;
use crate::reference::states::UsState;
use crate::types::{CostError, CostInputs, FieldError, Severity, Warning, WarningCode};

/// Largest dollar amount accepted on any input field.
pub const MAX_AMOUNT: f64 = 1e12;

/// Earliest accepted construction year.
pub const MIN_YEAR_BUILT: i32 = 1600;

fn positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value <= MAX_AMOUNT
}

/// Optional dollar fields may be zero but never negative, non-finite or huge.
fn check_optional_amount(errors: &mut Vec<FieldError>, field: &'static str, value: Option<f64>) {
    if let Some(v) = value.filter(|v| !(0.0..=MAX_AMOUNT).contains(v)) {
        errors.push(FieldError {
            field,
            message: format!("must be between 0 and {MAX_AMOUNT:.0}, got {v}"),
        });
    }
}

/// Check `inputs`, returning validation-time warnings on success.
pub fn validate(
    inputs: &CostInputs,
    thresholds: &WarningThresholds,
    reference_year: i32,
) -> Result<Vec<Warning>, CostError> {
    let mut errors = Vec::new();

    if !positive_amount(inputs.bid_amount) {
        errors.push(FieldError {
            field: "bidAmount",
            message: format!(
                "must be a positive amount up to {MAX_AMOUNT:.0}, got {}",
                inputs.bid_amount
            ),
        });
    }
    if !positive_amount(inputs.sale_price) {
        errors.push(FieldError {
            field: "salePrice",
            message: format!(
                "must be a positive amount up to {MAX_AMOUNT:.0}, got {}",
                inputs.sale_price
            ),
        });
    }
    if inputs.state.trim().is_empty() {
        errors.push(FieldError {
            field: "state",
            message: "is required".to_string(),
        });
    }
    check_optional_amount(&mut errors, "propertyValue", inputs.property_value);
    check_optional_amount(&mut errors, "assessedValue", inputs.assessed_value);
    check_optional_amount(&mut errors, "annualTaxes", inputs.annual_taxes);
    check_optional_amount(&mut errors, "monthlyHoa", inputs.monthly_hoa);
    check_optional_amount(&mut errors, "legalFeesOverride", inputs.legal_fees_override);
    check_optional_amount(&mut errors, "concessionsOverride", inputs.concessions_override);

    let year_built = inputs.effective_year_built();
    match year_built {
        Some(year) if year > reference_year => errors.push(FieldError {
            field: "yearBuilt",
            message: format!("{year} is after {reference_year}"),
        }),
        Some(year) if year < MIN_YEAR_BUILT => errors.push(FieldError {
            field: "yearBuilt",
            message: format!("{year} is before {MIN_YEAR_BUILT}"),
        }),
        _ => {}
    }
    if let Some(financing) = inputs.active_financing() {
        if !positive_amount(financing.loan_amount) {
            errors.push(FieldError {
                field: "financing.loanAmount",
                message: format!(
                    "must be a positive amount up to {MAX_AMOUNT:.0} when isFinanced is set"
                ),
            });
        }
        if !(0.0..=1.0).contains(&financing.interest_rate) {
            errors.push(FieldError {
                field: "financing.interestRate",
                message: format!(
                    "must be an annual rate between 0 and 1, got {}",
                    financing.interest_rate
                ),
            });
        }
    }

    if !errors.is_empty() {
        debug!(count = errors.len(), "Inputs rejected");
        return Err(CostError::Validation(errors));
    }

    let mut warnings = Vec::new();
    let bid = inputs.bid_amount;
    let t = thresholds;

    if UsState::parse(&inputs.state).is_none() {
        warnings.push(Warning::new(
            WarningCode::UnrecognizedState,
            Severity::Warning,
            format!("Unrecognized state '{}'; national defaults used", inputs.state.trim()),
        ));
    }
    if bid >= inputs.sale_price * t.bid_to_sale_ratio {
        warnings.push(Warning::new(
            WarningCode::BidNearSalePrice,
            Severity::Warning,
            format!(
                "Bid ${bid:.0} is at least {:.0}% of the projected sale price ${:.0}",
                t.bid_to_sale_ratio * 100.0,
                inputs.sale_price
            ),
        ));
    }
    if let Some(value) = inputs.property_value.filter(|v| *v > 0.0) {
        if bid >= value * t.bid_to_value_ratio {
            warnings.push(Warning::new(
                WarningCode::BidNearPropertyValue,
                Severity::Warning,
                format!(
                    "Bid ${bid:.0} is at least {:.0}% of the property value ${value:.0}",
                    t.bid_to_value_ratio * 100.0
                ),
            ));
        }
    }
    if inputs.holding_months > t.max_holding_months {
        warnings.push(Warning::new(
            WarningCode::LongHoldingPeriod,
            Severity::Warning,
            format!(
                "Holding period of {} months exceeds {} months",
                inputs.holding_months, t.max_holding_months
            ),
        ));
    }
    if let Some(sqft) = inputs.effective_sqft() {
        if sqft < t.min_sqft || sqft > t.max_sqft {
            warnings.push(Warning::new(
                WarningCode::UnusualSquareFootage,
                Severity::Info,
                format!(
                    "{sqft} sqft is outside the typical {}-{} range",
                    t.min_sqft, t.max_sqft
                ),
            ));
        }
    }
    if let Some(year) = year_built {
        let age = reference_year.saturating_sub(year);
        if age > t.max_property_age {
            warnings.push(Warning::new(
                WarningCode::VeryOldProperty,
                Severity::Info,
                format!("Property is {age} years old; expect hidden repairs"),
            ));
        }
    }
    if let Some(financing) = inputs.active_financing() {
        if financing.loan_amount > bid {
            warnings.push(Warning::new(
                WarningCode::LoanExceedsBid,
                Severity::Warning,
                format!(
                    "Loan ${:.0} exceeds the bid ${bid:.0}",
                    financing.loan_amount
                ),
            ));
        }
    }

    Ok(warnings)
}
