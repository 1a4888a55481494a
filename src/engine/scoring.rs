//! Confidence, data quality and contingency sizing.

use rust_decimal::prelude::*;

use crate::config::EngineConfig;
use crate::money::round_whole;
use crate::types::{ConfidenceLevel, CostInputs, RehabScope};

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// How much the estimate can be trusted, 0–100.
pub fn confidence_score(
    inputs: &CostInputs,
    state_recognized: bool,
    rehab_confidence: ConfidenceLevel,
) -> u32 {
    let mut score = 0u32;
    if inputs.bid_amount > 0.0 {
        score += 20;
    }
    if inputs.sale_price > 0.0 {
        score += 15;
    }
    if state_recognized {
        score += 10;
    }
    if inputs.effective_sqft().is_some() {
        score += 15;
    }
    if inputs.effective_year_built().is_some() {
        score += 10;
    }
    if inputs.assessed_value.is_some() {
        score += 10;
    }
    if inputs.annual_taxes.is_some() {
        score += 10;
    }
    score += match rehab_confidence {
        ConfidenceLevel::High => 10,
        ConfidenceLevel::Medium => 5,
        ConfidenceLevel::Low => 0,
    };
    score.min(100)
}

/// Input completeness, 0–100: required fields 50, property details 30,
/// financial details 20.
pub fn data_quality(inputs: &CostInputs) -> u32 {
    let weighted: [(bool, u32); 11] = [
        (inputs.bid_amount > 0.0, 20),
        (inputs.sale_price > 0.0, 20),
        (!inputs.state.trim().is_empty(), 10),
        (inputs.effective_sqft().is_some(), 8),
        (inputs.effective_year_built().is_some(), 7),
        (inputs.condition.is_some(), 6),
        (inputs.property_value.is_some(), 5),
        (present(inputs.county.as_deref()), 4),
        (inputs.assessed_value.is_some(), 8),
        (inputs.annual_taxes.is_some(), 8),
        (inputs.monthly_hoa.is_some(), 4),
    ];
    weighted
        .iter()
        .filter(|(has, _)| *has)
        .map(|(_, points)| points)
        .sum()
}

pub fn confidence_factor(confidence: ConfidenceLevel) -> f64 {
    match confidence {
        ConfidenceLevel::Low => 1.5,
        ConfidenceLevel::Medium => 1.0,
        ConfidenceLevel::High => 0.8,
    }
}

pub fn scope_factor(scope: RehabScope) -> f64 {
    match scope {
        RehabScope::Gut | RehabScope::Heavy => 1.2,
        RehabScope::Cosmetic => 0.8,
        RehabScope::Light | RehabScope::Moderate => 1.0,
    }
}

/// Effective contingency rate, held inside the configured band.
pub fn contingency_rate(config: &EngineConfig, confidence: ConfidenceLevel, scope: RehabScope) -> f64 {
    (config.contingency_base_rate * confidence_factor(confidence) * scope_factor(scope))
        .clamp(config.contingency_min_rate, config.contingency_max_rate)
}

/// Reserve on `total_costs`, rounded to whole dollars.
pub fn contingency(total_costs: Decimal, rate: f64) -> Decimal {
    let rate = Decimal::from_f64(rate).unwrap_or(Decimal::ZERO);
    round_whole(total_costs * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn complete_inputs() -> CostInputs {
        let mut inputs = CostInputs::new(50_000.0, 150_000.0, "PA");
        inputs.sqft = Some(1_500);
        inputs.year_built = Some(1990);
        inputs.condition = Some(crate::types::PropertyCondition::Poor);
        inputs.property_value = Some(140_000.0);
        inputs.county = Some("Blair".into());
        inputs.assessed_value = Some(90_000.0);
        inputs.annual_taxes = Some(2_400.0);
        inputs.monthly_hoa = Some(0.0);
        inputs
    }

    #[test]
    fn test_data_quality_bounds() {
        assert_eq!(data_quality(&CostInputs::new(1.0, 1.0, "PA")), 50);
        assert_eq!(data_quality(&complete_inputs()), 100);
    }

    #[test]
    fn test_blank_county_earns_nothing() {
        let mut inputs = CostInputs::new(1.0, 1.0, "PA");
        inputs.county = Some("   ".into());
        assert_eq!(data_quality(&inputs), 50);
    }

    #[test]
    fn test_confidence_score() {
        let bare = CostInputs::new(1.0, 1.0, "PA");
        assert_eq!(confidence_score(&bare, true, ConfidenceLevel::Low), 45);
        assert_eq!(confidence_score(&bare, false, ConfidenceLevel::Low), 35);
        assert_eq!(confidence_score(&complete_inputs(), true, ConfidenceLevel::High), 100);
        assert_eq!(confidence_score(&complete_inputs(), true, ConfidenceLevel::Medium), 95);
    }

    #[test]
    fn test_contingency_rate_stays_in_band() {
        let config = EngineConfig::default();
        for confidence in [ConfidenceLevel::Low, ConfidenceLevel::Medium, ConfidenceLevel::High] {
            for scope in RehabScope::ALL {
                let rate = contingency_rate(&config, confidence, *scope);
                assert!((0.05..=0.20).contains(&rate), "{confidence}/{scope}: {rate}");
            }
        }
        assert!((contingency_rate(&config, ConfidenceLevel::Low, RehabScope::Gut) - 0.18).abs() < 1e-12);
        assert!((contingency_rate(&config, ConfidenceLevel::High, RehabScope::Cosmetic) - 0.064).abs() < 1e-12);
    }

    #[test]
    fn test_contingency_rate_clamped_by_config() {
        let tight = EngineConfig {
            contingency_max_rate: 0.12,
            ..EngineConfig::default()
        };
        assert_eq!(contingency_rate(&tight, ConfidenceLevel::Low, RehabScope::Gut), 0.12);
    }

    #[test]
    fn test_contingency_rounds_to_whole_dollars() {
        assert_eq!(contingency(dec!(123456.78), 0.10), dec!(12346));
        assert_eq!(contingency(dec!(1000.00), 0.064), dec!(64));
    }
}
