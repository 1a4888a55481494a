//! Core engine: validate → compute → score → contingency → warn.

pub mod profit;
pub mod scoring;
pub mod validation;
pub mod warnings;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculators::{
    AcquisitionCalculator, AcquisitionInputs, HoldingCalculator, HoldingInputs, RehabCalculator,
    RehabInputs, SellingCalculator, SellingInputs,
};
use crate::config::AppConfig;
use crate::reference::states::UsState;
use crate::types::{ConfidenceLevel, CostBreakdown, CostError, CostInputs, FieldError, Severity};

pub use profit::ProfitAnalysis;

/// Estimates the full cost of a deal. Holds only configuration, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct CostEngine {
    config: AppConfig,
    reference_year: i32,
    acquisition: AcquisitionCalculator,
    rehab: RehabCalculator,
    holding: HoldingCalculator,
    selling: SellingCalculator,
}

impl Default for CostEngine {
    fn default() -> Self {
        Self::build(AppConfig::default())
    }
}

impl CostEngine {
    pub fn new(config: AppConfig) -> Result<Self, CostError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AppConfig) -> Self {
        let reference_year = config
            .engine
            .reference_year
            .unwrap_or_else(|| Utc::now().year());
        Self {
            acquisition: AcquisitionCalculator::new(config.acquisition.clone()),
            rehab: RehabCalculator::new(),
            holding: HoldingCalculator::new(config.holding.clone()),
            selling: SellingCalculator::new(config.selling.clone()),
            reference_year,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Year used for property age, fixed when the engine is built.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Full lifecycle estimate for one deal.
    pub fn calculate_total_costs(&self, inputs: &CostInputs) -> Result<CostBreakdown, CostError> {
        let breakdown = self.estimate(inputs)?;

        for w in &breakdown.warnings {
            if w.severity >= Severity::Warning {
                warn!(code = ?w.code, severity = ?w.severity, "{}", w.message);
            }
        }
        info!(
            state = %inputs.state,
            bid = inputs.bid_amount,
            grand_total = %breakdown.grand_total,
            confidence = %breakdown.confidence,
            data_quality = breakdown.data_quality,
            warnings = breakdown.warnings.len(),
            "Cost estimate complete"
        );

        Ok(breakdown)
    }

    /// Breakdown plus profitability at the input sale price.
    pub fn analyze(&self, inputs: &CostInputs) -> Result<(CostBreakdown, ProfitAnalysis), CostError> {
        let breakdown = self.calculate_total_costs(inputs)?;
        let profit = ProfitAnalysis::from_breakdown(&breakdown, inputs.sale_price);
        Ok((breakdown, profit))
    }

    /// Highest bid, to the cent, whose estimate still reaches
    /// `target_margin`. `None` when even a $1 bid falls short.
    pub fn max_bid(&self, inputs: &CostInputs, target_margin: f64) -> Result<Option<Decimal>, CostError> {
        if !target_margin.is_finite() {
            return Err(CostError::Validation(vec![FieldError {
                field: "targetMargin",
                message: format!("must be finite, got {target_margin}"),
            }]));
        }

        let meets_target = |cents: i64| -> Result<bool, CostError> {
            let mut candidate = inputs.clone();
            candidate.bid_amount = cents as f64 / 100.0;
            let breakdown = self.estimate(&candidate)?;
            let profit = ProfitAnalysis::from_breakdown(&breakdown, candidate.sale_price);
            Ok(profit.profit_margin >= target_margin)
        };

        let mut lo: i64 = 100;
        if !meets_target(lo)? {
            debug!(target_margin, "No bid reaches the target margin");
            return Ok(None);
        }
        let mut hi = (inputs.sale_price * 100.0).floor() as i64;
        if hi <= lo {
            return Ok(Some(Decimal::new(lo, 2)));
        }
        if meets_target(hi)? {
            return Ok(Some(Decimal::new(hi, 2)));
        }
        // Invariant: lo meets the target, hi does not.
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if meets_target(mid)? {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let bid = Decimal::new(lo, 2);
        debug!(target_margin, max_bid = %bid, "Max bid found");
        Ok(Some(bid))
    }

    fn estimate(&self, inputs: &CostInputs) -> Result<CostBreakdown, CostError> {
        let mut findings =
            validation::validate(inputs, &self.config.warnings, self.reference_year)?;

        let acquisition = self.acquisition.calculate(&AcquisitionInputs::from(inputs));
        let rehab = self
            .rehab
            .estimate(&RehabInputs::from_cost_inputs(inputs, self.reference_year));
        let holding = self.holding.calculate(&HoldingInputs::from(inputs));
        let selling = self.selling.calculate(&SellingInputs::from(inputs));

        let total_costs = acquisition.total_acquisition
            + rehab.breakdown.total_rehab
            + holding.total_holding
            + selling.total_selling;

        let state_recognized = UsState::parse(&inputs.state).is_some();
        let confidence_score =
            scoring::confidence_score(inputs, state_recognized, rehab.confidence);
        let confidence = ConfidenceLevel::from_score(confidence_score);
        let data_quality = scoring::data_quality(inputs);

        let contingency_rate =
            scoring::contingency_rate(&self.config.engine, confidence, inputs.rehab_scope);
        let contingency = scoring::contingency(total_costs, contingency_rate);
        let grand_total = total_costs + contingency;

        let labor_multiplier = rehab.region.labor;
        findings.extend(warnings::post_hoc(
            &warnings::Findings {
                inputs,
                acquisition: &acquisition,
                rehab: &rehab.breakdown,
                rehab_sqft: rehab.sqft,
                holding: &holding,
                selling: &selling,
                grand_total,
                labor_multiplier,
            },
            &self.config.warnings,
        ));

        debug!(
            total_costs = %total_costs,
            contingency = %contingency,
            contingency_rate,
            confidence_score,
            "Breakdown assembled"
        );

        Ok(CostBreakdown {
            acquisition,
            rehab: rehab.breakdown,
            holding,
            selling,
            total_costs,
            contingency,
            grand_total,
            confidence,
            confidence_score,
            data_quality,
            contingency_rate,
            warnings: findings,
        })
    }
}

/// Estimate with the default configuration.
pub fn calculate_total_costs(inputs: &CostInputs) -> Result<CostBreakdown, CostError> {
    CostEngine::default().calculate_total_costs(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::types::{PropertyData, RehabScope, WarningCode};
    use rust_decimal::prelude::ToPrimitive;

    fn engine() -> CostEngine {
        CostEngine::new(AppConfig {
            engine: EngineConfig {
                reference_year: Some(2026),
                ..EngineConfig::default()
            },
            ..AppConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_totals_add_up() {
        let mut inputs = CostInputs::new(50_000.0, 180_000.0, "PA");
        inputs.auction_platform = Some("bid4assets".into());
        inputs.sqft = Some(1_400);
        let b = engine().calculate_total_costs(&inputs).unwrap();

        assert_eq!(
            b.total_costs,
            b.acquisition.total_acquisition
                + b.rehab.total_rehab
                + b.holding.total_holding
                + b.selling.total_selling
        );
        assert_eq!(b.grand_total, b.total_costs + b.contingency);
        assert_eq!(b.acquisition.total_acquisition, b.acquisition.sum_of_components());
        assert_eq!(b.rehab.total_rehab, b.rehab.sum_of_components());
        assert_eq!(b.selling.total_selling, b.selling.sum_of_components());
        assert_eq!(b.acquisition.total_acquisition, Decimal::from(55_250));
    }

    #[test]
    fn test_validation_error_has_no_breakdown() {
        let err = engine()
            .calculate_total_costs(&CostInputs::new(0.0, 0.0, ""))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["bidAmount", "salePrice", "state"]);
    }

    #[test]
    fn test_validation_warnings_come_first() {
        let inputs = CostInputs::new(170_000.0, 180_000.0, "Atlantis");
        let b = engine().calculate_total_costs(&inputs).unwrap();
        assert_eq!(b.warnings[0].code, WarningCode::UnrecognizedState);
        assert_eq!(b.warnings[1].code, WarningCode::BidNearSalePrice);
        assert!(b.warnings.iter().any(|w| w.code == WarningCode::NegativeProfit));
    }

    #[test]
    fn test_labor_warning_uses_priced_region() {
        let has_labor_warning = |b: &CostBreakdown| {
            b.warnings.iter().any(|w| w.code == WarningCode::HighLaborCosts)
        };
        let mut inputs = CostInputs::new(50_000.0, 250_000.0, "OH");
        inputs.metro = Some("San Francisco".into());
        assert!(!has_labor_warning(&engine().calculate_total_costs(&inputs).unwrap()));

        inputs.rehab_data = Some(PropertyData {
            state: Some("CA".into()),
            ..PropertyData::default()
        });
        assert!(has_labor_warning(&engine().calculate_total_costs(&inputs).unwrap()));
    }

    #[test]
    fn test_oversized_amounts_rejected_not_zeroed() {
        for (bid, sale) in [(1e29, 2e29), (7e28, 8e28)] {
            let err = engine()
                .calculate_total_costs(&CostInputs::new(bid, sale, "PA"))
                .unwrap_err();
            assert_eq!(err.fields(), vec!["bidAmount", "salePrice"]);
        }
    }

    #[test]
    fn test_contingency_follows_scope() {
        let mut inputs = CostInputs::new(50_000.0, 180_000.0, "PA");
        inputs.rehab_scope = RehabScope::Cosmetic;
        let cosmetic = engine().calculate_total_costs(&inputs).unwrap();
        inputs.rehab_scope = RehabScope::Gut;
        let gut = engine().calculate_total_costs(&inputs).unwrap();
        assert!(gut.contingency_rate > cosmetic.contingency_rate);
    }

    #[test]
    fn test_reference_year_pinned() {
        assert_eq!(engine().reference_year(), 2026);
        let mut inputs = CostInputs::new(50_000.0, 180_000.0, "PA");
        inputs.year_built = Some(2027);
        assert_eq!(
            engine().calculate_total_costs(&inputs).unwrap_err().fields(),
            vec!["yearBuilt"]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AppConfig {
            engine: EngineConfig {
                contingency_min_rate: 0.5,
                contingency_max_rate: 0.1,
                ..EngineConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(CostEngine::new(config), Err(CostError::Config(_))));
    }

    #[test]
    fn test_max_bid_hits_target() {
        let mut inputs = CostInputs::new(1.0, 200_000.0, "OH");
        inputs.sqft = Some(1_200);
        inputs.rehab_scope = RehabScope::Light;
        let engine = engine();
        let bid = engine.max_bid(&inputs, 0.20).unwrap().expect("a bid exists");

        let cents = (bid * Decimal::from(100)).to_i64().unwrap();
        inputs.bid_amount = cents as f64 / 100.0;
        let (_, at_bid) = engine.analyze(&inputs).unwrap();
        assert!(at_bid.profit_margin >= 0.20);

        inputs.bid_amount = (cents + 1) as f64 / 100.0;
        let (_, above) = engine.analyze(&inputs).unwrap();
        assert!(above.profit_margin < 0.20);
    }

    #[test]
    fn test_max_bid_unreachable_target() {
        let inputs = CostInputs::new(1.0, 50_000.0, "NY");
        assert_eq!(engine().max_bid(&inputs, 0.95).unwrap(), None);
    }

    #[test]
    fn test_max_bid_propagates_validation() {
        let inputs = CostInputs::new(1.0, 50_000.0, "");
        assert_eq!(engine().max_bid(&inputs, 0.1).unwrap_err().fields(), vec!["state"]);
        assert!(engine().max_bid(&CostInputs::new(1.0, 50_000.0, "PA"), f64::NAN).is_err());
    }
}
