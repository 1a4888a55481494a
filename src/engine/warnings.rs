//! Warnings raised after the numbers are in.

use rust_decimal::Decimal;

use crate::config::WarningThresholds;
use crate::money::as_f64;
use crate::types::{
    AcquisitionCosts, CostInputs, HoldingBreakdown, RehabBreakdown, SellingCosts, Severity,
    Warning, WarningCode,
};

/// Computed figures the post-hoc rules look at.
#[derive(Debug, Clone, Copy)]
pub struct Findings<'a> {
    pub inputs: &'a CostInputs,
    pub acquisition: &'a AcquisitionCosts,
    pub rehab: &'a RehabBreakdown,
    /// Square footage the rehab budget was priced at.
    pub rehab_sqft: u32,
    pub holding: &'a HoldingBreakdown,
    pub selling: &'a SellingCosts,
    pub grand_total: Decimal,
    /// Labor multiplier of the region the rehab was priced in.
    pub labor_multiplier: f64,
}

pub fn post_hoc(f: &Findings<'_>, t: &WarningThresholds) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let sale = f.inputs.sale_price;
    let bid = f.inputs.bid_amount;

    let net_profit = sale - as_f64(f.grand_total);
    if net_profit < 0.0 {
        warnings.push(Warning::new(
            WarningCode::NegativeProfit,
            Severity::Critical,
            format!("Projected loss of ${:.0} after all costs", -net_profit),
        ));
    } else {
        let margin = net_profit / sale;
        if margin < t.min_profit_margin {
            warnings.push(Warning::new(
                WarningCode::LowProfitMargin,
                Severity::Warning,
                format!(
                    "Profit margin {:.1}% is below {:.0}%",
                    margin * 100.0,
                    t.min_profit_margin * 100.0
                ),
            ));
        }
    }

    let rehab_total = as_f64(f.rehab.total_rehab);
    if f.rehab_sqft > 0 {
        let per_sqft = rehab_total / f64::from(f.rehab_sqft);
        if per_sqft > t.max_rehab_per_sqft {
            warnings.push(Warning::new(
                WarningCode::HighRehabPerSqft,
                Severity::Warning,
                format!(
                    "Rehab runs ${per_sqft:.0}/sqft (over ${:.0})",
                    t.max_rehab_per_sqft
                ),
            ));
        }
    }
    if rehab_total > bid * t.rehab_to_bid_ratio {
        warnings.push(Warning::new(
            WarningCode::RehabExceedsHalfBid,
            Severity::Info,
            format!(
                "Rehab ${rehab_total:.0} exceeds {:.0}% of the bid",
                t.rehab_to_bid_ratio * 100.0
            ),
        ));
    }

    if f.holding.holding_period_months > t.extended_holding_months {
        warnings.push(Warning::new(
            WarningCode::ExtendedHolding,
            Severity::Warning,
            format!(
                "{}-month hold is longer than {} months",
                f.holding.holding_period_months, t.extended_holding_months
            ),
        ));
    }
    let holding_total = as_f64(f.holding.total_holding);
    if holding_total > bid * t.holding_to_bid_ratio {
        warnings.push(Warning::new(
            WarningCode::HighHoldingCosts,
            Severity::Info,
            format!(
                "Holding costs ${holding_total:.0} exceed {:.0}% of the bid",
                t.holding_to_bid_ratio * 100.0
            ),
        ));
    }

    let premium = as_f64(f.acquisition.buyers_premium);
    if premium > bid * t.premium_to_bid_ratio {
        warnings.push(Warning::new(
            WarningCode::HighBuyersPremium,
            Severity::Warning,
            format!(
                "Buyer's premium ${premium:.0} exceeds {:.0}% of the bid",
                t.premium_to_bid_ratio * 100.0
            ),
        ));
    }

    let selling_total = as_f64(f.selling.total_selling);
    if selling_total > sale * t.selling_to_sale_ratio {
        warnings.push(Warning::new(
            WarningCode::HighSellingCosts,
            Severity::Warning,
            format!(
                "Selling costs ${selling_total:.0} exceed {:.0}% of the sale price",
                t.selling_to_sale_ratio * 100.0
            ),
        ));
    }

    if f.labor_multiplier > t.max_labor_multiplier {
        warnings.push(Warning::new(
            WarningCode::HighLaborCosts,
            Severity::Info,
            format!(
                "Local labor runs {:.2}x the national average",
                f.labor_multiplier
            ),
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::rehab::itemize;
    use crate::types::RehabScope;
    use rust_decimal_macros::dec;

    fn acquisition(premium: Decimal) -> AcquisitionCosts {
        AcquisitionCosts {
            bid_amount: dec!(100000),
            buyers_premium: premium,
            transfer_tax: Decimal::ZERO,
            recording_fees: Decimal::ZERO,
            title_search: Decimal::ZERO,
            title_insurance: Decimal::ZERO,
            legal_fees: Decimal::ZERO,
            total_acquisition: dec!(100000) + premium,
        }
    }

    fn holding(months: u32, monthly: Decimal) -> HoldingBreakdown {
        HoldingBreakdown {
            monthly_taxes: monthly,
            monthly_insurance: Decimal::ZERO,
            monthly_utilities: Decimal::ZERO,
            monthly_maintenance: Decimal::ZERO,
            monthly_loan_payment: Decimal::ZERO,
            monthly_hoa: Decimal::ZERO,
            total_monthly: monthly,
            holding_period_months: months,
            total_holding: monthly * Decimal::from(months),
        }
    }

    fn selling(total: Decimal) -> SellingCosts {
        SellingCosts {
            agent_commission: total,
            closing_costs: Decimal::ZERO,
            staging: Decimal::ZERO,
            marketing: Decimal::ZERO,
            home_warranty: Decimal::ZERO,
            seller_concessions: Decimal::ZERO,
            total_selling: total,
        }
    }

    fn codes(warnings: &[Warning]) -> Vec<WarningCode> {
        warnings.iter().map(|w| w.code).collect()
    }

    #[test]
    fn test_healthy_deal_has_no_warnings() {
        let inputs = CostInputs::new(100_000.0, 300_000.0, "PA");
        let rehab = itemize(30_000.0, RehabScope::Light);
        let acq = acquisition(dec!(5000));
        let hold = holding(6, dec!(500));
        let sell = selling(dec!(20000));
        let findings = Findings {
            inputs: &inputs,
            acquisition: &acq,
            rehab: &rehab,
            rehab_sqft: 1_500,
            holding: &hold,
            selling: &sell,
            grand_total: dec!(180000),
            labor_multiplier: 1.0,
        };
        assert!(post_hoc(&findings, &WarningThresholds::default()).is_empty());
    }

    #[test]
    fn test_every_rule_fires() {
        let inputs = CostInputs::new(100_000.0, 200_000.0, "CA");
        let rehab = itemize(200_000.0, RehabScope::Gut);
        let acq = acquisition(dec!(10000));
        let hold = holding(18, dec!(1000));
        let sell = selling(dec!(40000));
        let findings = Findings {
            inputs: &inputs,
            acquisition: &acq,
            rehab: &rehab,
            rehab_sqft: 1_500,
            holding: &hold,
            selling: &sell,
            grand_total: dec!(450000),
            labor_multiplier: 1.45,
        };
        let warnings = post_hoc(&findings, &WarningThresholds::default());
        assert_eq!(
            codes(&warnings),
            vec![
                WarningCode::NegativeProfit,
                WarningCode::HighRehabPerSqft,
                WarningCode::RehabExceedsHalfBid,
                WarningCode::ExtendedHolding,
                WarningCode::HighHoldingCosts,
                WarningCode::HighBuyersPremium,
                WarningCode::HighSellingCosts,
                WarningCode::HighLaborCosts,
            ]
        );
        assert_eq!(warnings[0].severity, Severity::Critical);
    }

    #[test]
    fn test_thin_margin_without_loss() {
        let inputs = CostInputs::new(100_000.0, 200_000.0, "PA");
        let rehab = itemize(10_000.0, RehabScope::Cosmetic);
        let acq = acquisition(dec!(5000));
        let hold = holding(3, dec!(100));
        let sell = selling(dec!(10000));
        let findings = Findings {
            inputs: &inputs,
            acquisition: &acq,
            rehab: &rehab,
            rehab_sqft: 1_500,
            holding: &hold,
            selling: &sell,
            grand_total: dec!(180000),
            labor_multiplier: 1.0,
        };
        let warnings = post_hoc(&findings, &WarningThresholds::default());
        assert_eq!(codes(&warnings), vec![WarningCode::LowProfitMargin]);
        assert_eq!(warnings[0].severity, Severity::Warning);
    }
}
