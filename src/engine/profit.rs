//! Deal profitability derived from a finished breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{as_f64, to_cents};
use crate::types::CostBreakdown;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAnalysis {
    pub sale_price: Decimal,
    /// Sale price minus costs before contingency.
    pub gross_profit: Decimal,
    /// Sale price minus the grand total.
    pub net_profit: Decimal,
    /// Net profit over sale price.
    pub profit_margin: f64,
    /// Net profit over the grand total.
    pub roi: f64,
    /// ROI scaled to twelve months of holding.
    pub annualized_roi: f64,
    /// Sale price at which the deal breaks even.
    pub break_even_sale_price: Decimal,
}

impl ProfitAnalysis {
    pub fn from_breakdown(breakdown: &CostBreakdown, sale_price: f64) -> Self {
        let sale = to_cents(sale_price);
        let gross_profit = sale - breakdown.total_costs;
        let net_profit = sale - breakdown.grand_total;

        let net = as_f64(net_profit);
        let grand_total = as_f64(breakdown.grand_total);
        let profit_margin = if sale_price > 0.0 { net / sale_price } else { 0.0 };
        let roi = if grand_total > 0.0 { net / grand_total } else { 0.0 };
        let months = breakdown.holding.holding_period_months.max(1);
        let annualized_roi = roi * 12.0 / f64::from(months);

        Self {
            sale_price: sale,
            gross_profit,
            net_profit,
            profit_margin,
            roi,
            annualized_roi,
            break_even_sale_price: breakdown.grand_total,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CostEngine;
    use crate::types::CostInputs;

    #[test]
    fn test_profit_identities() {
        let inputs = CostInputs::new(40_000.0, 180_000.0, "OH");
        let breakdown = CostEngine::default().calculate_total_costs(&inputs).unwrap();
        let p = ProfitAnalysis::from_breakdown(&breakdown, inputs.sale_price);

        assert_eq!(p.net_profit, p.sale_price - breakdown.grand_total);
        assert_eq!(p.gross_profit - p.net_profit, breakdown.contingency);
        assert_eq!(p.break_even_sale_price, breakdown.grand_total);
        assert!((p.annualized_roi - p.roi * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_month_hold_annualizes_over_one_month() {
        let mut inputs = CostInputs::new(40_000.0, 180_000.0, "OH");
        inputs.holding_months = 0;
        let breakdown = CostEngine::default().calculate_total_costs(&inputs).unwrap();
        let p = ProfitAnalysis::from_breakdown(&breakdown, inputs.sale_price);
        assert!((p.annualized_roi - p.roi * 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_losing_deal() {
        let inputs = CostInputs::new(170_000.0, 180_000.0, "OH");
        let breakdown = CostEngine::default().calculate_total_costs(&inputs).unwrap();
        let p = ProfitAnalysis::from_breakdown(&breakdown, inputs.sale_price);
        assert!(!p.is_profitable());
        assert!(p.profit_margin < 0.0);
        assert!(p.roi < 0.0);
    }
}
