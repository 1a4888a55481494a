//! Selling costs.
//!
//! Commission, seller closing costs, staging, marketing, home warranty and
//! concessions. Which of these apply depends on the sale strategy: wholesale
//! and auction exits skip the retail extras and the seller-paid transfer tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::to_cents;
use crate::reference::states::{StateProfile, UsState};
use crate::types::{
    CostInputs, MarketCondition, MarketingTier, PropertyCondition, SaleStrategy, SellingCosts,
    SellingOptions, StagingLevel, WarrantyTier,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellingConfig {
    /// Seller closing costs before the state multiplier. Default: 1.5%.
    pub closing_cost_rate: f64,
    /// Full staging, per square foot. Default: $2.50.
    pub staging_per_sqft: f64,
    /// Furniture rental per month. Default: $600.
    pub staging_monthly_rent: f64,
    /// Default: 2.
    pub staging_months: u32,
    /// Extra marketing spend as a share of the price above the threshold.
    /// Default: 0.25%.
    pub marketing_upscale_rate: f64,
    /// Default: $200,000.
    pub marketing_upscale_threshold: f64,
    /// Default: 1500.
    pub default_sqft: u32,
}

impl Default for SellingConfig {
    fn default() -> Self {
        Self {
            closing_cost_rate: 0.015,
            staging_per_sqft: 2.50,
            staging_monthly_rent: 600.0,
            staging_months: 2,
            marketing_upscale_rate: 0.0025,
            marketing_upscale_threshold: 200_000.0,
            default_sqft: 1_500,
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy rules
// ---------------------------------------------------------------------------

/// What a strategy pays for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyRules {
    /// Listing side of the commission (or auction house fee).
    pub listing_rate: f64,
    /// Buyer's agent side of the commission.
    pub buyer_agent_rate: f64,
    /// Staging, marketing and warranty are on the table.
    pub retail_extras: bool,
    /// Seller pays the state deed transfer tax.
    pub seller_pays_transfer_tax: bool,
}

pub fn strategy_rules(strategy: SaleStrategy) -> StrategyRules {
    match strategy {
        SaleStrategy::RetailAgent => StrategyRules {
            listing_rate: 0.03,
            buyer_agent_rate: 0.03,
            retail_extras: true,
            seller_pays_transfer_tax: true,
        },
        SaleStrategy::RetailFsbo => StrategyRules {
            listing_rate: 0.0,
            buyer_agent_rate: 0.03,
            retail_extras: true,
            seller_pays_transfer_tax: true,
        },
        SaleStrategy::Wholesale => StrategyRules {
            listing_rate: 0.0,
            buyer_agent_rate: 0.0,
            retail_extras: false,
            seller_pays_transfer_tax: false,
        },
        SaleStrategy::Auction => StrategyRules {
            listing_rate: 0.02,
            buyer_agent_rate: 0.0,
            retail_extras: false,
            seller_pays_transfer_tax: false,
        },
    }
}

/// Commission knobs for [`agent_commission`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionOptions {
    pub strategy: SaleStrategy,
    pub include_buyer_agent: bool,
}

impl Default for CommissionOptions {
    fn default() -> Self {
        Self {
            strategy: SaleStrategy::RetailAgent,
            include_buyer_agent: true,
        }
    }
}

/// Commission for a sale price. Dropping the buyer's agent removes that
/// side of the split.
pub fn agent_commission(sale_price: f64, options: CommissionOptions) -> Decimal {
    let rules = strategy_rules(options.strategy);
    let rate = if options.include_buyer_agent {
        rules.listing_rate + rules.buyer_agent_rate
    } else {
        rules.listing_rate
    };
    to_cents(sale_price * rate)
}

/// Full-service retail commission (6%).
pub fn calculate_agent_commission(sale_price: f64) -> Decimal {
    agent_commission(sale_price, CommissionOptions::default())
}

fn marketing_base(tier: MarketingTier) -> f64 {
    match tier {
        MarketingTier::Basic => 500.0,
        MarketingTier::Standard => 1_000.0,
        MarketingTier::Premium => 2_500.0,
    }
}

fn warranty_cost(tier: WarrantyTier) -> f64 {
    match tier {
        WarrantyTier::Basic => 350.0,
        WarrantyTier::Standard => 500.0,
        WarrantyTier::Premium => 700.0,
    }
}

fn market_concession_rate(market: MarketCondition) -> f64 {
    match market {
        MarketCondition::Hot => 0.0,
        MarketCondition::Normal => 0.01,
        MarketCondition::Slow => 0.02,
    }
}

fn condition_concession_adjustment(condition: PropertyCondition) -> f64 {
    match condition {
        PropertyCondition::Excellent => -0.01,
        PropertyCondition::Good => -0.005,
        PropertyCondition::Fair => 0.0,
        PropertyCondition::Poor => 0.01,
        PropertyCondition::Distressed => 0.01,
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SellingInputs<'a> {
    pub sale_price: f64,
    pub state: &'a str,
    pub strategy: SaleStrategy,
    pub sqft: Option<u32>,
    pub options: SellingOptions,
    pub market_condition: MarketCondition,
    /// Condition at resale. `None` prices as fair.
    pub sale_condition: Option<PropertyCondition>,
    pub concessions_override: Option<f64>,
}

impl<'a> SellingInputs<'a> {
    pub fn new(sale_price: f64, state: &'a str) -> Self {
        Self {
            sale_price,
            state,
            strategy: SaleStrategy::default(),
            sqft: None,
            options: SellingOptions::default(),
            market_condition: MarketCondition::default(),
            sale_condition: None,
            concessions_override: None,
        }
    }
}

impl<'a> From<&'a CostInputs> for SellingInputs<'a> {
    fn from(inputs: &'a CostInputs) -> Self {
        Self {
            sale_price: inputs.sale_price,
            state: &inputs.state,
            strategy: inputs.sale_strategy,
            sqft: inputs.effective_sqft(),
            options: inputs.selling.clone(),
            market_condition: inputs.market_condition,
            sale_condition: inputs.sale_condition,
            concessions_override: inputs.concessions_override,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SellingCalculator {
    config: SellingConfig,
}

impl SellingCalculator {
    pub fn new(config: SellingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SellingConfig {
        &self.config
    }

    pub fn calculate(&self, inputs: &SellingInputs<'_>) -> SellingCosts {
        let profile = UsState::parse(inputs.state)
            .map(|s| s.profile())
            .unwrap_or(StateProfile::NEUTRAL);
        let rules = strategy_rules(inputs.strategy);
        let price = inputs.sale_price;
        let opts = &inputs.options;

        let agent_commission = agent_commission(
            price,
            CommissionOptions {
                strategy: inputs.strategy,
                include_buyer_agent: opts.include_buyer_agent,
            },
        );

        let mut closing = price * self.config.closing_cost_rate * profile.closing_multiplier;
        if rules.seller_pays_transfer_tax {
            closing += price * profile.transfer_tax_rate;
        }
        let closing_costs = to_cents(closing);

        let staging = if rules.retail_extras && opts.include_staging {
            to_cents(self.staging(inputs.sqft, opts.staging_level))
        } else {
            Decimal::ZERO
        };

        let marketing = if rules.retail_extras && opts.include_marketing {
            let upscale = (price - self.config.marketing_upscale_threshold).max(0.0)
                * self.config.marketing_upscale_rate;
            to_cents(marketing_base(opts.marketing_tier) + upscale)
        } else {
            Decimal::ZERO
        };

        let home_warranty = if rules.retail_extras && opts.include_warranty {
            to_cents(warranty_cost(opts.warranty_tier))
        } else {
            Decimal::ZERO
        };

        let seller_concessions = match (inputs.strategy, inputs.concessions_override) {
            (SaleStrategy::Wholesale, _) => Decimal::ZERO,
            (_, Some(amount)) => to_cents(amount.max(0.0)),
            (_, None) => {
                let rate = market_concession_rate(inputs.market_condition)
                    + condition_concession_adjustment(inputs.sale_condition.unwrap_or_default());
                to_cents(price * rate.max(0.0))
            }
        };

        let total_selling = agent_commission
            + closing_costs
            + staging
            + marketing
            + home_warranty
            + seller_concessions;

        debug!(
            state = inputs.state,
            strategy = %inputs.strategy,
            sale_price = price,
            total = %total_selling,
            "Selling costs calculated"
        );

        SellingCosts {
            agent_commission,
            closing_costs,
            staging,
            marketing,
            home_warranty,
            seller_concessions,
            total_selling,
        }
    }

    fn staging(&self, sqft: Option<u32>, level: StagingLevel) -> f64 {
        let sqft = f64::from(sqft.unwrap_or(self.config.default_sqft));
        let full = sqft * self.config.staging_per_sqft
            + self.config.staging_monthly_rent * f64::from(self.config.staging_months);
        match level {
            StagingLevel::Full => full,
            StagingLevel::Partial => full / 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
