//! Shared types for the cost estimation engine.
//!
//! Input records deserialize from camelCase JSON so the engine can accept
//! request bodies as-is. Money on the output side is `Decimal`, rounded to
//! cents per component so that every `total` is an exact sum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Renovation intensity tier, cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RehabScope {
    Cosmetic,
    Light,
    #[default]
    Moderate,
    Heavy,
    Gut,
}

impl RehabScope {
    /// All scopes in increasing order of intensity.
    pub const ALL: &'static [RehabScope] = &[
        RehabScope::Cosmetic,
        RehabScope::Light,
        RehabScope::Moderate,
        RehabScope::Heavy,
        RehabScope::Gut,
    ];
}

impl fmt::Display for RehabScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RehabScope::Cosmetic => write!(f, "cosmetic"),
            RehabScope::Light => write!(f, "light"),
            RehabScope::Moderate => write!(f, "moderate"),
            RehabScope::Heavy => write!(f, "heavy"),
            RehabScope::Gut => write!(f, "gut"),
        }
    }
}

/// Which end of the cost-per-sqft range to price at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimateTier {
    Low,
    #[default]
    Mid,
    High,
}

/// Assessed physical condition of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCondition {
    Excellent,
    Good,
    #[default]
    Fair,
    Poor,
    Distressed,
}

impl PropertyCondition {
    pub const ALL: &'static [PropertyCondition] = &[
        PropertyCondition::Excellent,
        PropertyCondition::Good,
        PropertyCondition::Fair,
        PropertyCondition::Poor,
        PropertyCondition::Distressed,
    ];
}

/// Insurance classification of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    VacantLand,
    Condo,
    SingleFamily,
    MultiFamily,
    /// Highest-rate tier; used when the type is unknown.
    #[default]
    VacantBuilding,
}

/// How the property is sold at the end of the hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SaleStrategy {
    #[default]
    RetailAgent,
    RetailFsbo,
    Wholesale,
    Auction,
}

impl SaleStrategy {
    pub const ALL: &'static [SaleStrategy] = &[
        SaleStrategy::RetailAgent,
        SaleStrategy::RetailFsbo,
        SaleStrategy::Wholesale,
        SaleStrategy::Auction,
    ];

    /// Retail strategies list the property on the open market.
    pub fn is_retail(&self) -> bool {
        matches!(self, SaleStrategy::RetailAgent | SaleStrategy::RetailFsbo)
    }
}

impl fmt::Display for SaleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStrategy::RetailAgent => write!(f, "retail_agent"),
            SaleStrategy::RetailFsbo => write!(f, "retail_fsbo"),
            SaleStrategy::Wholesale => write!(f, "wholesale"),
            SaleStrategy::Auction => write!(f, "auction"),
        }
    }
}

/// Resale market temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarketCondition {
    Hot,
    #[default]
    Normal,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StagingLevel {
    Partial,
    #[default]
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MarketingTier {
    Basic,
    #[default]
    Standard,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyTier {
    Basic,
    #[default]
    Standard,
    Premium,
}

/// Three-level trust rating derived from a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// ≥ 80 high, ≥ 50 medium, else low.
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => ConfidenceLevel::High,
            50..=79 => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

fn default_holding_months() -> u32 {
    6
}

fn default_true() -> bool {
    true
}

fn default_term_months() -> u32 {
    360
}

/// Loan terms. Only `HoldingBreakdown::monthly_loan_payment` depends on these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingParams {
    #[serde(default)]
    pub is_financed: bool,
    /// Principal borrowed (dollars).
    #[serde(default)]
    pub loan_amount: f64,
    /// Annual rate as a decimal (0.08 = 8%).
    #[serde(default)]
    pub interest_rate: f64,
    /// Amortization term. Default: 360.
    #[serde(default = "default_term_months")]
    pub term_months: u32,
    /// Pay interest only (typical for hard-money loans). Default: false.
    #[serde(default)]
    pub interest_only: bool,
}

impl Default for FinancingParams {
    fn default() -> Self {
        Self {
            is_financed: false,
            loan_amount: 0.0,
            interest_rate: 0.0,
            term_months: default_term_months(),
            interest_only: false,
        }
    }
}

/// Staging, marketing and warranty choices for the resale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellingOptions {
    /// Default: true (ignored for wholesale/auction).
    #[serde(default = "default_true")]
    pub include_staging: bool,
    /// Default: full.
    #[serde(default)]
    pub staging_level: StagingLevel,
    /// Default: true (ignored for wholesale/auction).
    #[serde(default = "default_true")]
    pub include_marketing: bool,
    /// Default: standard.
    #[serde(default)]
    pub marketing_tier: MarketingTier,
    /// Default: false.
    #[serde(default)]
    pub include_warranty: bool,
    /// Default: standard.
    #[serde(default)]
    pub warranty_tier: WarrantyTier,
    /// Pay the buyer's agent side of the commission. Default: true.
    #[serde(default = "default_true")]
    pub include_buyer_agent: bool,
}

impl Default for SellingOptions {
    fn default() -> Self {
        Self {
            include_staging: true,
            staging_level: StagingLevel::default(),
            include_marketing: true,
            marketing_tier: MarketingTier::default(),
            include_warranty: false,
            warranty_tier: WarrantyTier::default(),
            include_buyer_agent: true,
        }
    }
}

/// Property facts from a secondary data source (parcel vendor, inspection).
/// Any field present here wins over the matching field on `CostInputs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyData {
    pub sqft: Option<u32>,
    pub year_built: Option<i32>,
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Everything the engine needs to estimate one deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInputs {
    /// Winning bid. Required, > 0.
    pub bid_amount: f64,
    /// Projected resale price (ARV). Required, > 0.
    pub sale_price: f64,
    /// Two-letter code or full state name. Required.
    #[serde(default)]
    pub state: String,
    /// Market value. Falls back to `sale_price` where a value is needed.
    #[serde(default)]
    pub property_value: Option<f64>,
    /// Falls back to 80% of property value.
    #[serde(default)]
    pub assessed_value: Option<f64>,
    /// Default: moderate.
    #[serde(default, alias = "rehabLevel")]
    pub rehab_scope: RehabScope,
    /// Default: mid.
    #[serde(default)]
    pub rehab_tier: EstimateTier,
    /// Pre-rehab condition. `None` prices as fair.
    #[serde(default)]
    pub condition: Option<PropertyCondition>,
    /// Default: 6.
    #[serde(default = "default_holding_months")]
    pub holding_months: u32,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub metro: Option<String>,
    /// 1500 is assumed where a size is needed.
    #[serde(default)]
    pub sqft: Option<u32>,
    #[serde(default)]
    pub year_built: Option<i32>,
    /// When present, overrides the computed property tax.
    #[serde(default)]
    pub annual_taxes: Option<f64>,
    #[serde(default)]
    pub financing: Option<FinancingParams>,
    /// Default premium rate 5% when absent or unknown.
    #[serde(default)]
    pub auction_platform: Option<String>,
    /// Default: retail_agent.
    #[serde(default)]
    pub sale_strategy: SaleStrategy,
    /// Default: 0.
    #[serde(default)]
    pub monthly_hoa: Option<f64>,
    /// Default: vacant_building.
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    /// Default: true.
    #[serde(default = "default_true")]
    pub is_vacant: bool,
    #[serde(default)]
    pub lot_size_acres: Option<f64>,
    /// Default: normal.
    #[serde(default)]
    pub market_condition: MarketCondition,
    /// Condition at resale. Default: fair.
    #[serde(default)]
    pub sale_condition: Option<PropertyCondition>,
    #[serde(default)]
    pub legal_fees_override: Option<f64>,
    #[serde(default)]
    pub concessions_override: Option<f64>,
    #[serde(default)]
    pub selling: SellingOptions,
    /// Secondary property data; present fields win.
    #[serde(default)]
    pub rehab_data: Option<PropertyData>,
}

impl CostInputs {
    /// Minimal inputs with every optional field at its documented default.
    pub fn new(bid_amount: f64, sale_price: f64, state: impl Into<String>) -> Self {
        Self {
            bid_amount,
            sale_price,
            state: state.into(),
            property_value: None,
            assessed_value: None,
            rehab_scope: RehabScope::default(),
            rehab_tier: EstimateTier::default(),
            condition: None,
            holding_months: default_holding_months(),
            county: None,
            city: None,
            metro: None,
            sqft: None,
            year_built: None,
            annual_taxes: None,
            financing: None,
            auction_platform: None,
            sale_strategy: SaleStrategy::default(),
            monthly_hoa: None,
            property_type: None,
            is_vacant: true,
            lot_size_acres: None,
            market_condition: MarketCondition::default(),
            sale_condition: None,
            legal_fees_override: None,
            concessions_override: None,
            selling: SellingOptions::default(),
            rehab_data: None,
        }
    }

    /// Market value used by holding and title calculations.
    pub fn effective_property_value(&self) -> f64 {
        self.property_value.unwrap_or(self.sale_price)
    }

    /// Square footage after the secondary data source is applied.
    pub fn effective_sqft(&self) -> Option<u32> {
        self.rehab_data
            .as_ref()
            .and_then(|d| d.sqft)
            .or(self.sqft)
    }

    /// Year built after the secondary data source is applied.
    pub fn effective_year_built(&self) -> Option<i32> {
        self.rehab_data
            .as_ref()
            .and_then(|d| d.year_built)
            .or(self.year_built)
    }

    /// Active financing terms, if any.
    pub fn active_financing(&self) -> Option<&FinancingParams> {
        self.financing.as_ref().filter(|f| f.is_financed)
    }
}

// ---------------------------------------------------------------------------
// Category outputs
// ---------------------------------------------------------------------------

/// Everything paid to take title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionCosts {
    pub bid_amount: Decimal,
    pub buyers_premium: Decimal,
    pub transfer_tax: Decimal,
    pub recording_fees: Decimal,
    pub title_search: Decimal,
    pub title_insurance: Decimal,
    pub legal_fees: Decimal,
    pub total_acquisition: Decimal,
}

impl AcquisitionCosts {
    /// Fees on top of the bid.
    pub fn total_fees(&self) -> Decimal {
        self.buyers_premium
            + self.transfer_tax
            + self.recording_fees
            + self.title_search
            + self.title_insurance
            + self.legal_fees
    }

    pub fn sum_of_components(&self) -> Decimal {
        self.bid_amount + self.total_fees()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExteriorCosts {
    pub roof: Decimal,
    pub siding: Decimal,
    pub windows: Decimal,
    pub doors: Decimal,
    pub landscaping: Decimal,
    pub hardscape: Decimal,
    pub total: Decimal,
}

impl ExteriorCosts {
    pub fn sum_of_components(&self) -> Decimal {
        self.roof + self.siding + self.windows + self.doors + self.landscaping + self.hardscape
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteriorCosts {
    pub flooring: Decimal,
    pub paint: Decimal,
    pub kitchen: Decimal,
    pub bathrooms: Decimal,
    pub electrical: Decimal,
    pub plumbing: Decimal,
    pub hvac: Decimal,
    pub fixtures: Decimal,
    pub total: Decimal,
}

impl InteriorCosts {
    pub fn sum_of_components(&self) -> Decimal {
        self.flooring
            + self.paint
            + self.kitchen
            + self.bathrooms
            + self.electrical
            + self.plumbing
            + self.hvac
            + self.fixtures
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralCosts {
    pub foundation: Decimal,
    pub framing: Decimal,
    pub insulation: Decimal,
    pub total: Decimal,
}

impl StructuralCosts {
    pub fn sum_of_components(&self) -> Decimal {
        self.foundation + self.framing + self.insulation
    }
}

/// Renovation budget by category and line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RehabBreakdown {
    pub exterior: ExteriorCosts,
    pub interior: InteriorCosts,
    pub structural: StructuralCosts,
    pub permits: Decimal,
    pub total_rehab: Decimal,
}

impl RehabBreakdown {
    pub fn sum_of_components(&self) -> Decimal {
        self.exterior.total + self.interior.total + self.structural.total + self.permits
    }
}

/// Monthly carrying costs and their total over the hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingBreakdown {
    pub monthly_taxes: Decimal,
    pub monthly_insurance: Decimal,
    pub monthly_utilities: Decimal,
    pub monthly_maintenance: Decimal,
    pub monthly_loan_payment: Decimal,
    pub monthly_hoa: Decimal,
    pub total_monthly: Decimal,
    pub holding_period_months: u32,
    pub total_holding: Decimal,
}

impl HoldingBreakdown {
    pub fn sum_of_monthly(&self) -> Decimal {
        self.monthly_taxes
            + self.monthly_insurance
            + self.monthly_utilities
            + self.monthly_maintenance
            + self.monthly_loan_payment
            + self.monthly_hoa
    }
}

/// Cost of disposing of the property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellingCosts {
    pub agent_commission: Decimal,
    pub closing_costs: Decimal,
    pub staging: Decimal,
    pub marketing: Decimal,
    pub home_warranty: Decimal,
    pub seller_concessions: Decimal,
    pub total_selling: Decimal,
}

impl SellingCosts {
    pub fn sum_of_components(&self) -> Decimal {
        self.agent_commission
            + self.closing_costs
            + self.staging
            + self.marketing
            + self.home_warranty
            + self.seller_concessions
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Machine-readable identifier for each advisory rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    UnrecognizedState,
    BidNearSalePrice,
    BidNearPropertyValue,
    LongHoldingPeriod,
    UnusualSquareFootage,
    VeryOldProperty,
    LoanExceedsBid,
    NegativeProfit,
    LowProfitMargin,
    HighRehabPerSqft,
    RehabExceedsHalfBid,
    ExtendedHolding,
    HighHoldingCosts,
    HighBuyersPremium,
    HighSellingCosts,
    HighLaborCosts,
}

/// One advisory finding. Never interrupts the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub severity: Severity,
    pub message: String,
}

impl Warning {
    pub fn new(code: WarningCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Critical => "CRITICAL",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

// ---------------------------------------------------------------------------
// Aggregate output
// ---------------------------------------------------------------------------

/// Full lifecycle estimate for one deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub acquisition: AcquisitionCosts,
    pub rehab: RehabBreakdown,
    pub holding: HoldingBreakdown,
    pub selling: SellingCosts,
    pub total_costs: Decimal,
    pub contingency: Decimal,
    pub grand_total: Decimal,
    pub confidence: ConfidenceLevel,
    /// Raw 0–100 score behind `confidence`.
    pub confidence_score: u32,
    /// 0–100 input completeness.
    pub data_quality: u32,
    /// Effective contingency rate applied to `total_costs`.
    pub contingency_rate: f64,
    /// Validation warnings first, then computed warnings.
    pub warnings: Vec<Warning>,
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Acquisition  ${:>12}", self.acquisition.total_acquisition)?;
        writeln!(f, "Rehab        ${:>12}", self.rehab.total_rehab)?;
        writeln!(
            f,
            "Holding      ${:>12}  ({} mo × ${})",
            self.holding.total_holding,
            self.holding.holding_period_months,
            self.holding.total_monthly
        )?;
        writeln!(f, "Selling      ${:>12}", self.selling.total_selling)?;
        writeln!(f, "Total        ${:>12}", self.total_costs)?;
        writeln!(
            f,
            "Contingency  ${:>12}  ({:.1}%)",
            self.contingency,
            self.contingency_rate * 100.0
        )?;
        writeln!(f, "Grand total  ${:>12}", self.grand_total)?;
        write!(
            f,
            "Confidence: {} ({}/100) | Data quality: {}/100 | {} warning(s)",
            self.confidence,
            self.confidence_score,
            self.data_quality,
            self.warnings.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain-specific error types for the engine.
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("Invalid cost inputs: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CostError {
    /// Names of the rejected fields (empty for non-validation errors).
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            CostError::Validation(errors) => errors.iter().map(|e| e.field).collect(),
            CostError::Config(_) => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
