//! Renovation budget.
//!
//! Prices the job from square footage, scope and estimate tier, adjusts for
//! condition and age, itemizes the budget through two percentage tables and
//! finally applies the regional labor/materials factor line by line.
//!
//! Totals are always rebuilt from rounded line items, never taken from
//! `base × pct` directly, so every category total is an exact sum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::{scale, to_cents};
use crate::reference::rehab::{
    age_multiplier, category_split, condition_multiplier, cost_per_sqft, exterior_split,
    interior_split, structural_split,
};
use crate::reference::states::UsState;
use crate::reference::{regional_multiplier_for, RegionalMultiplier};
use crate::types::{
    ConfidenceLevel, CostInputs, EstimateTier, ExteriorCosts, InteriorCosts, PropertyCondition,
    PropertyData, RehabBreakdown, RehabScope, StructuralCosts,
};

/// Square footage assumed when none is known.
pub const DEFAULT_SQFT: u32 = 1500;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Property facts from the primary source.
#[derive(Debug, Clone, Default)]
pub struct PropertyDescriptor<'a> {
    pub sqft: Option<u32>,
    pub year_built: Option<i32>,
    pub state: Option<&'a str>,
    pub city: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct RehabInputs<'a> {
    pub property: PropertyDescriptor<'a>,
    /// Secondary source; each present field wins over `property`.
    pub alternate: Option<&'a PropertyData>,
    /// `None` prices as fair and earns no confidence credit.
    pub condition: Option<PropertyCondition>,
    pub scope: RehabScope,
    pub tier: EstimateTier,
    /// Replaces the state/metro lookup entirely.
    pub region_override: Option<RegionalMultiplier>,
    pub metro: Option<&'a str>,
    /// Year used to compute property age.
    pub reference_year: i32,
}

impl<'a> RehabInputs<'a> {
    pub fn new(scope: RehabScope, reference_year: i32) -> Self {
        Self {
            property: PropertyDescriptor::default(),
            alternate: None,
            condition: None,
            scope,
            tier: EstimateTier::default(),
            region_override: None,
            metro: None,
            reference_year,
        }
    }

    pub fn from_cost_inputs(inputs: &'a CostInputs, reference_year: i32) -> Self {
        Self {
            property: PropertyDescriptor {
                sqft: inputs.sqft,
                year_built: inputs.year_built,
                state: Some(inputs.state.as_str()).filter(|s| !s.trim().is_empty()),
                city: inputs.city.as_deref(),
            },
            alternate: inputs.rehab_data.as_ref(),
            condition: inputs.condition,
            scope: inputs.rehab_scope,
            tier: inputs.rehab_tier,
            region_override: None,
            metro: inputs.metro.as_deref(),
            reference_year,
        }
    }

    /// Merge the secondary source over the primary one.
    fn resolved(&self) -> PropertyDescriptor<'a> {
        let alt = self.alternate;
        PropertyDescriptor {
            sqft: alt.and_then(|a| a.sqft).or(self.property.sqft),
            year_built: alt.and_then(|a| a.year_built).or(self.property.year_built),
            state: alt.and_then(|a| a.state.as_deref()).or(self.property.state),
            city: alt.and_then(|a| a.city.as_deref()).or(self.property.city),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Itemized budget plus the signals the aggregator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RehabEstimate {
    pub breakdown: RehabBreakdown,
    pub confidence: ConfidenceLevel,
    pub confidence_score: u32,
    /// Square footage actually priced.
    pub sqft: u32,
    pub cost_per_sqft: f64,
    /// Budget before itemization and regional adjustment.
    pub base_total: f64,
    /// Combined labor/materials factor applied to every line item.
    pub regional_factor: f64,
    /// Region the budget was priced in.
    pub region: RegionalMultiplier,
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RehabCalculator;

impl RehabCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate(&self, inputs: &RehabInputs<'_>) -> RehabEstimate {
        let property = inputs.resolved();
        let state = property.state.and_then(UsState::parse);

        let sqft = property.sqft.unwrap_or(DEFAULT_SQFT);
        let per_sqft = cost_per_sqft(inputs.scope, inputs.tier);
        let condition = inputs.condition.unwrap_or_default();
        let age = property
            .year_built
            .map(|year| inputs.reference_year.saturating_sub(year).max(0));

        let base_total = f64::from(sqft)
            * per_sqft
            * condition_multiplier(condition)
            * age_multiplier(age);

        let region = inputs.region_override.unwrap_or_else(|| match state {
            Some(s) => regional_multiplier_for(s, inputs.metro),
            None => RegionalMultiplier::NEUTRAL,
        });
        let regional_factor = region.combined();

        let itemized = itemize(base_total, inputs.scope);
        let breakdown = apply_regional(&itemized, regional_factor);

        let confidence_score = confidence_score(&property, state.is_some(), inputs.condition.is_some());
        let confidence = ConfidenceLevel::from_score(confidence_score);

        debug!(
            scope = %inputs.scope,
            sqft,
            per_sqft,
            age = ?age,
            base_total = format!("${:.2}", base_total),
            regional_factor,
            total = %breakdown.total_rehab,
            confidence = %confidence,
            "Rehab estimated"
        );

        RehabEstimate {
            breakdown,
            confidence,
            confidence_score,
            sqft,
            cost_per_sqft: per_sqft,
            base_total,
            regional_factor,
            region,
        }
    }
}

/// sqft +30, year built +20, state +15, city +10, condition assessed +25.
fn confidence_score(property: &PropertyDescriptor<'_>, state_known: bool, condition_known: bool) -> u32 {
    let mut score = 0;
    if property.sqft.is_some() {
        score += 30;
    }
    if property.year_built.is_some() {
        score += 20;
    }
    if state_known {
        score += 15;
    }
    if property.city.is_some_and(|c| !c.trim().is_empty()) {
        score += 10;
    }
    if condition_known {
        score += 25;
    }
    score
}

// ---------------------------------------------------------------------------
// Itemization
// ---------------------------------------------------------------------------

fn exterior_from(items: [Decimal; 6]) -> ExteriorCosts {
    let [roof, siding, windows, doors, landscaping, hardscape] = items;
    ExteriorCosts {
        roof,
        siding,
        windows,
        doors,
        landscaping,
        hardscape,
        total: items.iter().sum(),
    }
}

fn interior_from(items: [Decimal; 8]) -> InteriorCosts {
    let [flooring, paint, kitchen, bathrooms, electrical, plumbing, hvac, fixtures] = items;
    InteriorCosts {
        flooring,
        paint,
        kitchen,
        bathrooms,
        electrical,
        plumbing,
        hvac,
        fixtures,
        total: items.iter().sum(),
    }
}

fn structural_from(items: [Decimal; 3]) -> StructuralCosts {
    let [foundation, framing, insulation] = items;
    StructuralCosts {
        foundation,
        framing,
        insulation,
        total: items.iter().sum(),
    }
}

fn assemble(
    exterior: ExteriorCosts,
    interior: InteriorCosts,
    structural: StructuralCosts,
    permits: Decimal,
) -> RehabBreakdown {
    let total_rehab = exterior.total + interior.total + structural.total + permits;
    RehabBreakdown {
        exterior,
        interior,
        structural,
        permits,
        total_rehab,
    }
}

/// Split `base_total` into rounded line items for `scope`.
pub fn itemize(base_total: f64, scope: RehabScope) -> RehabBreakdown {
    let split = category_split(scope);
    let exterior_base = base_total * split.exterior;
    let interior_base = base_total * split.interior;
    let structural_base = base_total * split.structural;

    assemble(
        exterior_from(exterior_split(scope).map(|pct| to_cents(exterior_base * pct))),
        interior_from(interior_split(scope).map(|pct| to_cents(interior_base * pct))),
        structural_from(structural_split(scope).map(|pct| to_cents(structural_base * pct))),
        to_cents(base_total * split.permits),
    )
}

/// Scale every line item by `factor`, rounding each and rebuilding totals.
pub fn apply_regional(breakdown: &RehabBreakdown, factor: f64) -> RehabBreakdown {
    let ext = &breakdown.exterior;
    let int = &breakdown.interior;
    let st = &breakdown.structural;

    assemble(
        exterior_from(
            [ext.roof, ext.siding, ext.windows, ext.doors, ext.landscaping, ext.hardscape]
                .map(|item| scale(item, factor)),
        ),
        interior_from(
            [
                int.flooring,
                int.paint,
                int.kitchen,
                int.bathrooms,
                int.electrical,
                int.plumbing,
                int.hvac,
                int.fixtures,
            ]
            .map(|item| scale(item, factor)),
        ),
        structural_from([st.foundation, st.framing, st.insulation].map(|item| scale(item, factor))),
        scale(breakdown.permits, factor),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const YEAR: i32 = 2026;

    fn inputs(scope: RehabScope) -> RehabInputs<'static> {
        RehabInputs {
            property: PropertyDescriptor {
                sqft: Some(1500),
                year_built: Some(2000),
                state: Some("PA"),
                city: None,
            },
            ..RehabInputs::new(scope, YEAR)
        }
    }

    fn assert_consistent(b: &RehabBreakdown) {
        assert_eq!(b.exterior.total, b.exterior.sum_of_components());
        assert_eq!(b.interior.total, b.interior.sum_of_components());
        assert_eq!(b.structural.total, b.structural.sum_of_components());
        assert_eq!(b.total_rehab, b.sum_of_components());
    }

    #[test]
    fn test_moderate_pennsylvania_budget() {
        // 1500 sqft × $50 × fair 1.0 × age 26 → 1.0; PA factor 1.0
        let est = RehabCalculator::new().estimate(&inputs(RehabScope::Moderate));
        assert_eq!(est.base_total, 75_000.0);
        assert_eq!(est.breakdown.total_rehab, dec!(75000.00));
        assert_eq!(est.breakdown.permits, dec!(7500.00));
        assert_eq!(est.breakdown.interior.kitchen, dec!(11250.00));
        assert_consistent(&est.breakdown);
    }

    #[test]
    fn test_cosmetic_split() {
        let est = RehabCalculator::new().estimate(&inputs(RehabScope::Cosmetic));
        // 1500 × 15 = 22,500
        assert_eq!(est.breakdown.interior.total, dec!(19125.00));
        assert_eq!(est.breakdown.exterior.total, dec!(2250.00));
        assert_eq!(est.breakdown.structural.total, Decimal::ZERO);
        assert_eq!(est.breakdown.permits, dec!(1125.00));
    }

    #[test]
    fn test_totals_strictly_increase_with_scope() {
        let calc = RehabCalculator::new();
        let totals: Vec<Decimal> = RehabScope::ALL
            .iter()
            .map(|s| calc.estimate(&inputs(*s)).breakdown.total_rehab)
            .collect();
        assert!(totals.windows(2).all(|w| w[0] < w[1]), "{totals:?}");
    }

    #[test]
    fn test_older_property_never_cheaper() {
        let calc = RehabCalculator::new();
        let mut previous = Decimal::ZERO;
        for year in [2020, 2005, 1990, 1960, 1940, 1900] {
            let mut i = inputs(RehabScope::Moderate);
            i.property.year_built = Some(year);
            let total = calc.estimate(&i).breakdown.total_rehab;
            assert!(total >= previous, "{year}: {total} < {previous}");
            previous = total;
        }
    }

    #[test]
    fn test_odd_amounts_stay_consistent() {
        let calc = RehabCalculator::new();
        for scope in RehabScope::ALL {
            let mut i = inputs(*scope);
            i.property.sqft = Some(1337);
            i.property.year_built = Some(1911);
            i.condition = Some(PropertyCondition::Poor);
            i.property.state = Some("HI");
            let est = calc.estimate(&i);
            assert_consistent(&est.breakdown);
        }
    }

    #[test]
    fn test_regional_factor_applied_per_line_item() {
        let base = itemize(10_000.0, RehabScope::Heavy);
        let adjusted = apply_regional(&base, 1.5);
        assert_eq!(adjusted.exterior.roof, scale(base.exterior.roof, 1.5));
        assert_eq!(adjusted.permits, scale(base.permits, 1.5));
        assert_consistent(&adjusted);
    }

    #[test]
    fn test_region_override_wins() {
        let mut i = inputs(RehabScope::Moderate);
        i.region_override = Some(RegionalMultiplier { labor: 2.0, materials: 1.0, tax_rate: 0.01 });
        let est = RehabCalculator::new().estimate(&i);
        assert!((est.regional_factor - 1.6).abs() < 1e-12);
        assert_eq!(est.breakdown.total_rehab, dec!(120000.00));
    }

    #[test]
    fn test_alternate_source_wins_per_field() {
        let alt = PropertyData {
            sqft: Some(3000),
            city: Some("Altoona".into()),
            ..Default::default()
        };
        let mut i = inputs(RehabScope::Moderate);
        i.alternate = Some(&alt);
        let est = RehabCalculator::new().estimate(&i);
        assert_eq!(est.sqft, 3000);
        assert_eq!(est.breakdown.total_rehab, dec!(150000.00));
        // sqft 30 + year 20 + state 15 + city 10
        assert_eq!(est.confidence_score, 75);
    }

    #[test]
    fn test_alternate_state_sets_region() {
        let alt = PropertyData {
            state: Some("CA".into()),
            ..Default::default()
        };
        let mut i = inputs(RehabScope::Moderate);
        i.alternate = Some(&alt);
        let est = RehabCalculator::new().estimate(&i);
        assert_eq!(est.region, regional_multiplier_for(UsState::CA, None));
        assert_ne!(est.region, regional_multiplier_for(UsState::PA, None));
        assert!((est.regional_factor - est.region.combined()).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_year_built_saturates() {
        let calc = RehabCalculator::new();
        let mut ancient = inputs(RehabScope::Moderate);
        ancient.property.year_built = Some(i32::MIN);
        let mut old = inputs(RehabScope::Moderate);
        old.property.year_built = Some(1800);
        assert_eq!(
            calc.estimate(&ancient).breakdown.total_rehab,
            calc.estimate(&old).breakdown.total_rehab
        );

        let mut future = inputs(RehabScope::Moderate);
        future.property.year_built = Some(i32::MAX);
        let mut recent = inputs(RehabScope::Moderate);
        recent.property.year_built = Some(YEAR - 1);
        assert_eq!(
            calc.estimate(&future).breakdown.total_rehab,
            calc.estimate(&recent).breakdown.total_rehab
        );
    }

    #[test]
    fn test_confidence_levels() {
        let calc = RehabCalculator::new();
        let bare = RehabInputs::new(RehabScope::Light, YEAR);
        let est = calc.estimate(&bare);
        assert_eq!(est.confidence_score, 0);
        assert_eq!(est.confidence, ConfidenceLevel::Low);
        assert_eq!(est.sqft, DEFAULT_SQFT);

        let mut full = inputs(RehabScope::Light);
        full.property.city = Some("Altoona");
        full.condition = Some(PropertyCondition::Good);
        let est = calc.estimate(&full);
        assert_eq!(est.confidence_score, 100);
        assert_eq!(est.confidence, ConfidenceLevel::High);

        // sqft 30 + year 20 = 50
        let mut partial = inputs(RehabScope::Light);
        partial.property.state = None;
        assert_eq!(calc.estimate(&partial).confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn test_condition_scales_budget() {
        let calc = RehabCalculator::new();
        let mut good = inputs(RehabScope::Moderate);
        good.condition = Some(PropertyCondition::Excellent);
        let mut bad = inputs(RehabScope::Moderate);
        bad.condition = Some(PropertyCondition::Distressed);
        assert_eq!(calc.estimate(&good).breakdown.total_rehab, dec!(37500.00));
        assert_eq!(calc.estimate(&bad).breakdown.total_rehab, dec!(120000.00));
    }
}
