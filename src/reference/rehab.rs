//! Renovation cost tables: $/sqft by scope, condition and age multipliers,
//! and the two-level percentage split used to itemize a budget.

use crate::types::{EstimateTier, PropertyCondition, RehabScope};

/// Dollars per square foot for a scope at the given estimate tier.
pub fn cost_per_sqft(scope: RehabScope, tier: EstimateTier) -> f64 {
    let (low, mid, high) = match scope {
        RehabScope::Cosmetic => (10.0, 15.0, 25.0),
        RehabScope::Light => (20.0, 30.0, 45.0),
        RehabScope::Moderate => (35.0, 50.0, 75.0),
        RehabScope::Heavy => (60.0, 85.0, 120.0),
        RehabScope::Gut => (100.0, 140.0, 200.0),
    };
    match tier {
        EstimateTier::Low => low,
        EstimateTier::Mid => mid,
        EstimateTier::High => high,
    }
}

pub fn condition_multiplier(condition: PropertyCondition) -> f64 {
    match condition {
        PropertyCondition::Excellent => 0.5,
        PropertyCondition::Good => 0.75,
        PropertyCondition::Fair => 1.0,
        PropertyCondition::Poor => 1.3,
        PropertyCondition::Distressed => 1.6,
    }
}

/// Older houses hide more surprises. Unknown age prices as neutral.
pub fn age_multiplier(age_years: Option<i32>) -> f64 {
    match age_years {
        None => 1.0,
        Some(age) if age < 15 => 0.9,
        Some(age) if age < 30 => 1.0,
        Some(age) if age < 50 => 1.1,
        Some(age) if age <= 80 => 1.25,
        Some(_) => 1.5,
    }
}

/// Share of the base budget per category. Each row sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySplit {
    pub exterior: f64,
    pub interior: f64,
    pub structural: f64,
    pub permits: f64,
}

pub fn category_split(scope: RehabScope) -> CategorySplit {
    let (exterior, interior, structural, permits) = match scope {
        RehabScope::Cosmetic => (0.10, 0.85, 0.00, 0.05),
        RehabScope::Light => (0.15, 0.75, 0.03, 0.07),
        RehabScope::Moderate => (0.20, 0.60, 0.10, 0.10),
        RehabScope::Heavy => (0.22, 0.48, 0.18, 0.12),
        RehabScope::Gut => (0.22, 0.40, 0.25, 0.13),
    };
    CategorySplit {
        exterior,
        interior,
        structural,
        permits,
    }
}

/// roof, siding, windows, doors, landscaping, hardscape
pub fn exterior_split(scope: RehabScope) -> [f64; 6] {
    match scope {
        RehabScope::Cosmetic => [0.00, 0.15, 0.05, 0.15, 0.45, 0.20],
        RehabScope::Light => [0.10, 0.20, 0.15, 0.15, 0.25, 0.15],
        RehabScope::Moderate => [0.25, 0.20, 0.20, 0.10, 0.15, 0.10],
        RehabScope::Heavy => [0.30, 0.22, 0.22, 0.08, 0.10, 0.08],
        RehabScope::Gut => [0.30, 0.25, 0.22, 0.08, 0.08, 0.07],
    }
}

/// flooring, paint, kitchen, bathrooms, electrical, plumbing, hvac, fixtures
pub fn interior_split(scope: RehabScope) -> [f64; 8] {
    match scope {
        RehabScope::Cosmetic => [0.30, 0.35, 0.10, 0.08, 0.02, 0.02, 0.03, 0.10],
        RehabScope::Light => [0.22, 0.20, 0.20, 0.15, 0.05, 0.05, 0.05, 0.08],
        RehabScope::Moderate => [0.18, 0.10, 0.25, 0.18, 0.08, 0.08, 0.08, 0.05],
        RehabScope::Heavy => [0.15, 0.08, 0.24, 0.18, 0.11, 0.10, 0.10, 0.04],
        RehabScope::Gut => [0.12, 0.06, 0.22, 0.18, 0.13, 0.13, 0.13, 0.03],
    }
}

/// foundation, framing, insulation
pub fn structural_split(scope: RehabScope) -> [f64; 3] {
    match scope {
        RehabScope::Cosmetic => [0.30, 0.30, 0.40],
        RehabScope::Light => [0.20, 0.30, 0.50],
        RehabScope::Moderate => [0.35, 0.40, 0.25],
        RehabScope::Heavy => [0.40, 0.40, 0.20],
        RehabScope::Gut => [0.40, 0.40, 0.20],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums_to_one(parts: &[f64]) -> bool {
        (parts.iter().sum::<f64>() - 1.0).abs() < 1e-9
    }

    #[test]
    fn test_every_split_sums_to_one() {
        for scope in RehabScope::ALL {
            let c = category_split(*scope);
            assert!(sums_to_one(&[c.exterior, c.interior, c.structural, c.permits]), "{scope} categories");
            assert!(sums_to_one(&exterior_split(*scope)), "{scope} exterior");
            assert!(sums_to_one(&interior_split(*scope)), "{scope} interior");
            assert!(sums_to_one(&structural_split(*scope)), "{scope} structural");
        }
    }

    #[test]
    fn test_cost_per_sqft_increases_with_scope_and_tier() {
        let tiers = [EstimateTier::Low, EstimateTier::Mid, EstimateTier::High];
        for tier in tiers {
            let costs: Vec<f64> = RehabScope::ALL.iter().map(|s| cost_per_sqft(*s, tier)).collect();
            assert!(costs.windows(2).all(|w| w[0] < w[1]));
        }
        for scope in RehabScope::ALL {
            assert!(cost_per_sqft(*scope, EstimateTier::Low) < cost_per_sqft(*scope, EstimateTier::Mid));
            assert!(cost_per_sqft(*scope, EstimateTier::Mid) < cost_per_sqft(*scope, EstimateTier::High));
        }
    }

    #[test]
    fn test_condition_range() {
        assert_eq!(condition_multiplier(PropertyCondition::Excellent), 0.5);
        assert_eq!(condition_multiplier(PropertyCondition::Distressed), 1.6);
        let values: Vec<f64> = PropertyCondition::ALL.iter().map(|c| condition_multiplier(*c)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_age_steps() {
        assert_eq!(age_multiplier(None), 1.0);
        assert_eq!(age_multiplier(Some(5)), 0.9);
        assert_eq!(age_multiplier(Some(15)), 1.0);
        assert_eq!(age_multiplier(Some(40)), 1.1);
        assert_eq!(age_multiplier(Some(80)), 1.25);
        assert_eq!(age_multiplier(Some(81)), 1.5);
        assert_eq!(age_multiplier(Some(150)), 1.5);
    }

    #[test]
    fn test_cosmetic_has_no_structural_work() {
        assert_eq!(category_split(RehabScope::Cosmetic).structural, 0.0);
        assert_eq!(category_split(RehabScope::Cosmetic).interior, 0.85);
        assert_eq!(category_split(RehabScope::Gut).structural, 0.25);
    }
}
