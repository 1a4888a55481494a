//! Sub-state reference data: metro multipliers, high-tax county rates and
//! local transfer-tax surcharges.
//!
//! Only a handful of named jurisdictions are listed. Everything else falls
//! back to the state profile.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::states::UsState;
use super::{normalize_county, normalize_key, RegionalMultiplier};

// ---------------------------------------------------------------------------
// Metro multipliers
// ---------------------------------------------------------------------------

/// (state, metro aliases, labor, materials, property tax rate)
const METROS: &[(UsState, &[&str], f64, f64, f64)] = &[
    (UsState::CA, &["San Francisco", "SF", "Bay Area"], 1.45, 1.15, 0.0068),
    (UsState::CA, &["Los Angeles", "LA"], 1.30, 1.10, 0.0075),
    (UsState::CA, &["San Diego"], 1.22, 1.08, 0.0073),
    (UsState::NY, &["New York", "New York City", "NYC"], 1.45, 1.20, 0.0088),
    (UsState::NY, &["Buffalo"], 1.00, 1.00, 0.0236),
    (UsState::MA, &["Boston"], 1.35, 1.10, 0.0104),
    (UsState::WA, &["Seattle"], 1.30, 1.08, 0.0093),
    (UsState::IL, &["Chicago"], 1.25, 1.05, 0.0210),
    (UsState::PA, &["Philadelphia", "Philly"], 1.20, 1.05, 0.0140),
    (UsState::PA, &["Pittsburgh"], 1.00, 1.00, 0.0198),
    (UsState::TX, &["Houston"], 0.95, 0.98, 0.0209),
    (UsState::TX, &["Austin"], 1.02, 1.00, 0.0181),
    (UsState::TX, &["Dallas", "Dallas-Fort Worth", "DFW"], 0.98, 0.98, 0.0191),
    (UsState::FL, &["Miami"], 1.10, 1.05, 0.0102),
    (UsState::FL, &["Tampa"], 0.98, 1.00, 0.0094),
    (UsState::GA, &["Atlanta"], 0.98, 0.98, 0.0101),
    (UsState::DC, &["Washington"], 1.30, 1.08, 0.0057),
    (UsState::CO, &["Denver"], 1.12, 1.04, 0.0052),
    (UsState::AZ, &["Phoenix"], 0.98, 0.99, 0.0062),
    (UsState::MI, &["Detroit"], 0.95, 0.97, 0.0240),
    (UsState::OH, &["Cleveland"], 0.98, 0.98, 0.0230),
];

static METRO_INDEX: Lazy<HashMap<(UsState, String), RegionalMultiplier>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (state, aliases, labor, materials, tax_rate) in METROS {
        let multiplier = RegionalMultiplier {
            labor: *labor,
            materials: *materials,
            tax_rate: *tax_rate,
        };
        for alias in *aliases {
            index.insert((*state, normalize_key(alias)), multiplier);
        }
    }
    index
});

/// Metro override for a state, if one is listed.
pub fn metro_multiplier(state: UsState, metro: &str) -> Option<RegionalMultiplier> {
    METRO_INDEX.get(&(state, normalize_key(metro))).copied()
}

// ---------------------------------------------------------------------------
// High-tax counties
// ---------------------------------------------------------------------------

/// Effective annual property tax rates that replace the state rate.
const COUNTY_TAX_RATES: &[(UsState, &str, f64)] = &[
    (UsState::NJ, "Camden", 0.0299),
    (UsState::NJ, "Essex", 0.0256),
    (UsState::NJ, "Passaic", 0.0268),
    (UsState::NY, "Monroe", 0.0269),
    (UsState::NY, "Erie", 0.0236),
    (UsState::IL, "Lake", 0.0274),
    (UsState::IL, "Cook", 0.0210),
    (UsState::TX, "Fort Bend", 0.0241),
    (UsState::TX, "Harris", 0.0209),
    (UsState::PA, "Allegheny", 0.0198),
    (UsState::PA, "Delaware", 0.0208),
    (UsState::NH, "Cheshire", 0.0245),
];

static COUNTY_TAX_INDEX: Lazy<HashMap<(UsState, String), f64>> = Lazy::new(|| {
    COUNTY_TAX_RATES
        .iter()
        .map(|(state, county, rate)| ((*state, normalize_county(county)), *rate))
        .collect()
});

/// County property tax rate for the listed high-tax counties.
pub fn county_tax_rate(state: UsState, county: &str) -> Option<f64> {
    COUNTY_TAX_INDEX
        .get(&(state, normalize_county(county)))
        .copied()
}

// ---------------------------------------------------------------------------
// Transfer-tax surcharges
// ---------------------------------------------------------------------------

/// Local transfer tax layered on the state rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSurcharge {
    /// Rate at or below `threshold` (or always, when untiered).
    pub rate: f64,
    /// Price cutoff for the higher tier.
    pub threshold: Option<f64>,
    /// Rate applied to the whole price once it exceeds `threshold`.
    pub rate_above: f64,
}

impl TransferSurcharge {
    const fn flat(rate: f64) -> Self {
        Self {
            rate,
            threshold: None,
            rate_above: rate,
        }
    }

    const fn tiered(rate: f64, threshold: f64, rate_above: f64) -> Self {
        Self {
            rate,
            threshold: Some(threshold),
            rate_above,
        }
    }

    /// Rate that applies at `price`.
    pub fn rate_at(&self, price: f64) -> f64 {
        match self.threshold {
            Some(cutoff) if price > cutoff => self.rate_above,
            _ => self.rate,
        }
    }
}

/// `None` county means the surcharge applies statewide.
const TRANSFER_SURCHARGES: &[(UsState, Option<&str>, TransferSurcharge)] = &[
    (UsState::PA, Some("Philadelphia"), TransferSurcharge::flat(0.02278)),
    (UsState::PA, Some("Allegheny"), TransferSurcharge::flat(0.01)),
    (UsState::NY, Some("New York"), TransferSurcharge::tiered(0.01, 500_000.0, 0.01425)),
    (UsState::NY, Some("Kings"), TransferSurcharge::tiered(0.01, 500_000.0, 0.01425)),
    (UsState::NY, Some("Queens"), TransferSurcharge::tiered(0.01, 500_000.0, 0.01425)),
    (UsState::NY, Some("Bronx"), TransferSurcharge::tiered(0.01, 500_000.0, 0.01425)),
    (UsState::NY, Some("Richmond"), TransferSurcharge::tiered(0.01, 500_000.0, 0.01425)),
    (UsState::IL, Some("Cook"), TransferSurcharge::flat(0.0075)),
    (UsState::MD, Some("Montgomery"), TransferSurcharge::flat(0.01)),
    (UsState::MD, Some("Baltimore City"), TransferSurcharge::flat(0.015)),
    (UsState::CA, Some("San Francisco"), TransferSurcharge::tiered(0.0068, 1_000_000.0, 0.0275)),
    (UsState::CA, Some("Los Angeles"), TransferSurcharge::tiered(0.0045, 5_150_000.0, 0.0445)),
    (UsState::WA, None, TransferSurcharge::tiered(0.0, 1_525_000.0, 0.015)),
    (UsState::DC, None, TransferSurcharge::tiered(0.0, 400_000.0, 0.0035)),
];

static STATEWIDE_SURCHARGES: Lazy<HashMap<UsState, TransferSurcharge>> = Lazy::new(|| {
    TRANSFER_SURCHARGES
        .iter()
        .filter(|(_, county, _)| county.is_none())
        .map(|(state, _, surcharge)| (*state, *surcharge))
        .collect()
});

static COUNTY_SURCHARGES: Lazy<HashMap<(UsState, String), TransferSurcharge>> = Lazy::new(|| {
    TRANSFER_SURCHARGES
        .iter()
        .filter_map(|(state, county, surcharge)| {
            county.map(|c| ((*state, normalize_county(c)), *surcharge))
        })
        .collect()
});

/// Local transfer-tax rate added to the state rate at the given price.
/// Statewide tiers and county surcharges stack.
pub fn local_transfer_surcharge(state: UsState, county: Option<&str>, price: f64) -> f64 {
    let statewide = STATEWIDE_SURCHARGES
        .get(&state)
        .map(|s| s.rate_at(price))
        .unwrap_or(0.0);

    let local = county
        .and_then(|c| COUNTY_SURCHARGES.get(&(state, normalize_county(c))))
        .map(|s| s.rate_at(price))
        .unwrap_or(0.0);

    statewide + local
}
