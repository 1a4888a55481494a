//! Reference tables: regional multipliers, tax and fee rates, auction
//! premiums and renovation cost tiers.
//!
//! All data is read-only and process-global. Raw strings are normalized
//! once here, at the lookup boundary; calculators work with typed keys.

pub mod local;
pub mod rehab;
pub mod states;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use states::{StateProfile, UsState};

/// Lowercase and strip everything that is not a letter or digit.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// `normalize_key`, then drop a trailing "county"/"parish".
pub fn normalize_county(raw: &str) -> String {
    let key = normalize_key(raw);
    for suffix in ["county", "parish"] {
        if let Some(stripped) = key.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    key
}

// ---------------------------------------------------------------------------
// Regional multipliers
// ---------------------------------------------------------------------------

/// Construction cost and tax factors for a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalMultiplier {
    pub labor: f64,
    pub materials: f64,
    /// Effective annual property tax rate.
    pub tax_rate: f64,
}

impl RegionalMultiplier {
    pub const NEUTRAL: RegionalMultiplier = RegionalMultiplier {
        labor: 1.0,
        materials: 1.0,
        tax_rate: 0.01,
    };

    /// Single factor for renovation work: 60% labor, 40% materials.
    pub fn combined(&self) -> f64 {
        0.6 * self.labor + 0.4 * self.materials
    }
}

impl From<StateProfile> for RegionalMultiplier {
    fn from(p: StateProfile) -> Self {
        Self {
            labor: p.labor,
            materials: p.materials,
            tax_rate: p.property_tax_rate,
        }
    }
}

/// Metro override if listed, else the state table, else neutral.
pub fn regional_multiplier(state: &str, metro: Option<&str>) -> RegionalMultiplier {
    match UsState::parse(state) {
        Some(s) => regional_multiplier_for(s, metro),
        None => RegionalMultiplier::NEUTRAL,
    }
}

pub fn regional_multiplier_for(state: UsState, metro: Option<&str>) -> RegionalMultiplier {
    metro
        .and_then(|m| local::metro_multiplier(state, m))
        .unwrap_or_else(|| state.profile().into())
}

/// Combined state transfer tax rate; 1% when the state is unrecognized.
pub fn transfer_tax_rate(state: &str) -> f64 {
    states::state_profile(state).transfer_tax_rate
}

// ---------------------------------------------------------------------------
// Auction platforms
// ---------------------------------------------------------------------------

/// Online and in-person tax-deed sale venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionPlatform {
    Bid4Assets,
    AuctionCom,
    Xome,
    Hubzu,
    RealAuction,
    GovEase,
    GrantStreet,
    CountyDirect,
    WilliamsWilliams,
    /// Anything unrecognized; priced at the default premium.
    Other,
}

impl AuctionPlatform {
    /// Buyer's premium as a fraction of the winning bid.
    pub fn premium_rate(&self) -> f64 {
        match self {
            AuctionPlatform::Bid4Assets => 0.05,
            AuctionPlatform::AuctionCom => 0.05,
            AuctionPlatform::Xome => 0.05,
            AuctionPlatform::Hubzu => 0.045,
            AuctionPlatform::RealAuction => 0.0,
            AuctionPlatform::GovEase => 0.0,
            AuctionPlatform::GrantStreet => 0.0,
            AuctionPlatform::CountyDirect => 0.0,
            AuctionPlatform::WilliamsWilliams => 0.10,
            AuctionPlatform::Other => DEFAULT_PREMIUM_RATE,
        }
    }

    pub fn parse(raw: &str) -> AuctionPlatform {
        PLATFORM_INDEX
            .get(&normalize_key(raw))
            .copied()
            .unwrap_or(AuctionPlatform::Other)
    }
}

impl fmt::Display for AuctionPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuctionPlatform::Bid4Assets => "Bid4Assets",
            AuctionPlatform::AuctionCom => "Auction.com",
            AuctionPlatform::Xome => "Xome",
            AuctionPlatform::Hubzu => "Hubzu",
            AuctionPlatform::RealAuction => "RealAuction",
            AuctionPlatform::GovEase => "GovEase",
            AuctionPlatform::GrantStreet => "Grant Street",
            AuctionPlatform::CountyDirect => "County",
            AuctionPlatform::WilliamsWilliams => "Williams & Williams",
            AuctionPlatform::Other => "Other",
        };
        write!(f, "{name}")
    }
}

pub const DEFAULT_PREMIUM_RATE: f64 = 0.05;

static PLATFORM_INDEX: Lazy<HashMap<String, AuctionPlatform>> = Lazy::new(|| {
    [
        ("bid4assets", AuctionPlatform::Bid4Assets),
        ("auction.com", AuctionPlatform::AuctionCom),
        ("auction_com", AuctionPlatform::AuctionCom),
        ("xome", AuctionPlatform::Xome),
        ("hubzu", AuctionPlatform::Hubzu),
        ("realauction", AuctionPlatform::RealAuction),
        ("govease", AuctionPlatform::GovEase),
        ("grant_street", AuctionPlatform::GrantStreet),
        ("grantstreet group", AuctionPlatform::GrantStreet),
        ("county", AuctionPlatform::CountyDirect),
        ("county_direct", AuctionPlatform::CountyDirect),
        ("williams_williams", AuctionPlatform::WilliamsWilliams),
        ("williams & williams", AuctionPlatform::WilliamsWilliams),
        ("williams and williams", AuctionPlatform::WilliamsWilliams),
    ]
    .into_iter()
    .map(|(k, v)| (normalize_key(k), v))
    .collect()
});

/// Buyer's premium rate; 5% when the platform is absent or unknown.
pub fn buyers_premium_rate(platform: Option<&str>) -> f64 {
    platform
        .map(AuctionPlatform::parse)
        .unwrap_or(AuctionPlatform::Other)
        .premium_rate()
}
