//! Per-state reference data.
//!
//! One `StateProfile` per state (plus DC) holds every state-keyed factor the
//! calculators use. Unrecognized states resolve to `StateProfile::NEUTRAL`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::normalize_key;

/// US states plus the District of Columbia.
#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsState {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL, GA, HI, ID, IL, IN, IA, KS,
    KY, LA, ME, MD, MA, MI, MN, MS, MO, MT, NE, NV, NH, NJ, NM, NY, NC,
    ND, OH, OK, OR, PA, RI, SC, SD, TN, TX, UT, VT, VA, WA, WV, WI, WY,
}

impl UsState {
    #[rustfmt::skip]
    pub const ALL: &'static [UsState] = &[
        UsState::AL, UsState::AK, UsState::AZ, UsState::AR, UsState::CA, UsState::CO,
        UsState::CT, UsState::DE, UsState::DC, UsState::FL, UsState::GA, UsState::HI,
        UsState::ID, UsState::IL, UsState::IN, UsState::IA, UsState::KS, UsState::KY,
        UsState::LA, UsState::ME, UsState::MD, UsState::MA, UsState::MI, UsState::MN,
        UsState::MS, UsState::MO, UsState::MT, UsState::NE, UsState::NV, UsState::NH,
        UsState::NJ, UsState::NM, UsState::NY, UsState::NC, UsState::ND, UsState::OH,
        UsState::OK, UsState::OR, UsState::PA, UsState::RI, UsState::SC, UsState::SD,
        UsState::TN, UsState::TX, UsState::UT, UsState::VT, UsState::VA, UsState::WA,
        UsState::WV, UsState::WI, UsState::WY,
    ];

    /// Two-letter postal code.
    #[rustfmt::skip]
    pub fn code(&self) -> &'static str {
        match self {
            UsState::AL => "AL", UsState::AK => "AK", UsState::AZ => "AZ",
            UsState::AR => "AR", UsState::CA => "CA", UsState::CO => "CO",
            UsState::CT => "CT", UsState::DE => "DE", UsState::DC => "DC",
            UsState::FL => "FL", UsState::GA => "GA", UsState::HI => "HI",
            UsState::ID => "ID", UsState::IL => "IL", UsState::IN => "IN",
            UsState::IA => "IA", UsState::KS => "KS", UsState::KY => "KY",
            UsState::LA => "LA", UsState::ME => "ME", UsState::MD => "MD",
            UsState::MA => "MA", UsState::MI => "MI", UsState::MN => "MN",
            UsState::MS => "MS", UsState::MO => "MO", UsState::MT => "MT",
            UsState::NE => "NE", UsState::NV => "NV", UsState::NH => "NH",
            UsState::NJ => "NJ", UsState::NM => "NM", UsState::NY => "NY",
            UsState::NC => "NC", UsState::ND => "ND", UsState::OH => "OH",
            UsState::OK => "OK", UsState::OR => "OR", UsState::PA => "PA",
            UsState::RI => "RI", UsState::SC => "SC", UsState::SD => "SD",
            UsState::TN => "TN", UsState::TX => "TX", UsState::UT => "UT",
            UsState::VT => "VT", UsState::VA => "VA", UsState::WA => "WA",
            UsState::WV => "WV", UsState::WI => "WI", UsState::WY => "WY",
        }
    }

    #[rustfmt::skip]
    pub fn name(&self) -> &'static str {
        match self {
            UsState::AL => "Alabama", UsState::AK => "Alaska", UsState::AZ => "Arizona",
            UsState::AR => "Arkansas", UsState::CA => "California", UsState::CO => "Colorado",
            UsState::CT => "Connecticut", UsState::DE => "Delaware",
            UsState::DC => "District of Columbia", UsState::FL => "Florida",
            UsState::GA => "Georgia", UsState::HI => "Hawaii", UsState::ID => "Idaho",
            UsState::IL => "Illinois", UsState::IN => "Indiana", UsState::IA => "Iowa",
            UsState::KS => "Kansas", UsState::KY => "Kentucky", UsState::LA => "Louisiana",
            UsState::ME => "Maine", UsState::MD => "Maryland", UsState::MA => "Massachusetts",
            UsState::MI => "Michigan", UsState::MN => "Minnesota", UsState::MS => "Mississippi",
            UsState::MO => "Missouri", UsState::MT => "Montana", UsState::NE => "Nebraska",
            UsState::NV => "Nevada", UsState::NH => "New Hampshire", UsState::NJ => "New Jersey",
            UsState::NM => "New Mexico", UsState::NY => "New York",
            UsState::NC => "North Carolina", UsState::ND => "North Dakota", UsState::OH => "Ohio",
            UsState::OK => "Oklahoma", UsState::OR => "Oregon", UsState::PA => "Pennsylvania",
            UsState::RI => "Rhode Island", UsState::SC => "South Carolina",
            UsState::SD => "South Dakota", UsState::TN => "Tennessee", UsState::TX => "Texas",
            UsState::UT => "Utah", UsState::VT => "Vermont", UsState::VA => "Virginia",
            UsState::WA => "Washington", UsState::WV => "West Virginia",
            UsState::WI => "Wisconsin", UsState::WY => "Wyoming",
        }
    }

    /// Parse a postal code or full name, ignoring case, spaces and punctuation.
    pub fn parse(raw: &str) -> Option<UsState> {
        STATE_INDEX.get(&normalize_key(raw)).copied()
    }

    /// Reference profile for this state.
    pub fn profile(&self) -> StateProfile {
        profile_for(*self)
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for UsState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsState::parse(s).ok_or_else(|| format!("Unknown state: {s}"))
    }
}

/// Normalized code and name → state. Built once per process.
static STATE_INDEX: Lazy<HashMap<String, UsState>> = Lazy::new(|| {
    let mut index = HashMap::with_capacity(UsState::ALL.len() * 2 + 2);
    for state in UsState::ALL {
        index.insert(normalize_key(state.code()), *state);
        index.insert(normalize_key(state.name()), *state);
    }
    index.insert("washingtondc".to_string(), UsState::DC);
    index.insert("districtofcolumbia".to_string(), UsState::DC);
    index
});

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Every state-keyed factor in one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateProfile {
    /// Construction labor cost relative to the national average.
    pub labor: f64,
    /// Construction materials cost relative to the national average.
    pub materials: f64,
    /// Effective annual property tax rate.
    pub property_tax_rate: f64,
    /// Combined deed transfer tax rate.
    pub transfer_tax_rate: f64,
    /// Flat deed recording fee (dollars).
    pub recording_fee: f64,
    /// Scales title search and title insurance.
    pub title_multiplier: f64,
    /// Closings must be handled by a licensed attorney.
    pub attorney_closing: bool,
    /// Hurricane/wildfire/hail loading on insurance premiums.
    pub catastrophe_multiplier: f64,
    /// Heating/cooling load on utilities.
    pub climate_multiplier: f64,
    /// Snow removal, storm prep and similar seasonal upkeep.
    pub seasonal_multiplier: f64,
    /// Scales seller-side closing costs.
    pub closing_multiplier: f64,
}

impl StateProfile {
    /// Fallback for unrecognized states.
    pub const NEUTRAL: StateProfile = StateProfile {
        labor: 1.0,
        materials: 1.0,
        property_tax_rate: 0.01,
        transfer_tax_rate: 0.01,
        recording_fee: 150.0,
        title_multiplier: 1.0,
        attorney_closing: false,
        catastrophe_multiplier: 1.0,
        climate_multiplier: 1.0,
        seasonal_multiplier: 1.0,
        closing_multiplier: 1.0,
    };
}

const fn base(labor: f64, materials: f64, property_tax_rate: f64, transfer_tax_rate: f64) -> StateProfile {
    StateProfile {
        labor,
        materials,
        property_tax_rate,
        transfer_tax_rate,
        ..StateProfile::NEUTRAL
    }
}

const fn profile_for(state: UsState) -> StateProfile {
    match state {
        UsState::AL => StateProfile {
            catastrophe_multiplier: 1.3,
            climate_multiplier: 1.1,
            seasonal_multiplier: 1.1,
            ..base(0.82, 0.94, 0.0041, 0.001)
        },
        UsState::AK => StateProfile {
            recording_fee: 100.0,
            climate_multiplier: 1.4,
            seasonal_multiplier: 1.2,
            ..base(1.30, 1.20, 0.0119, 0.0)
        },
        UsState::AZ => StateProfile {
            recording_fee: 30.0,
            climate_multiplier: 1.2,
            ..base(0.95, 0.98, 0.0062, 0.0)
        },
        UsState::AR => StateProfile {
            catastrophe_multiplier: 1.15,
            ..base(0.80, 0.93, 0.0062, 0.0033)
        },
        UsState::CA => StateProfile {
            recording_fee: 100.0,
            title_multiplier: 1.1,
            catastrophe_multiplier: 1.25,
            climate_multiplier: 0.95,
            closing_multiplier: 1.1,
            ..base(1.25, 1.10, 0.0075, 0.0011)
        },
        UsState::CO => StateProfile {
            catastrophe_multiplier: 1.15,
            climate_multiplier: 1.05,
            seasonal_multiplier: 1.15,
            ..base(1.05, 1.02, 0.0051, 0.0001)
        },
        UsState::CT => StateProfile {
            attorney_closing: true,
            climate_multiplier: 1.1,
            seasonal_multiplier: 1.15,
            ..base(1.15, 1.05, 0.0215, 0.0075)
        },
        UsState::DE => StateProfile {
            attorney_closing: true,
            closing_multiplier: 1.1,
            ..base(1.00, 1.00, 0.0057, 0.04)
        },
        UsState::DC => StateProfile {
            recording_fee: 200.0,
            title_multiplier: 1.1,
            attorney_closing: true,
            closing_multiplier: 1.2,
            ..base(1.30, 1.08, 0.0057, 0.011)
        },
        UsState::FL => StateProfile {
            recording_fee: 100.0,
            title_multiplier: 1.1,
            catastrophe_multiplier: 1.8,
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.1,
            closing_multiplier: 1.1,
            ..base(1.00, 1.00, 0.0089, 0.007)
        },
        UsState::GA => StateProfile {
            attorney_closing: true,
            climate_multiplier: 1.05,
            ..base(0.90, 0.96, 0.0092, 0.001)
        },
        UsState::HI => StateProfile {
            catastrophe_multiplier: 1.2,
            climate_multiplier: 1.3,
            ..base(1.35, 1.25, 0.0028, 0.001)
        },
        UsState::ID => base(0.92, 0.98, 0.0063, 0.0),
        UsState::IL => StateProfile {
            climate_multiplier: 1.1,
            seasonal_multiplier: 1.15,
            ..base(1.12, 1.02, 0.0223, 0.0015)
        },
        UsState::IN => StateProfile {
            seasonal_multiplier: 1.1,
            ..base(0.90, 0.96, 0.0085, 0.0)
        },
        UsState::IA => StateProfile {
            catastrophe_multiplier: 1.1,
            climate_multiplier: 1.1,
            seasonal_multiplier: 1.15,
            ..base(0.92, 0.97, 0.0157, 0.0016)
        },
        UsState::KS => StateProfile {
            catastrophe_multiplier: 1.2,
            ..base(0.88, 0.96, 0.0141, 0.0)
        },
        UsState::KY => base(0.88, 0.96, 0.0086, 0.001),
        UsState::LA => StateProfile {
            catastrophe_multiplier: 1.7,
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.1,
            ..base(0.88, 0.97, 0.0056, 0.0)
        },
        UsState::ME => StateProfile {
            climate_multiplier: 1.2,
            seasonal_multiplier: 1.2,
            ..base(1.00, 1.02, 0.0124, 0.0044)
        },
        UsState::MD => StateProfile {
            closing_multiplier: 1.15,
            ..base(1.08, 1.02, 0.0105, 0.005)
        },
        UsState::MA => StateProfile {
            attorney_closing: true,
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.2,
            closing_multiplier: 1.1,
            ..base(1.25, 1.08, 0.0114, 0.00456)
        },
        UsState::MI => StateProfile {
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.15,
            ..base(1.00, 1.00, 0.0138, 0.0086)
        },
        UsState::MN => StateProfile {
            climate_multiplier: 1.2,
            seasonal_multiplier: 1.2,
            ..base(1.05, 1.00, 0.0111, 0.0033)
        },
        UsState::MS => StateProfile {
            catastrophe_multiplier: 1.3,
            seasonal_multiplier: 1.1,
            ..base(0.78, 0.92, 0.0081, 0.0)
        },
        UsState::MO => StateProfile {
            catastrophe_multiplier: 1.15,
            ..base(0.92, 0.97, 0.0101, 0.0)
        },
        UsState::MT => StateProfile {
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.15,
            ..base(0.95, 1.00, 0.0074, 0.0)
        },
        UsState::NE => StateProfile {
            catastrophe_multiplier: 1.15,
            seasonal_multiplier: 1.1,
            ..base(0.90, 0.97, 0.0167, 0.00225)
        },
        UsState::NV => StateProfile {
            climate_multiplier: 1.15,
            ..base(1.05, 1.02, 0.0059, 0.0039)
        },
        UsState::NH => StateProfile {
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.2,
            ..base(1.05, 1.03, 0.0193, 0.015)
        },
        UsState::NJ => StateProfile {
            seasonal_multiplier: 1.1,
            closing_multiplier: 1.2,
            ..base(1.20, 1.05, 0.0249, 0.01)
        },
        UsState::NM => base(0.90, 0.98, 0.0080, 0.0),
        UsState::NY => StateProfile {
            recording_fee: 250.0,
            title_multiplier: 1.4,
            attorney_closing: true,
            climate_multiplier: 1.1,
            seasonal_multiplier: 1.15,
            closing_multiplier: 1.4,
            ..base(1.30, 1.12, 0.0173, 0.004)
        },
        UsState::NC => StateProfile {
            attorney_closing: true,
            catastrophe_multiplier: 1.15,
            ..base(0.88, 0.96, 0.0082, 0.002)
        },
        UsState::ND => StateProfile {
            climate_multiplier: 1.2,
            seasonal_multiplier: 1.2,
            ..base(0.95, 0.99, 0.0098, 0.0)
        },
        UsState::OH => StateProfile {
            seasonal_multiplier: 1.1,
            ..base(0.95, 0.98, 0.0159, 0.001)
        },
        UsState::OK => StateProfile {
            catastrophe_multiplier: 1.35,
            ..base(0.85, 0.95, 0.0090, 0.00075)
        },
        UsState::OR => StateProfile {
            climate_multiplier: 0.9,
            ..base(1.08, 1.03, 0.0093, 0.0)
        },
        UsState::PA => StateProfile {
            seasonal_multiplier: 1.1,
            ..base(1.00, 1.00, 0.0153, 0.02)
        },
        UsState::RI => StateProfile {
            seasonal_multiplier: 1.15,
            ..base(1.12, 1.04, 0.0140, 0.0046)
        },
        UsState::SC => StateProfile {
            attorney_closing: true,
            catastrophe_multiplier: 1.25,
            seasonal_multiplier: 1.05,
            ..base(0.85, 0.95, 0.0057, 0.0037)
        },
        UsState::SD => StateProfile {
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.15,
            ..base(0.88, 0.97, 0.0131, 0.001)
        },
        UsState::TN => StateProfile {
            catastrophe_multiplier: 1.1,
            ..base(0.88, 0.96, 0.0067, 0.0037)
        },
        UsState::TX => StateProfile {
            recording_fee: 80.0,
            title_multiplier: 1.2,
            catastrophe_multiplier: 1.4,
            climate_multiplier: 1.15,
            ..base(0.92, 0.97, 0.0180, 0.0)
        },
        UsState::UT => StateProfile {
            seasonal_multiplier: 1.1,
            ..base(0.98, 1.00, 0.0058, 0.0)
        },
        UsState::VT => StateProfile {
            attorney_closing: true,
            climate_multiplier: 1.2,
            seasonal_multiplier: 1.2,
            ..base(1.02, 1.03, 0.0190, 0.0125)
        },
        UsState::VA => base(1.02, 1.00, 0.0082, 0.0025),
        UsState::WA => StateProfile {
            climate_multiplier: 0.9,
            ..base(1.15, 1.05, 0.0094, 0.011)
        },
        UsState::WV => StateProfile {
            attorney_closing: true,
            ..base(0.85, 0.95, 0.0058, 0.0044)
        },
        UsState::WI => StateProfile {
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.2,
            ..base(0.98, 0.99, 0.0173, 0.003)
        },
        UsState::WY => StateProfile {
            climate_multiplier: 1.15,
            seasonal_multiplier: 1.15,
            ..base(0.92, 1.00, 0.0061, 0.0)
        },
    }
}

/// Profile for a raw state string, or `NEUTRAL` when unrecognized.
pub fn state_profile(raw: &str) -> StateProfile {
    UsState::parse(raw)
        .map(|s| s.profile())
        .unwrap_or(StateProfile::NEUTRAL)
}
