//! Garage tier classification

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Garage tier selected for an estimate.
///
/// Each tier carries an enumerated discount rate, but the rate is
/// informational: no cost in an estimate is adjusted by it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum GarageTier {
    #[default]
    A,
    B,
    C,
    D,
}

impl GarageTier {
    pub const ALL: [GarageTier; 4] = [GarageTier::A, GarageTier::B, GarageTier::C, GarageTier::D];

    /// Discount rate associated with the tier, already fractional
    pub fn discount_rate(&self) -> f64 {
        match self {
            GarageTier::A => 0.0,
            GarageTier::B => 0.8,
            GarageTier::C => 0.5,
            GarageTier::D => 1.0,
        }
    }
}

impl std::fmt::Display for GarageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GarageTier::A => write!(f, "A"),
            GarageTier::B => write!(f, "B"),
            GarageTier::C => write!(f, "C"),
            GarageTier::D => write!(f, "D"),
        }
    }
}
