//! Portfolio sector classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized sector for portfolio analytics.
///
/// These sectors cover the delivery segments of a typical capital-projects
/// portfolio. Unrecognized source values map to [`Sector::Other`] rather
/// than failing a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sector {
    /// Transport and civil infrastructure programs.
    Infrastructure,
    /// Commercial and public buildings.
    Buildings,
    /// Water treatment and distribution.
    Water,
    /// Environmental remediation and compliance.
    Environment,
    /// Energy transition and renewables.
    EnergyTransition,
    /// Digital and IT transformation.
    DigitalTransformation,
    /// Other or unclassified.
    #[default]
    Other,
}

impl Sector {
    /// Returns all sectors in a standard order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Infrastructure,
            Self::Buildings,
            Self::Water,
            Self::Environment,
            Self::EnergyTransition,
            Self::DigitalTransformation,
            Self::Other,
        ]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::Buildings => "Buildings",
            Self::Water => "Water",
            Self::Environment => "Environment",
            Self::EnergyTransition => "Energy Transition",
            Self::DigitalTransformation => "Digital Transformation",
            Self::Other => "Other",
        }
    }

    /// Returns a short code for the sector.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Infrastructure => "INFRA",
            Self::Buildings => "BLDG",
            Self::Water => "WATER",
            Self::Environment => "ENV",
            Self::EnergyTransition => "ENERGY",
            Self::DigitalTransformation => "DIGITAL",
            Self::Other => "OTH",
        }
    }
}

impl FromStr for Sector {
    type Err = std::convert::Infallible;

    /// Parses a sector name or code; anything unrecognized becomes `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        Ok(match normalized.as_str() {
            "infrastructure" | "infra" => Self::Infrastructure,
            "buildings" | "building" | "bldg" => Self::Buildings,
            "water" => Self::Water,
            "environment" | "env" => Self::Environment,
            "energytransition" | "energy" => Self::EnergyTransition,
            "digitaltransformation" | "digital" => Self::DigitalTransformation,
            _ => Self::Other,
        })
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
