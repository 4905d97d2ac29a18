//! Reference data types
//!
//! Technology records and per-building-type rankings. All values are
//! immutable once loaded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative ordinal rating used for relative comparison
///
/// Ordered `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Moderate,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Moderate => "Moderate",
            Tier::High => "High",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running electricity cost of a technology
///
/// Serialized as a number, or as the string `"N/A"` for technologies that
/// neither draw nor sell electricity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElectricityCost", into = "RawElectricityCost")]
pub enum ElectricityCost {
    Amount(f64),
    NotApplicable,
}

impl ElectricityCost {
    pub fn amount(&self) -> Option<f64> {
        match self {
            ElectricityCost::Amount(v) => Some(*v),
            ElectricityCost::NotApplicable => None,
        }
    }
}

impl fmt::Display for ElectricityCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElectricityCost::Amount(v) => write!(f, "{:.2}", v),
            ElectricityCost::NotApplicable => f.write_str("N/A"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawElectricityCost {
    Amount(f64),
    Label(String),
}

impl TryFrom<RawElectricityCost> for ElectricityCost {
    type Error = String;

    fn try_from(raw: RawElectricityCost) -> Result<Self, Self::Error> {
        match raw {
            RawElectricityCost::Amount(v) => Ok(ElectricityCost::Amount(v)),
            RawElectricityCost::Label(s) if s.trim().eq_ignore_ascii_case("n/a") => {
                Ok(ElectricityCost::NotApplicable)
            }
            RawElectricityCost::Label(s) => Err(format!(
                "invalid electricity cost {:?}: expected a number or \"N/A\"",
                s
            )),
        }
    }
}

impl From<ElectricityCost> for RawElectricityCost {
    fn from(cost: ElectricityCost) -> Self {
        match cost {
            ElectricityCost::Amount(v) => RawElectricityCost::Amount(v),
            ElectricityCost::NotApplicable => RawElectricityCost::Label("N/A".to_string()),
        }
    }
}

/// A renewable technology in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    /// Unique name, used as the lookup key
    pub name: String,
    /// Free text with an embedded unit, e.g. "3,500 kWh/year"
    pub energy_output: String,
    pub cost_efficiency: Tier,
    pub environmental_impact: Tier,
    pub product_cost: f64,
    pub installation_cost: f64,
    /// Yearly maintenance cost
    pub maintenance_cost: f64,
    /// Embodied emissions in tons of CO2
    pub carbon_emissions: f64,
    pub electricity_cost: ElectricityCost,
    /// Opaque image reference, never resolved by this crate
    pub image: String,
}

impl Technology {
    /// Product plus installation cost
    pub fn upfront_cost(&self) -> f64 {
        self.product_cost + self.installation_cost
    }
}

/// One recommendation in a building type's ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub technology_type: String,
    pub technology_name: String,
    pub image: String,
    pub justification: String,
}

/// Ordered recommendations for a building type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRanking {
    pub building_type: String,
    #[serde(default)]
    pub entries: Vec<RankingEntry>,
}

/// On-disk layout of the reference file
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReferenceFile {
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub rankings: Vec<BuildingRanking>,
}
