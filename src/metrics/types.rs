//! Upstream record types
//!
//! Field names follow the admin API's JSON exactly.

use serde::{Deserialize, Serialize};

/// Per-user carbon figures from `/admin/carbon-payback`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonRecord {
    /// Years until carbon savings offset embodied emissions
    #[serde(rename = "CarbonPaybackPeriod")]
    pub payback_years: f64,
    /// Total emission in tons
    #[serde(rename = "TotalCarbonEmission")]
    pub emission_tons: f64,
}

impl CarbonRecord {
    pub fn new(payback_years: f64, emission_tons: f64) -> Self {
        Self {
            payback_years,
            emission_tons,
        }
    }
}

/// Usage of one energy source from `/admin/renewable-energy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyUsageRecord {
    pub source: String,
    #[serde(rename = "totalUsed")]
    pub total_used: f64,
}

impl EnergyUsageRecord {
    pub fn new(source: impl Into<String>, total_used: f64) -> Self {
        Self {
            source: source.into(),
            total_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_record_wire_names() {
        let json = r#"[{"CarbonPaybackPeriod": 6.5, "TotalCarbonEmission": 12}]"#;
        let records: Vec<CarbonRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records, vec![CarbonRecord::new(6.5, 12.0)]);
    }

    #[test]
    fn test_energy_record_wire_names() {
        let json = r#"[{"source": "Solar", "totalUsed": 420.5}, {"source": "Wind", "totalUsed": 80}]"#;
        let records: Vec<EnergyUsageRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0], EnergyUsageRecord::new("Solar", 420.5));
        assert_eq!(records[1].total_used, 80.0);

        let out = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(out["totalUsed"], 420.5);
    }
}
