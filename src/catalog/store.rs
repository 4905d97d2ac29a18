//! Reference Store
//!
//! Read-only lookup interface over the technology catalog and the
//! building-type rankings. Built once from TOML and shared behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::error::{CatalogError, CatalogResult};
use super::types::{BuildingRanking, RankingEntry, ReferenceFile, Technology};

/// Reference tables compiled into the binary
pub const EMBEDDED_REFERENCE: &str = include_str!("../../data/reference.toml");

static EMBEDDED: OnceLock<Arc<ReferenceStore>> = OnceLock::new();

/// Immutable technology catalog and ranking tables
#[derive(Debug)]
pub struct ReferenceStore {
    /// Technologies in grid order
    technologies: Vec<Technology>,
    /// Technology name → position in `technologies`
    by_name: HashMap<String, usize>,
    /// Rankings in file order
    rankings: Vec<BuildingRanking>,
}

impl ReferenceStore {
    /// Parse and validate reference tables from TOML
    pub fn from_toml(content: &str) -> CatalogResult<Self> {
        let file: ReferenceFile = toml::from_str(content)?;
        Self::build(file)
    }

    /// Load reference tables from a file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let store = Self::from_toml(&content)?;
        tracing::info!(
            path = ?path,
            technologies = store.technologies.len(),
            building_types = store.rankings.len(),
            "Loaded reference data"
        );
        Ok(store)
    }

    /// The embedded tables, parsed on first use
    pub fn embedded() -> CatalogResult<Arc<Self>> {
        if let Some(store) = EMBEDDED.get() {
            return Ok(Arc::clone(store));
        }
        let store = Arc::new(Self::from_toml(EMBEDDED_REFERENCE)?);
        Ok(Arc::clone(EMBEDDED.get_or_init(|| store)))
    }

    /// Load from `path` if given, otherwise use the embedded tables
    pub fn load_or_embedded(path: Option<&Path>) -> CatalogResult<Arc<Self>> {
        match path {
            Some(p) => Ok(Arc::new(Self::load(p)?)),
            None => Self::embedded(),
        }
    }

    fn build(file: ReferenceFile) -> CatalogResult<Self> {
        let mut by_name = HashMap::with_capacity(file.technologies.len());
        for (idx, tech) in file.technologies.iter().enumerate() {
            if tech.name.trim().is_empty() {
                return Err(CatalogError::EmptyName("technology"));
            }
            if by_name.insert(tech.name.clone(), idx).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "technology",
                    name: tech.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for ranking in &file.rankings {
            if ranking.building_type.trim().is_empty() {
                return Err(CatalogError::EmptyName("building type"));
            }
            if !seen.insert(ranking.building_type.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "building type",
                    name: ranking.building_type.clone(),
                });
            }
            for entry in &ranking.entries {
                if !by_name.contains_key(&entry.technology_name) {
                    tracing::debug!(
                        building_type = %ranking.building_type,
                        technology = %entry.technology_name,
                        "Ranking entry has no catalog record"
                    );
                }
            }
        }

        Ok(Self {
            technologies: file.technologies,
            by_name,
            rankings: file.rankings,
        })
    }

    /// All technologies in grid order
    pub fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    /// Position of a technology in the grid
    ///
    /// Exact match first, then case-insensitive.
    pub fn technology_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied().or_else(|| {
            self.technologies
                .iter()
                .position(|t| t.name.eq_ignore_ascii_case(name.trim()))
        })
    }

    pub fn technology(&self, name: &str) -> Option<&Technology> {
        self.technology_index(name).map(|i| &self.technologies[i])
    }

    pub fn technology_at(&self, index: usize) -> Option<&Technology> {
        self.technologies.get(index)
    }

    /// Like [`technology`](Self::technology) but fails with a not-found error
    pub fn require_technology(&self, name: &str) -> CatalogResult<&Technology> {
        self.technology(name)
            .ok_or_else(|| CatalogError::TechnologyNotFound(name.to_string()))
    }

    /// Building types that have a ranking, in file order
    pub fn building_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.rankings.iter().map(|r| r.building_type.as_str())
    }

    fn find_ranking(&self, building_type: &str) -> Option<&BuildingRanking> {
        let key = building_type.trim();
        self.rankings
            .iter()
            .find(|r| r.building_type == key)
            .or_else(|| {
                self.rankings
                    .iter()
                    .find(|r| r.building_type.eq_ignore_ascii_case(key))
            })
    }

    /// Canonical spelling of a building type key
    pub fn canonical_building_type(&self, building_type: &str) -> Option<&str> {
        self.find_ranking(building_type)
            .map(|r| r.building_type.as_str())
    }

    /// Ordered recommendations for a building type
    pub fn ranking(&self, building_type: &str) -> Option<&[RankingEntry]> {
        self.find_ranking(building_type).map(|r| r.entries.as_slice())
    }

    pub fn require_ranking(&self, building_type: &str) -> CatalogResult<&[RankingEntry]> {
        self.ranking(building_type)
            .ok_or_else(|| CatalogError::BuildingTypeNotFound(building_type.to_string()))
    }

    /// Entry at a zero-based rank position
    pub fn ranking_entry(&self, building_type: &str, index: usize) -> CatalogResult<&RankingEntry> {
        let entries = self.require_ranking(building_type)?;
        entries.get(index).ok_or_else(|| CatalogError::RankNotFound {
            building_type: building_type.to_string(),
            rank: index + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ElectricityCost, Tier};
    use std::io::Write;

    const SMALL: &str = r#"
[[technologies]]
name = "Solar Panels"
energy_output = "3,500 kWh/year"
cost_efficiency = "High"
environmental_impact = "Low"
product_cost = 5000.0
installation_cost = 1500.0
maintenance_cost = 100.0
carbon_emissions = 1.6
electricity_cost = 0.05
image = "solar.png"

[[rankings]]
building_type = "Flat"

[[rankings.entries]]
technology_type = "Solar"
technology_name = "Solar Panels"
image = "solar.png"
justification = "Roof access."
"#;

    #[test]
    fn test_embedded_townhouse_ranking() {
        let store = ReferenceStore::embedded().unwrap();
        let ranking = store.ranking("TownHouse").unwrap();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0].technology_name, "Solar Roof Tiles");
        assert_eq!(ranking[1].technology_name, "Air Source Heat Pump");
    }

    #[test]
    fn test_embedded_is_shared() {
        let a = ReferenceStore::embedded().unwrap();
        let b = ReferenceStore::embedded().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_embedded_catalog() {
        let store = ReferenceStore::embedded().unwrap();
        assert_eq!(store.technologies().len(), 8);
        assert_eq!(store.technologies()[0].name, "Solar Panels");

        let boiler = store.technology("Biomass Boiler").unwrap();
        assert_eq!(boiler.electricity_cost, ElectricityCost::NotApplicable);
        assert_eq!(boiler.cost_efficiency, Tier::Low);

        let names: Vec<&str> = store.building_types().collect();
        assert_eq!(
            names,
            vec!["TownHouse", "Cottage", "Bungalow", "Apartment", "DetachedHouse"]
        );
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let store = ReferenceStore::embedded().unwrap();
        assert_eq!(store.technology_index("solar panels"), Some(0));
        assert_eq!(store.canonical_building_type("townhouse"), Some("TownHouse"));
        assert!(store.technology("Tidal Kite").is_none());
        assert!(store.ranking("Castle").is_none());
    }

    #[test]
    fn test_ranking_entry_lookup() {
        let store = ReferenceStore::embedded().unwrap();
        let entry = store.ranking_entry("Cottage", 0).unwrap();
        assert_eq!(entry.technology_name, "Biomass Boiler");

        let err = store.ranking_entry("Cottage", 10).unwrap_err();
        assert!(matches!(err, CatalogError::RankNotFound { rank: 11, .. }));

        let err = store.ranking_entry("Castle", 0).unwrap_err();
        assert!(matches!(err, CatalogError::BuildingTypeNotFound(_)));
    }

    #[test]
    fn test_rejects_duplicate_technology() {
        let doubled = format!("{}\n{}", SMALL, SMALL.split("[[rankings]]").next().unwrap());
        let err = ReferenceStore::from_toml(&doubled).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { kind: "technology", .. }));
    }

    #[test]
    fn test_rejects_invalid_tier() {
        let broken = SMALL.replace("cost_efficiency = \"High\"", "cost_efficiency = \"Great\"");
        let err = ReferenceStore::from_toml(&broken).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let store = ReferenceStore::load(file.path()).unwrap();
        assert_eq!(store.technologies().len(), 1);
        assert_eq!(store.ranking("Flat").unwrap().len(), 1);

        let missing = ReferenceStore::load(Path::new("/nonexistent/reference.toml"));
        assert!(matches!(missing, Err(CatalogError::Io { .. })));
    }
}
