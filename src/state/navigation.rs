//! Navigation shell state
//!
//! The active tab, the open building-type ranking in the sidebar and the
//! justification dialog opened from it.

use std::fmt;
use std::str::FromStr;

use super::{StateError, StateResult};
use crate::catalog::{RankingEntry, ReferenceStore};

/// Dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    ResourceEffect,
    CarbonFootprint,
    EnergyUsage,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::ResourceEffect, Tab::CarbonFootprint, Tab::EnergyUsage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::ResourceEffect => "resource-effect",
            Tab::CarbonFootprint => "carbon-footprint",
            Tab::EnergyUsage => "energy-usage",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::ResourceEffect => "Resource Effect",
            Tab::CarbonFootprint => "Carbon Footprint",
            Tab::EnergyUsage => "Energy Usage",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resource-effect" | "resource" | "resources" => Ok(Tab::ResourceEffect),
            "carbon-footprint" | "carbon" => Ok(Tab::CarbonFootprint),
            "energy-usage" | "energy" => Ok(Tab::EnergyUsage),
            _ => Err(StateError::UnknownTab(s.to_string())),
        }
    }
}

/// Open ranking in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingFocus {
    pub building_type: String,
    /// Zero-based rank whose justification dialog is open
    pub open_entry: Option<usize>,
}

/// Whether an `open_ranking` call opened or closed the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingToggle {
    Opened,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    tab: Tab,
    ranking: Option<RankingFocus>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn ranking(&self) -> Option<&RankingFocus> {
        self.ranking.as_ref()
    }

    /// Switch the active tab; returns false if it was already active
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.tab == tab {
            return false;
        }
        self.tab = tab;
        true
    }

    /// Open the ranking for a building type, or close it if already open
    pub fn open_ranking(
        &mut self,
        store: &ReferenceStore,
        building_type: &str,
    ) -> StateResult<RankingToggle> {
        let canonical = store
            .canonical_building_type(building_type)
            .ok_or_else(|| StateError::NotFound(format!("building type {}", building_type)))?;

        if self
            .ranking
            .as_ref()
            .is_some_and(|r| r.building_type == canonical)
        {
            self.ranking = None;
            return Ok(RankingToggle::Closed);
        }

        self.ranking = Some(RankingFocus {
            building_type: canonical.to_string(),
            open_entry: None,
        });
        Ok(RankingToggle::Opened)
    }

    pub fn close_ranking(&mut self) {
        self.ranking = None;
    }

    /// Open the justification dialog for a zero-based rank
    pub fn open_entry<'a>(
        &mut self,
        store: &'a ReferenceStore,
        index: usize,
    ) -> StateResult<&'a RankingEntry> {
        let focus = self.ranking.as_mut().ok_or(StateError::NoRankingOpen)?;
        let entries = store
            .ranking(&focus.building_type)
            .ok_or_else(|| StateError::NotFound(format!("building type {}", focus.building_type)))?;
        let entry = entries.get(index).ok_or(StateError::IndexOutOfRange {
            index,
            len: entries.len(),
        })?;
        focus.open_entry = Some(index);
        Ok(entry)
    }

    pub fn close_entry(&mut self) {
        if let Some(focus) = self.ranking.as_mut() {
            focus.open_entry = None;
        }
    }

    /// Entries of the open ranking
    pub fn open_ranking_entries<'a>(&self, store: &'a ReferenceStore) -> Option<&'a [RankingEntry]> {
        self.ranking
            .as_ref()
            .and_then(|focus| store.ranking(&focus.building_type))
    }

    /// Entry whose dialog is open, if any
    pub fn open_dialog<'a>(&self, store: &'a ReferenceStore) -> Option<(usize, &'a RankingEntry)> {
        let focus = self.ranking.as_ref()?;
        let index = focus.open_entry?;
        store
            .ranking(&focus.building_type)?
            .get(index)
            .map(|entry| (index, entry))
    }
}
