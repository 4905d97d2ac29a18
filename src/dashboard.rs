//! Dashboard shell
//!
//! Owns the navigation state and the single mounted panel. Switching tabs
//! tears the previous panel down, which cancels its fetch, and mounts the
//! next one, which starts its own.

use std::sync::Arc;

use crate::catalog::{RankingEntry, ReferenceStore};
use crate::metrics::MetricsSource;
use crate::state::{Navigation, RankingToggle, StateResult, Tab};
use crate::views::{CarbonFootprintView, EnergyUsageView, ResourceEffectView};

/// The panel currently mounted
pub enum ActiveView {
    ResourceEffect(ResourceEffectView),
    CarbonFootprint(CarbonFootprintView),
    EnergyUsage(EnergyUsageView),
}

pub struct Dashboard {
    store: Arc<ReferenceStore>,
    source: Arc<dyn MetricsSource>,
    navigation: Navigation,
    active: ActiveView,
}

impl Dashboard {
    /// Create the shell with the default tab mounted
    pub fn new(store: Arc<ReferenceStore>, source: Arc<dyn MetricsSource>) -> Self {
        let navigation = Navigation::new();
        let active = Self::mount(navigation.tab(), &store, &source);
        Self {
            store,
            source,
            navigation,
            active,
        }
    }

    fn mount(tab: Tab, store: &Arc<ReferenceStore>, source: &Arc<dyn MetricsSource>) -> ActiveView {
        tracing::debug!(tab = %tab, "Mounting view");
        match tab {
            Tab::ResourceEffect => ActiveView::ResourceEffect(ResourceEffectView::mount(Arc::clone(store))),
            Tab::CarbonFootprint => {
                ActiveView::CarbonFootprint(CarbonFootprintView::mount(Arc::clone(source)))
            }
            Tab::EnergyUsage => ActiveView::EnergyUsage(EnergyUsageView::mount(Arc::clone(source))),
        }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn tab(&self) -> Tab {
        self.navigation.tab()
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveView {
        &mut self.active
    }

    /// Switch panels; returns false if `tab` was already showing
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if !self.navigation.select_tab(tab) {
            return false;
        }
        self.active = Self::mount(tab, &self.store, &self.source);
        true
    }

    /// Toggle the sidebar ranking for a building type
    pub fn open_ranking(&mut self, building_type: &str) -> StateResult<RankingToggle> {
        self.navigation.open_ranking(&self.store, building_type)
    }

    pub fn close_ranking(&mut self) {
        self.navigation.close_ranking();
    }

    /// Open the justification dialog for a zero-based rank
    pub fn open_entry(&mut self, index: usize) -> StateResult<&RankingEntry> {
        self.navigation.open_entry(&self.store, index)
    }

    pub fn close_entry(&mut self) {
        self.navigation.close_entry();
    }
}
