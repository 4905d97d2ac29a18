//! Energy usage view
//!
//! Fetches total usage per renewable source on mount. Sources keep the
//! order the upstream returned them in; a selector picks one source for
//! the detail card.

use serde::Serialize;
use std::sync::Arc;

use super::fetch::{FetchState, Mounted};
use crate::metrics::{EnergyUsageRecord, MetricsSource};
use crate::state::{StateError, StateResult};

/// Shown in place of the chart when the fetch fails
pub const ENERGY_ERROR_MESSAGE: &str = "Failed to load energy usage data.";

/// One bar of the usage chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergySlice {
    pub source: String,
    pub total_used: f64,
    /// Percentage of the combined usage, 0 when nothing was used
    pub share_percent: f64,
}

/// Chart series with totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyUsage {
    pub total_used: f64,
    pub sources: Vec<EnergySlice>,
}

impl EnergyUsage {
    pub fn from_records(records: &[EnergyUsageRecord]) -> Self {
        let total_used: f64 = records.iter().map(|r| r.total_used).sum();
        let sources = records
            .iter()
            .map(|r| EnergySlice {
                source: r.source.clone(),
                total_used: r.total_used,
                share_percent: if total_used > 0.0 {
                    r.total_used / total_used * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            total_used,
            sources,
        }
    }

    /// First slice for a source name, case-insensitive
    pub fn find(&self, source: &str) -> Option<&EnergySlice> {
        let key = source.trim();
        self.sources
            .iter()
            .find(|s| s.source == key)
            .or_else(|| self.sources.iter().find(|s| s.source.eq_ignore_ascii_case(key)))
    }

    /// Largest value in the series, for scaling bars
    pub fn peak(&self) -> f64 {
        self.sources
            .iter()
            .map(|s| s.total_used)
            .fold(0.0, f64::max)
    }
}

pub struct EnergyUsageView {
    source: Arc<dyn MetricsSource>,
    fetch: Mounted<EnergyUsage>,
    selected: Option<String>,
}

impl EnergyUsageView {
    /// Mount the view and start its fetch
    pub fn mount(source: Arc<dyn MetricsSource>) -> Self {
        let fetch = Self::start(&source);
        Self {
            source,
            fetch,
            selected: None,
        }
    }

    fn start(source: &Arc<dyn MetricsSource>) -> Mounted<EnergyUsage> {
        let source = Arc::clone(source);
        Mounted::spawn("energy_usage", ENERGY_ERROR_MESSAGE, async move {
            let records = source.renewable_energy().await?;
            Ok(EnergyUsage::from_records(&records))
        })
    }

    /// Fetch again, discarding any in-flight request and the selection
    pub fn refresh(&mut self) {
        self.selected = None;
        self.fetch = Self::start(&self.source);
    }

    pub fn state(&self) -> FetchState<EnergyUsage> {
        self.fetch.state()
    }

    pub async fn settled(&mut self) -> FetchState<EnergyUsage> {
        self.fetch.settled().await
    }

    /// Pick a source for the detail card
    pub fn select_source(&mut self, name: &str) -> StateResult<EnergySlice> {
        let state = self.fetch.state();
        let slice = state
            .data()
            .and_then(|usage| usage.find(name))
            .cloned()
            .ok_or_else(|| StateError::NotFound(format!("energy source {}", name)))?;
        self.selected = Some(slice.source.clone());
        Ok(slice)
    }

    pub fn clear_source(&mut self) {
        self.selected = None;
    }

    /// Detail card for the selected source
    pub fn selected(&self) -> Option<EnergySlice> {
        let name = self.selected.as_deref()?;
        self.fetch.state().data().and_then(|u| u.find(name)).cloned()
    }
}
