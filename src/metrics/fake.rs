//! In-memory metrics source for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::{CarbonRecord, EnergyUsageRecord, MetricsError, MetricsSource};

/// Scripted source that counts calls and can hold responses back
#[derive(Default)]
pub(crate) struct FakeSource {
    pub carbon: Option<Vec<CarbonRecord>>,
    pub energy: Option<Vec<EnergyUsageRecord>>,
    pub carbon_calls: AtomicUsize,
    pub energy_calls: AtomicUsize,
    /// When set, each call waits for a notification before answering
    pub gate: Option<Arc<Notify>>,
    /// Set once a gated call got past its gate
    pub released: AtomicBool,
}

impl FakeSource {
    pub fn with_carbon(records: Vec<CarbonRecord>) -> Self {
        Self {
            carbon: Some(records),
            ..Default::default()
        }
    }

    pub fn with_energy(records: Vec<EnergyUsageRecord>) -> Self {
        Self {
            energy: Some(records),
            ..Default::default()
        }
    }

    /// Every call fails as if the upstream were down
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn carbon_calls(&self) -> usize {
        self.carbon_calls.load(Ordering::SeqCst)
    }

    pub fn energy_calls(&self) -> usize {
        self.energy_calls.load(Ordering::SeqCst)
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
            self.released.store(true, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl MetricsSource for FakeSource {
    async fn carbon_payback(&self) -> Result<Vec<CarbonRecord>, MetricsError> {
        self.carbon_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.carbon.clone().ok_or(MetricsError::Unavailable)
    }

    async fn renewable_energy(&self) -> Result<Vec<EnergyUsageRecord>, MetricsError> {
        self.energy_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_gate().await;
        self.energy.clone().ok_or(MetricsError::Unavailable)
    }
}
