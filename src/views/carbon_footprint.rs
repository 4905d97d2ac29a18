//! Carbon footprint view
//!
//! Fetches per-user carbon records on mount and shows the aggregated
//! payback period and emission total.

use std::sync::Arc;

use super::fetch::{FetchState, Mounted};
use crate::metrics::{aggregate, CarbonSummary, MetricsSource};

/// Shown in place of the cards when the fetch fails
pub const CARBON_ERROR_MESSAGE: &str = "Failed to load carbon data.";

pub struct CarbonFootprintView {
    source: Arc<dyn MetricsSource>,
    fetch: Mounted<CarbonSummary>,
}

impl CarbonFootprintView {
    /// Mount the view and start its fetch
    pub fn mount(source: Arc<dyn MetricsSource>) -> Self {
        let fetch = Self::start(&source);
        Self { source, fetch }
    }

    fn start(source: &Arc<dyn MetricsSource>) -> Mounted<CarbonSummary> {
        let source = Arc::clone(source);
        Mounted::spawn("carbon_footprint", CARBON_ERROR_MESSAGE, async move {
            let records = source.carbon_payback().await?;
            Ok(aggregate(&records))
        })
    }

    /// Fetch again, discarding any in-flight request
    pub fn refresh(&mut self) {
        self.fetch = Self::start(&self.source);
    }

    pub fn state(&self) -> FetchState<CarbonSummary> {
        self.fetch.state()
    }

    pub async fn settled(&mut self) -> FetchState<CarbonSummary> {
        self.fetch.settled().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fake::FakeSource;
    use crate::metrics::CarbonRecord;
    use std::sync::atomic::Ordering;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_loads_summary() {
        let source = Arc::new(FakeSource::with_carbon(vec![
            CarbonRecord::new(4.0, 1.0),
            CarbonRecord::new(8.0, 2.5),
        ]));
        let mut view = CarbonFootprintView::mount(source.clone());

        let state = view.settled().await;
        let summary = state.data().unwrap();
        assert_eq!(summary.average_payback_years, Some(6.0));
        assert_eq!(summary.total_emission_tons, 3.5);
        assert_eq!(source.carbon_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_upstream_is_unavailable() {
        let source = Arc::new(FakeSource::with_carbon(vec![]));
        let mut view = CarbonFootprintView::mount(source);

        let state = view.settled().await;
        assert_eq!(state.data().unwrap().average_payback_years, None);
    }

    #[tokio::test]
    async fn test_failure_shows_message_and_stops() {
        let source = Arc::new(FakeSource::failing());
        let mut view = CarbonFootprintView::mount(source.clone());

        let state = view.settled().await;
        assert_eq!(state.error(), Some(CARBON_ERROR_MESSAGE));

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(view.state().is_failed());
        assert_eq!(source.carbon_calls(), 1);

        view.refresh();
        view.settled().await;
        assert_eq!(source.carbon_calls(), 2);
    }

    #[tokio::test]
    async fn test_unmount_discards_late_response() {
        let gate = Arc::new(Notify::new());
        let source =
            Arc::new(FakeSource::with_carbon(vec![CarbonRecord::new(1.0, 1.0)]).gated(gate.clone()));

        let view = CarbonFootprintView::mount(source.clone());
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(view.state().is_loading());

        drop(view);
        gate.notify_one();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert!(!source.released.load(Ordering::SeqCst));
    }
}
