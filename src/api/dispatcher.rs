//! Runs loader requests in the background and queues their outcomes.
//!
//! Requests run concurrently on the tokio runtime; outcomes are collected
//! over a channel and applied by whoever owns the loader, on its own thread.
//! Nothing is cancelled: a request outlives the activation that issued it.

use super::client::BackendApi;
use super::fetch::{FetchOutcome, FetchRequest};
use crate::{MapError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Counts a request as running until dropped
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct FetchDispatcher {
    api: Arc<dyn BackendApi>,
    handle: Handle,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    in_flight: Arc<AtomicUsize>,
}

impl FetchDispatcher {
    /// Creates a dispatcher on the current tokio runtime
    pub fn new(api: Arc<dyn BackendApi>) -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|e| MapError::Config(format!("no tokio runtime available: {}", e)))?;
        Ok(Self::with_handle(api, handle))
    }

    pub fn with_handle(api: Arc<dyn BackendApi>, handle: Handle) -> Self {
        let (tx, rx) = unbounded();
        Self {
            api,
            handle,
            tx,
            rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Starts every request; each reports back independently.
    ///
    /// A request whose task panics or is cancelled reports a failed outcome.
    pub fn dispatch(&self, requests: Vec<FetchRequest>) {
        for request in requests {
            let api = Arc::clone(&self.api);
            let tx = self.tx.clone();
            let guard = InFlightGuard::enter(&self.in_flight);

            log::debug!(
                "dispatching {} request for {} ({})",
                request.kind,
                request.ticket.region,
                request.url
            );
            let fetch = {
                let request = request.clone();
                self.handle.spawn(async move { api.fetch(&request).await })
            };
            self.handle.spawn(async move {
                let _guard = guard;
                let result = match fetch.await {
                    Ok(result) => result,
                    Err(e) => {
                        log::error!(
                            "{} request for {} aborted: {}",
                            request.kind,
                            request.ticket.region,
                            e
                        );
                        Err(MapError::Fetch {
                            url: request.url.clone(),
                            reason: format!("request task failed: {}", e),
                        })
                    }
                };
                let _ = tx.send(FetchOutcome::new(&request, result));
            });
        }
    }

    /// Outcomes that have arrived so far, in arrival order
    pub fn try_drain(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }

    /// Number of requests still running
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Waits for the next outcome; `None` once nothing is running or queued
    pub async fn next_outcome(&self) -> Option<FetchOutcome> {
        loop {
            if let Ok(outcome) = self.rx.try_recv() {
                return Some(outcome);
            }
            if self.in_flight() == 0 {
                return self.rx.try_recv().ok();
            }
            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fetch::{FetchKind, FetchPayload, Ticket};
    use crate::core::region::RegionId;
    use crate::data::coverage::CoverageDto;
    use crate::data::geojson::GeoJson;
    use async_trait::async_trait;

    struct SlowCoverage;

    #[async_trait]
    impl BackendApi for SlowCoverage {
        async fn fetch_covered(&self, _region: RegionId) -> Result<GeoJson> {
            Ok(GeoJson::empty())
        }

        async fn fetch_heatmap(&self, _region: RegionId) -> Result<GeoJson> {
            Ok(GeoJson::empty())
        }

        async fn fetch_coverage(&self, _region: RegionId) -> Result<CoverageDto> {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(CoverageDto::default())
        }
    }

    struct PanickingCoverage;

    #[async_trait]
    impl BackendApi for PanickingCoverage {
        async fn fetch_covered(&self, _region: RegionId) -> Result<GeoJson> {
            Ok(GeoJson::empty())
        }

        async fn fetch_heatmap(&self, _region: RegionId) -> Result<GeoJson> {
            Ok(GeoJson::empty())
        }

        async fn fetch_coverage(&self, _region: RegionId) -> Result<CoverageDto> {
            panic!("statistics backend crashed");
        }
    }

    fn request(kind: FetchKind) -> FetchRequest {
        FetchRequest {
            ticket: Ticket {
                region: RegionId::Wanderweg,
                generation: 3,
            },
            kind,
            url: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_outcomes_arrive_independently() {
        let dispatcher = FetchDispatcher::new(Arc::new(SlowCoverage)).unwrap();
        dispatcher.dispatch(vec![
            request(FetchKind::CoverageStats),
            request(FetchKind::CoveredGeometry),
        ]);

        let first = dispatcher.next_outcome().await.unwrap();
        assert_eq!(first.kind, FetchKind::CoveredGeometry);
        assert!(matches!(first.result, Ok(FetchPayload::Geometry(_))));

        let second = dispatcher.next_outcome().await.unwrap();
        assert_eq!(second.kind, FetchKind::CoverageStats);
        assert_eq!(second.ticket.generation, 3);

        assert!(dispatcher.next_outcome().await.is_none());
        assert_eq!(dispatcher.in_flight(), 0);
        assert!(dispatcher.try_drain().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_request_reports_failure() {
        let dispatcher = FetchDispatcher::new(Arc::new(PanickingCoverage)).unwrap();
        dispatcher.dispatch(vec![
            request(FetchKind::CoverageStats),
            request(FetchKind::CoveredGeometry),
        ]);

        let mut outcomes = Vec::new();
        let drained = tokio::time::timeout(Duration::from_secs(2), async {
            while let Some(outcome) = dispatcher.next_outcome().await {
                outcomes.push(outcome);
            }
        })
        .await;

        assert!(drained.is_ok());
        assert_eq!(dispatcher.in_flight(), 0);
        assert_eq!(outcomes.len(), 2);
        let failed = outcomes
            .iter()
            .find(|o| o.kind == FetchKind::CoverageStats)
            .unwrap();
        assert!(matches!(failed.result, Err(MapError::Fetch { .. })));
    }
}
