use crate::{
    api::{client::BackendApi, dispatcher::FetchDispatcher},
    core::{config::ClientConfig, loader::RegionLoader, region::RegionId},
    input::events::ClickEvent,
    rendering::MapRenderer,
    ui::popup::Popup,
    Result,
};
use std::sync::Arc;

/// A map session: the region loader driven by a background fetch dispatcher.
///
/// All renderer mutations happen on the caller's thread. Fetches run on the
/// tokio runtime and are applied when the host calls [`RoadChaser::pump`]
/// (once per frame or event loop turn) or awaits [`RoadChaser::settle`].
pub struct RoadChaser<R: MapRenderer> {
    loader: RegionLoader<R>,
    dispatcher: FetchDispatcher,
}

impl<R: MapRenderer> RoadChaser<R> {
    /// Must be called from within a tokio runtime
    pub fn new(renderer: R, config: ClientConfig, api: Arc<dyn BackendApi>) -> Result<Self> {
        Ok(Self::with_dispatcher(
            RegionLoader::new(renderer, config),
            FetchDispatcher::new(api)?,
        ))
    }

    pub fn with_dispatcher(loader: RegionLoader<R>, dispatcher: FetchDispatcher) -> Self {
        Self { loader, dispatcher }
    }

    pub fn on_map_load(&mut self) {
        let requests = self.loader.on_map_load();
        self.dispatcher.dispatch(requests);
    }

    /// Handles a token from the region selector
    pub fn select(&mut self, token: &str) {
        let requests = self.loader.select(token);
        self.dispatcher.dispatch(requests);
    }

    pub fn activate(&mut self, id: RegionId) {
        let requests = self.loader.activate_region(id);
        self.dispatcher.dispatch(requests);
    }

    /// Applies every outcome that has arrived; returns how many were handled
    pub fn pump(&mut self) -> usize {
        let outcomes = self.dispatcher.try_drain();
        let count = outcomes.len();
        for outcome in outcomes {
            let status = self.loader.complete(outcome);
            log::debug!("fetch completed: {:?}", status);
        }
        count
    }

    /// Waits until no request is in flight, applying outcomes as they arrive
    pub async fn settle(&mut self) -> usize {
        let mut count = 0;
        while let Some(outcome) = self.dispatcher.next_outcome().await {
            let status = self.loader.complete(outcome);
            log::debug!("fetch completed: {:?}", status);
            count += 1;
        }
        count
    }

    pub fn click(&mut self, event: &ClickEvent) -> Option<&Popup> {
        self.loader.on_click(event)
    }

    pub fn dismiss_coverage(&mut self) {
        self.loader.dismiss_coverage();
    }

    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    pub fn loader(&self) -> &RegionLoader<R> {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut RegionLoader<R> {
        &mut self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::coverage::CoverageDto;
    use crate::data::geojson::GeoJson;
    use crate::rendering::RecordingRenderer;
    use crate::MapError;
    use async_trait::async_trait;

    struct OfflineBackend;

    #[async_trait]
    impl BackendApi for OfflineBackend {
        async fn fetch_covered(&self, region: RegionId) -> Result<GeoJson> {
            Err(MapError::Fetch {
                url: region.code().to_string(),
                reason: "offline".to_string(),
            })
        }

        async fn fetch_heatmap(&self, _region: RegionId) -> Result<GeoJson> {
            Ok(GeoJson::empty())
        }

        async fn fetch_coverage(&self, _region: RegionId) -> Result<CoverageDto> {
            Ok(CoverageDto {
                coverage: 12.5,
                ..CoverageDto::default()
            })
        }
    }

    #[tokio::test]
    async fn test_session_applies_outcomes() {
        let mut session = RoadChaser::new(
            RecordingRenderer::new(),
            ClientConfig::local(),
            Arc::new(OfflineBackend),
        )
        .unwrap();

        session.on_map_load();
        assert_eq!(session.settle().await, 2);
        assert_eq!(session.in_flight(), 0);

        let loader = session.loader();
        assert_eq!(loader.active_region(), Some(RegionId::Wanderweg));
        assert_eq!(loader.active_layers(), ["trails-liechtenstein"]);
        assert_eq!(loader.panel().coverage().map(|c| c.coverage), Some(12.5));

        session.dismiss_coverage();
        assert!(!session.loader().panel().is_visible());
        assert_eq!(session.pump(), 0);
    }
}
