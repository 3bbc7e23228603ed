//! The layer-set state machine.
//!
//! [`RegionLoader`] owns the renderer together with everything the map
//! shows on behalf of the selected region: the source ledger, the coverage
//! panel and the feature inspector. Activation is synchronous and returns
//! the backend requests it needs; their results come back through
//! [`RegionLoader::complete`] in whatever order they finish.

use crate::api::endpoints;
use crate::api::fetch::{FetchKind, FetchOutcome, FetchPayload, FetchRequest, Ticket};
use crate::core::config::{ClientConfig, CoveredDataPolicy, StaleResponsePolicy};
use crate::core::region::{RegionId, RegionRegistry};
use crate::data::coverage::CoverageDto;
use crate::data::geojson::GeoJson;
use crate::input::events::{ClickEvent, MapEvent};
use crate::layers::descriptor::SourceDescriptor;
use crate::layers::manager::SourceLedger;
use crate::rendering::MapRenderer;
use crate::ui::coverage_panel::CoveragePanel;
use crate::ui::inspector::FeatureInspector;
use crate::ui::popup::Popup;

/// What [`RegionLoader::complete`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// The payload reached the map or the coverage panel
    Applied,
    /// The outcome belonged to an activation that is no longer current
    Stale,
    /// The request itself failed
    Failed,
    /// The payload could not be used
    Rejected,
}

pub struct RegionLoader<R: MapRenderer> {
    registry: RegionRegistry,
    ledger: SourceLedger,
    renderer: R,
    panel: CoveragePanel,
    inspector: FeatureInspector,
    config: ClientConfig,
    /// Bumped on every activation; requests carry the value they were issued under
    generation: u64,
    active: Option<RegionId>,
    events: Vec<MapEvent>,
}

impl<R: MapRenderer> RegionLoader<R> {
    pub fn new(renderer: R, config: ClientConfig) -> Self {
        let registry = RegionRegistry::new(&config.api_base);
        Self::with_registry(renderer, config, registry)
    }

    pub fn with_registry(renderer: R, config: ClientConfig, registry: RegionRegistry) -> Self {
        let ledger = SourceLedger::new(registry.known_layer_ids());
        Self {
            registry,
            ledger,
            renderer,
            panel: CoveragePanel::new(),
            inspector: FeatureInspector::new(),
            config,
            generation: 0,
            active: None,
            events: Vec::new(),
        }
    }

    /// Activates the configured initial region once the map has loaded
    pub fn on_map_load(&mut self) -> Vec<FetchRequest> {
        self.activate_region(self.config.initial_region)
    }

    /// Activates the region named by a selector token.
    ///
    /// Unknown tokens are logged and leave the map as it is.
    pub fn select(&mut self, token: &str) -> Vec<FetchRequest> {
        match token.parse::<RegionId>() {
            Ok(id) => self.activate_region(id),
            Err(e) => {
                log::warn!("ignoring region selection: {}", e);
                Vec::new()
            }
        }
    }

    /// Swaps the map over to `id`.
    ///
    /// Every region layer is swept first. The base network layer and the
    /// camera are set up right away; the returned requests fetch the
    /// overlay and the coverage statistics.
    pub fn activate_region(&mut self, id: RegionId) -> Vec<FetchRequest> {
        for layer_id in self.ledger.remove_active_layers(&mut self.renderer) {
            self.events.push(MapEvent::LayerRemove { layer_id });
        }

        // Responses of the previous activation are outdated from here on,
        // even if `id` cannot be resolved
        self.generation += 1;
        self.active = None;

        let region = match self.registry.get(id) {
            Ok(region) => region,
            Err(e) => {
                log::warn!("cannot activate region: {}", e);
                return Vec::new();
            }
        };

        self.active = Some(id);
        self.panel.reset_visibility();
        self.events.push(MapEvent::RegionActivated {
            token: id.token().to_string(),
            generation: self.generation,
        });
        log::info!("activating region {} (generation {})", id, self.generation);

        if let Some((source, layer)) = region.base_layer(self.config.tile_zoom_range) {
            let attached = self
                .ledger
                .register_source(&mut self.renderer, &layer.source, &source)
                .and_then(|_| self.ledger.add_layer(&mut self.renderer, &layer));
            match attached {
                Ok(true) => self.events.push(MapEvent::LayerAdd {
                    layer_id: layer.id.clone(),
                }),
                Ok(false) => {}
                Err(e) => log::warn!("base layer of {} not attached: {}", id, e),
            }
        }

        let ticket = Ticket {
            region: id,
            generation: self.generation,
        };
        let api_base = self.config.api_base.as_str();
        let requests = if region.is_heatmap() {
            vec![FetchRequest {
                ticket,
                kind: FetchKind::Heatmap,
                url: endpoints::heatmap_url(api_base, id.code()),
            }]
        } else {
            vec![
                FetchRequest {
                    ticket,
                    kind: FetchKind::CoveredGeometry,
                    url: endpoints::covered_geometry_url(api_base, id.code()),
                },
                FetchRequest {
                    ticket,
                    kind: FetchKind::CoverageStats,
                    url: endpoints::coverage_url(api_base, id.code()),
                },
            ]
        };

        self.renderer.set_center(region.center);
        self.renderer.set_zoom(region.zoom);

        requests
    }

    /// Applies a finished request.
    ///
    /// Failures are logged and leave the current state untouched.
    pub fn complete(&mut self, outcome: FetchOutcome) -> CompletionStatus {
        let FetchOutcome {
            ticket,
            kind,
            result,
        } = outcome;

        if !self.is_current(&ticket) {
            match self.config.stale_response_policy {
                StaleResponsePolicy::Discard => {
                    log::warn!(
                        "discarding {} response for {} (generation {}, current {})",
                        kind,
                        ticket.region,
                        ticket.generation,
                        self.generation
                    );
                    return CompletionStatus::Stale;
                }
                StaleResponsePolicy::Apply => {
                    log::debug!("applying outdated {} response for {}", kind, ticket.region)
                }
            }
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("{} request for {} failed: {}", kind, ticket.region, e);
                return CompletionStatus::Failed;
            }
        };

        match (kind, payload) {
            (FetchKind::CoveredGeometry | FetchKind::Heatmap, FetchPayload::Geometry(data)) => {
                self.apply_overlay(ticket.region, data)
            }
            (FetchKind::CoverageStats, FetchPayload::Coverage(dto)) => {
                self.apply_coverage(ticket.region, dto)
            }
            (kind, _) => {
                log::warn!("unexpected payload for {} request of {}", kind, ticket.region);
                CompletionStatus::Rejected
            }
        }
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        self.active == Some(ticket.region) && ticket.generation == self.generation
    }

    fn apply_overlay(&mut self, id: RegionId, data: GeoJson) -> CompletionStatus {
        let region = match self.registry.get(id) {
            Ok(region) => region,
            Err(e) => {
                log::warn!("overlay dropped: {}", e);
                return CompletionStatus::Rejected;
            }
        };
        let source_id = region.overlay_source_id();
        let layer = region.overlay_layer();

        let stored = if !self.ledger.has_source(source_id) {
            self.ledger
                .register_source(&mut self.renderer, source_id, &SourceDescriptor::geojson(data))
                .map(|_| ())
        } else if self.config.covered_data_policy == CoveredDataPolicy::Refresh {
            self.ledger.refresh_source(&mut self.renderer, source_id, &data)
        } else {
            log::debug!("keeping registered data of {}", source_id);
            Ok(())
        };
        if let Err(e) = stored {
            log::warn!("overlay source {} not updated: {}", source_id, e);
            return CompletionStatus::Rejected;
        }

        match self.ledger.add_layer(&mut self.renderer, &layer) {
            Ok(true) => {
                self.events.push(MapEvent::LayerAdd { layer_id: layer.id });
                CompletionStatus::Applied
            }
            Ok(false) => CompletionStatus::Applied,
            Err(e) => {
                log::warn!("overlay layer {} not attached: {}", layer.id, e);
                CompletionStatus::Rejected
            }
        }
    }

    fn apply_coverage(&mut self, id: RegionId, dto: CoverageDto) -> CompletionStatus {
        self.panel.set_coverage(dto);
        self.events.push(MapEvent::CoverageUpdated {
            token: id.token().to_string(),
        });
        CompletionStatus::Applied
    }

    /// Opens the track popup for a click on a covered layer.
    ///
    /// Clicks elsewhere and features with malformed metadata show nothing.
    pub fn on_click(&mut self, event: &ClickEvent) -> Option<&Popup> {
        if !self.registry.is_covered_layer(&event.layer_id) {
            return None;
        }

        match self.inspector.handle_click(event) {
            Ok(popup) => {
                if let Err(e) = self.renderer.show_popup(popup) {
                    log::warn!("popup not shown: {}", e);
                }
                Some(popup)
            }
            Err(e) => {
                log::warn!("no popup for click on {}: {}", event.layer_id, e);
                None
            }
        }
    }

    /// Hides the coverage panel until the next activation
    pub fn dismiss_coverage(&mut self) {
        self.panel.dismiss();
    }

    /// Events queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn ledger(&self) -> &SourceLedger {
        &self.ledger
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn panel(&self) -> &CoveragePanel {
        &self.panel
    }

    pub fn inspector(&self) -> &FeatureInspector {
        &self.inspector
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn active_region(&self) -> Option<RegionId> {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Region layers currently attached
    pub fn active_layers(&self) -> &[String] {
        self.ledger.active_layers()
    }
}
