use crate::layers::descriptor::{LayerDescriptor, SourceDescriptor, SourceKind};
use crate::prelude::{HashMap, HashSet};
use crate::rendering::MapRenderer;
use crate::data::geojson::GeoJson;
use crate::Result;

/// Bookkeeping for one source registered with the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub kind: SourceKind,
    /// How often its data was replaced after registration
    pub data_updates: u32,
}

/// Tracks what the renderer holds on behalf of the regions.
///
/// Sources are registered at most once per session and never forgotten.
/// Region layers are swept wholesale: every identifier in the sweep table
/// found in the renderer's layer order is removed, whichever region it
/// belongs to.
pub struct SourceLedger {
    /// Registered sources indexed by name
    sources: HashMap<String, LedgerEntry>,
    /// Region layers currently attached, in attach order
    active_layers: Vec<String>,
    /// Every region layer identifier known to the system
    sweep_table: HashSet<String>,
}

impl SourceLedger {
    pub fn new<I, S>(known_layer_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: HashMap::default(),
            active_layers: Vec::new(),
            sweep_table: known_layer_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_source(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Option<&LedgerEntry> {
        self.sources.get(name)
    }

    /// Registers a source with the renderer unless it is already known.
    ///
    /// Returns whether the renderer was called.
    pub fn register_source<R: MapRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        name: &str,
        descriptor: &SourceDescriptor,
    ) -> Result<bool> {
        if self.has_source(name) {
            return Ok(false);
        }
        renderer.add_source(name, descriptor)?;
        self.sources.insert(
            name.to_string(),
            LedgerEntry {
                kind: descriptor.kind(),
                data_updates: 0,
            },
        );
        log::debug!("registered {} source {}", descriptor.kind(), name);
        Ok(true)
    }

    /// Pushes new data into an already registered GeoJSON source
    pub fn refresh_source<R: MapRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        name: &str,
        data: &GeoJson,
    ) -> Result<()> {
        renderer.set_source_data(name, data)?;
        if let Some(entry) = self.sources.get_mut(name) {
            entry.data_updates += 1;
        }
        log::debug!("refreshed source {} ({} features)", name, data.feature_count());
        Ok(())
    }

    /// Attaches a layer unless the renderer already shows one with that id.
    ///
    /// Returns whether the renderer was called.
    pub fn add_layer<R: MapRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        layer: &LayerDescriptor,
    ) -> Result<bool> {
        if renderer.layer_order().iter().any(|id| *id == layer.id) {
            log::debug!("layer {} already attached", layer.id);
            return Ok(false);
        }
        renderer.add_layer(layer)?;
        if !self.active_layers.contains(&layer.id) {
            self.active_layers.push(layer.id.clone());
        }
        log::debug!("attached layer {} <- {}", layer.id, layer.source);
        Ok(true)
    }

    /// Removes every known region layer the renderer currently shows.
    ///
    /// Failures on individual layers are logged and the sweep continues.
    /// Returns the identifiers that were removed.
    pub fn remove_active_layers<R: MapRenderer + ?Sized>(&mut self, renderer: &mut R) -> Vec<String> {
        let mut removed = Vec::new();
        for id in renderer.layer_order() {
            if !self.sweep_table.contains(&id) {
                continue;
            }
            match renderer.remove_layer(&id) {
                Ok(()) => removed.push(id),
                Err(e) => log::warn!("failed to remove layer {}: {}", id, e),
            }
        }

        let remaining = renderer.layer_order();
        self.active_layers.retain(|id| remaining.contains(id));
        if !removed.is_empty() {
            log::debug!("swept layers {:?}", removed);
        }
        removed
    }

    /// The region layers currently attached
    pub fn active_layers(&self) -> &[String] {
        &self.active_layers
    }

    /// Registered source names, sorted
    pub fn sources(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::style::{LinePaint, Rgb};
    use crate::rendering::RecordingRenderer;

    fn line(id: &str) -> LayerDescriptor {
        LayerDescriptor::line(id, id, LinePaint::solid(Rgb::new(0, 102, 0), 3.0))
    }

    fn geojson() -> SourceDescriptor {
        SourceDescriptor::geojson(GeoJson::empty())
    }

    #[test]
    fn test_register_source_once() {
        let mut renderer = RecordingRenderer::new();
        let mut ledger = SourceLedger::new(["a"]);

        assert!(ledger.register_source(&mut renderer, "a", &geojson()).unwrap());
        assert!(!ledger.register_source(&mut renderer, "a", &geojson()).unwrap());
        assert_eq!(renderer.add_source_calls("a"), 1);
        assert_eq!(ledger.sources(), vec!["a"]);
        assert_eq!(ledger.entry("a").unwrap().kind, SourceKind::GeoJson);
    }

    #[test]
    fn test_failed_registration_is_not_recorded() {
        let mut renderer = RecordingRenderer::new();
        renderer.add_source("a", &geojson()).unwrap();

        let mut ledger = SourceLedger::new(["a"]);
        assert!(ledger.register_source(&mut renderer, "a", &geojson()).is_err());
        assert!(!ledger.has_source("a"));
    }

    #[test]
    fn test_add_layer_is_idempotent() {
        let mut renderer = RecordingRenderer::new();
        let mut ledger = SourceLedger::new(["a"]);
        ledger.register_source(&mut renderer, "a", &geojson()).unwrap();

        assert!(ledger.add_layer(&mut renderer, &line("a")).unwrap());
        assert!(!ledger.add_layer(&mut renderer, &line("a")).unwrap());
        assert_eq!(ledger.active_layers(), ["a".to_string()]);
    }

    #[test]
    fn test_sweep_removes_only_known_layers() {
        let mut renderer = RecordingRenderer::new();
        let mut ledger = SourceLedger::new(["a", "b"]);
        for name in ["a", "b", "foreign"] {
            renderer.add_source(name, &geojson()).unwrap();
        }
        renderer.add_layer(&line("foreign")).unwrap();
        ledger.add_layer(&mut renderer, &line("a")).unwrap();
        ledger.add_layer(&mut renderer, &line("b")).unwrap();

        let removed = ledger.remove_active_layers(&mut renderer);
        assert_eq!(removed, vec!["a".to_string(), "b".to_string()]);
        assert!(ledger.active_layers().is_empty());
        assert_eq!(renderer.layer_order(), vec!["foreign".to_string()]);
        assert!(renderer.has_source("a"));
    }

    #[test]
    fn test_refresh_counts_updates() {
        let mut renderer = RecordingRenderer::new();
        let mut ledger = SourceLedger::new(["a"]);
        ledger.register_source(&mut renderer, "a", &geojson()).unwrap();

        ledger
            .refresh_source(&mut renderer, "a", &GeoJson::empty())
            .unwrap();
        assert_eq!(ledger.entry("a").unwrap().data_updates, 1);
    }
}
