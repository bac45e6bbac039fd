//! Render engine facade
//!
//! The process-lifetime object behind the HTTP boundary: immutable template
//! bytes, the current coordinate configuration, and the debug overlay
//! settings. The configuration is swapped atomically on reload so in-flight
//! renders never observe a half-updated value.

use crate::budget::Budget;
use crate::calibration::DebugOverlay;
use crate::coords::{load_coordinate_config, CoordinateConfig};
use crate::renderer::OverlayRenderer;
use crate::store::TemplateStore;
use crate::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Template + coordinate configuration + debug settings
///
/// `render` takes `&self`; concurrent renders share the template bytes and
/// a config snapshot, and each opens its own document instance.
pub struct RenderEngine {
    store: TemplateStore,
    coords: RwLock<Arc<CoordinateConfig>>,
    coords_path: Option<PathBuf>,
    debug: DebugOverlay,
}

impl RenderEngine {
    /// Build an engine over an already-constructed configuration
    pub fn new(store: TemplateStore, coords: CoordinateConfig) -> Self {
        Self {
            store,
            coords: RwLock::new(Arc::new(coords)),
            coords_path: None,
            debug: DebugOverlay::default(),
        }
    }

    /// Build an engine that reads its configuration from a file
    ///
    /// The file is read immediately; a missing or corrupt file degrades to
    /// the built-in defaults. `reload_coords` re-reads the same file later.
    pub fn with_coords_file(store: TemplateStore, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let coords = load_coordinate_config(&path);
        Self {
            store,
            coords: RwLock::new(Arc::new(coords)),
            coords_path: Some(path),
            debug: DebugOverlay::default(),
        }
    }

    /// Set the debug overlay settings
    pub fn with_debug(mut self, debug: DebugOverlay) -> Self {
        self.debug = debug;
        self
    }

    /// Snapshot of the current coordinate configuration
    pub fn coords(&self) -> Arc<CoordinateConfig> {
        self.coords
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Re-read the coordinate file and swap the configuration atomically
    ///
    /// No-op when the engine was built without a file path.
    pub fn reload_coords(&self) {
        let Some(path) = &self.coords_path else {
            return;
        };
        let fresh = Arc::new(load_coordinate_config(path));
        let mut guard = self.coords.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
        log::debug!("coordinate config reloaded from {}", path.display());
    }

    /// Render a budget to PDF bytes
    pub fn render(&self, budget: &Budget) -> Result<Vec<u8>> {
        log::debug!(
            "rendering budget: company={} materials={} services={}",
            budget
                .company
                .as_ref()
                .and_then(|c| c.legal_name.as_deref())
                .unwrap_or("(sem empresa)"),
            budget.materials.len(),
            budget.services.len()
        );

        let coords = self.coords();
        OverlayRenderer::new(&coords, &self.debug).render(&self.store, budget)
    }
}
