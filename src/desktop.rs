//! Composition root. Owns the registry, the gesture router, and the
//! persistence boundary: load once at construction, save after every
//! mutating call. Renderers and mini-applications talk to this type; the
//! pieces underneath stay testable without any storage backend.

use tracing::warn;

use crate::common::config::{Config, Settings};
use crate::geometry::{Point, Size};
use crate::gesture::{self, Capture, GestureRouter, PointerInput, WheelInput};
use crate::model::placement;
use crate::model::registry::{WindowRegistry, Connector, DockEntry};
use crate::model::window::{ComponentKind, SpawnOptions, WindowContent, WindowId, WindowUpdate};
use crate::persist::{self, BlobStore};

pub struct Desktop<S: BlobStore> {
    settings: Settings,
    registry: WindowRegistry,
    gestures: GestureRouter,
    store: S,
}

impl<S: BlobStore> Desktop<S> {
    pub fn load(store: S, config: &Config) -> Self {
        let settings = config.settings.clone();
        let registry = persist::load(&store, &settings);
        let gestures = GestureRouter::new(&settings);
        Self { settings, registry, gestures, store }
    }

    pub fn registry(&self) -> &WindowRegistry { &self.registry }

    pub fn settings(&self) -> &Settings { &self.settings }

    /// Viewport size is render-session state, not persisted.
    pub fn set_viewport(&mut self, viewport: Size) { self.registry.set_viewport(viewport); }

    // Window lifecycle

    pub fn open_window(
        &mut self,
        content: WindowContent,
        title: impl Into<String>,
        options: SpawnOptions,
    ) -> WindowId {
        let id = self.registry.open_window(content, title, options);
        self.persist();
        id
    }

    /// Spawn by component name, the way dock launchers do. Unknown names
    /// fall back to the placeholder content.
    pub fn open_by_name(&mut self, name: &str, title: impl Into<String>) -> WindowId {
        let content = WindowContent::default_for(ComponentKind::parse(name));
        self.open_window(content, title, SpawnOptions::default())
    }

    /// Spawns a batch of related windows on a circle around a source window,
    /// each linked back to it for the connector overlay. Falls back to
    /// default placement if the source is gone.
    pub fn open_ring(
        &mut self,
        source: WindowId,
        entries: Vec<(WindowContent, String)>,
    ) -> Vec<WindowId> {
        let center = self.registry.get(source).map(|w| Point::new(w.x, w.y));
        let ids = match center {
            Some(center) => {
                let positions =
                    placement::radial_positions(center, entries.len(), self.settings.ring_radius);
                entries
                    .into_iter()
                    .zip(positions)
                    .map(|((content, title), position)| {
                        self.registry.open_window(
                            content,
                            title,
                            SpawnOptions::at(position).with_parent(source),
                        )
                    })
                    .collect()
            }
            None => entries
                .into_iter()
                .map(|(content, title)| {
                    self.registry.open_window(content, title, SpawnOptions::default())
                })
                .collect(),
        };
        self.persist();
        ids
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.registry.close_window(id);
        self.persist();
    }

    pub fn focus_window(&mut self, id: WindowId) {
        self.registry.focus_window(id);
        self.persist();
    }

    pub fn update_window(&mut self, id: WindowId, update: WindowUpdate) {
        self.registry.update_window(id, update);
        self.persist();
    }

    // Canvas

    pub fn set_transform(&mut self, x: f64, y: f64, scale: f64) {
        self.registry.set_transform(x, y, scale);
        self.persist();
    }

    pub fn reset_canvas(&mut self) {
        self.registry.reset_canvas();
        self.persist();
    }

    // Gestures

    pub fn pointer_down(&mut self, input: PointerInput) -> Capture {
        let hit = gesture::hit_test(&self.registry, input.position, &self.settings);
        let capture = self.gestures.pointer_down(&mut self.registry, hit, input);
        self.persist();
        capture
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.gestures.pointer_move(&mut self.registry, position);
        self.persist();
    }

    pub fn pointer_up(&mut self, position: Point) -> Capture {
        let capture = self.gestures.pointer_up(&mut self.registry, position);
        self.persist();
        capture
    }

    pub fn cancel_gesture(&mut self) -> Capture { self.gestures.cancel() }

    pub fn wheel(&mut self, input: WheelInput) {
        self.gestures.wheel(&mut self.registry, input);
        self.persist();
    }

    pub fn drag_offset(&self) -> Option<(WindowId, Point)> { self.gestures.drag_offset() }

    // Render queries, delegated for convenience

    pub fn connectors(&self) -> Vec<Connector> { self.registry.connectors() }

    pub fn dock_entries(&self) -> Vec<DockEntry> { self.registry.dock_entries() }

    fn persist(&mut self) {
        // Persistence failures are logged, never surfaced: a desktop must
        // not fail a window interaction because storage hiccuped.
        if let Err(err) = persist::save(&mut self.store, &self.registry) {
            warn!(%err, "failed to persist desktop state");
        }
    }
}
