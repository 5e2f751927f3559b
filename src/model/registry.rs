//! The window entity store: the single source of truth for every window's
//! geometry and lifecycle, the stacking order, and the canvas transform.
//!
//! Stacking truth is `order`: iteration order is paint order, last entry is
//! topmost. Operations on unknown ids are silent no-ops, since ids routinely
//! go stale across async boundaries (a terminal callback may outlive its
//! window).

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::collections::{HashMap, HashSet};
use crate::common::config::Settings;
use crate::geometry::{Point, Size};
use crate::model::canvas::CanvasTransform;
use crate::model::placement::{self, Jitter};
use crate::model::window::{
    BASE_Z_INDEX, ComponentKind, SpawnOptions, Window, WindowContent, WindowId, WindowUpdate,
};

/// Viewport fallback used before the renderer reports a real size.
const DEFAULT_VIEWPORT: Size = Size::new(1024.0, 768.0);

#[derive(Debug)]
pub struct WindowRegistry {
    windows: HashMap<WindowId, Window>,
    order: Vec<WindowId>,
    active: Option<WindowId>,
    canvas: CanvasTransform,
    viewport: Size,
    jitter: Jitter,
    default_size: Size,
    jitter_bound: f64,
}

/// One connector-line segment between a child window and its parent, in
/// world-space centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub parent: WindowId,
    pub child: WindowId,
    pub from: Point,
    pub to: Point,
}

/// Stacking-ordered listing for dock-style window switchers.
#[derive(Debug, Clone, PartialEq)]
pub struct DockEntry {
    pub id: WindowId,
    pub title: String,
    pub kind: ComponentKind,
    pub minimized: bool,
}

/// Serialized form of the whole registry. The durable unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub canvas: CanvasTransform,
    pub windows: HashMap<WindowId, Window>,
    pub order: Vec<WindowId>,
    pub active: Option<WindowId>,
}

impl Default for WindowRegistry {
    fn default() -> Self { Self::new() }
}

impl WindowRegistry {
    pub fn new() -> Self { Self::with_settings(&Settings::default()) }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            windows: HashMap::default(),
            order: Vec::new(),
            active: None,
            canvas: CanvasTransform::default(),
            viewport: DEFAULT_VIEWPORT,
            jitter: Jitter::default(),
            default_size: settings.default_window_size(),
            jitter_bound: settings.spawn_jitter,
        }
    }

    /// Fixes the jitter sequence. Placement becomes deterministic, which
    /// tests rely on.
    pub fn set_jitter_seed(&mut self, seed: u32) { self.jitter = Jitter::new(seed); }

    /// The renderer reports viewport size changes here; default spawn
    /// placement centers on it.
    pub fn set_viewport(&mut self, viewport: Size) { self.viewport = viewport; }

    // Canvas transform

    pub fn canvas(&self) -> CanvasTransform { self.canvas }

    pub fn set_transform(&mut self, x: f64, y: f64, scale: f64) { self.canvas.set(x, y, scale); }

    pub fn reset_canvas(&mut self) { self.canvas.reset(); }

    // Lifecycle

    /// Creates a window, places it, appends it to the stacking order, and
    /// makes it active. Returns the new id so callers can chain further
    /// actions (batch spawns link children back to it).
    pub fn open_window(
        &mut self,
        content: WindowContent,
        title: impl Into<String>,
        options: SpawnOptions,
    ) -> WindowId {
        let id = WindowId::new();
        let title = title.into();

        let mut size = options.size.unwrap_or(self.default_size);
        size.width = size.width.max(crate::model::window::MIN_WIDTH);
        size.height = size.height.max(crate::model::window::MIN_HEIGHT);

        let position = match options.position {
            Some(p) => p,
            None => placement::centered_position(
                self.viewport,
                &self.canvas,
                size,
                &mut self.jitter,
                self.jitter_bound,
            ),
        };

        debug!(%id, kind = %content.kind(), x = position.x, y = position.y, "opening window");

        let window = Window {
            id,
            title,
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            z_index: BASE_Z_INDEX,
            minimized: false,
            maximized: false,
            parent: options.parent,
            content,
        };

        self.windows.insert(id, window);
        self.order.push(id);
        self.active = Some(id);
        id
    }

    /// Idempotent: closing an id that is absent (or already closed) does
    /// nothing.
    pub fn close_window(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_none() {
            trace!(%id, "close for unknown window ignored");
            return;
        }
        self.order.retain(|w| *w != id);
        if self.active == Some(id) {
            self.active = None;
        }
        debug!(%id, remaining = self.windows.len(), "closed window");
    }

    /// Promotes the window to the top of the stacking order and marks it
    /// active. No-op on unknown ids; a no-op on order when already topmost.
    pub fn focus_window(&mut self, id: WindowId) {
        if !self.windows.contains_key(&id) {
            trace!(%id, "focus for unknown window ignored");
            return;
        }
        if self.order.last() != Some(&id) {
            self.order.retain(|w| *w != id);
            self.order.push(id);
        }
        self.active = Some(id);
    }

    /// Merges a partial update into the window record. Silent no-op on
    /// unknown ids.
    pub fn update_window(&mut self, id: WindowId, update: WindowUpdate) {
        match self.windows.get_mut(&id) {
            Some(window) => update.apply(window),
            None => trace!(%id, "update for unknown window ignored"),
        }
    }

    // Queries

    pub fn get(&self, id: WindowId) -> Option<&Window> { self.windows.get(&id) }

    pub fn active_id(&self) -> Option<WindowId> { self.active }

    pub fn active_window(&self) -> Option<&Window> {
        self.active.and_then(|id| self.windows.get(&id))
    }

    pub fn len(&self) -> usize { self.windows.len() }

    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn order(&self) -> &[WindowId] { &self.order }

    /// Windows in paint order, back to front.
    pub fn windows(&self) -> impl Iterator<Item = &Window> + '_ {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    /// Topmost non-minimized window under a world-space point. Minimized
    /// windows are excluded from hit-testing.
    pub fn window_at(&self, world: Point) -> Option<WindowId> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.windows.get(id))
            .find(|w| !w.minimized && w.contains(world))
            .map(|w| w.id)
    }

    /// Connector segments for windows whose parent link resolves and where
    /// neither end is minimized. Dangling links are skipped, not errors.
    pub fn connectors(&self) -> Vec<Connector> {
        self.windows
            .values()
            .filter(|w| !w.minimized)
            .filter_map(|child| {
                let parent = self.windows.get(&child.parent?)?;
                if parent.minimized {
                    return None;
                }
                Some(Connector {
                    parent: parent.id,
                    child: child.id,
                    from: parent.center(),
                    to: child.center(),
                })
            })
            .collect()
    }

    /// Stacking-ordered listing for a dock or window switcher.
    pub fn dock_entries(&self) -> Vec<DockEntry> {
        self.windows()
            .map(|w| DockEntry {
                id: w.id,
                title: w.title.clone(),
                kind: w.content.kind(),
                minimized: w.minimized,
            })
            .collect()
    }

    // Persistence

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            canvas: self.canvas,
            windows: self.windows.clone(),
            order: self.order.clone(),
            active: self.active,
        }
    }

    /// Rebuilds a registry from a snapshot, re-establishing every invariant
    /// the snapshot may have lost: order entries without a backing window are
    /// dropped, duplicates collapse to their topmost occurrence, windows
    /// missing from the order are appended, a stale active id is cleared,
    /// and scale/size clamps are re-applied.
    pub fn from_snapshot(snapshot: Snapshot, settings: &Settings) -> Self {
        let mut registry = Self {
            windows: snapshot.windows,
            order: snapshot.order,
            active: snapshot.active,
            canvas: snapshot.canvas,
            viewport: DEFAULT_VIEWPORT,
            jitter: Jitter::default(),
            default_size: settings.default_window_size(),
            jitter_bound: settings.spawn_jitter,
        };
        registry.reconcile();
        registry
    }

    fn reconcile(&mut self) {
        let before = self.order.len();

        // Keep the last occurrence of each id so the topmost position wins.
        let mut seen: HashSet<WindowId> = HashSet::default();
        let windows = &self.windows;
        let mut kept: Vec<WindowId> = self
            .order
            .iter()
            .rev()
            .filter(|id| windows.contains_key(*id) && seen.insert(**id))
            .copied()
            .collect();
        kept.reverse();
        self.order = kept;

        if self.order.len() != before {
            debug!(dropped = before - self.order.len(), "reconciled stale stacking entries");
        }

        // Windows that lost their order entry still need to paint somewhere;
        // append them in a deterministic order.
        if self.order.len() < self.windows.len() {
            let mut orphans: Vec<WindowId> = self
                .windows
                .keys()
                .filter(|id| !self.order.contains(*id))
                .copied()
                .collect();
            orphans.sort();
            debug!(appended = orphans.len(), "re-appending windows missing from order");
            self.order.extend(orphans);
        }

        if let Some(active) = self.active
            && !self.windows.contains_key(&active)
        {
            self.active = None;
        }

        self.canvas.clamp();
        for window in self.windows.values_mut() {
            window.clamp_size();
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut seen = HashSet::default();
        for id in &self.order {
            assert!(self.windows.contains_key(id), "order references missing window {id}");
            assert!(seen.insert(*id), "duplicate order entry {id}");
        }
        assert_eq!(self.order.len(), self.windows.len(), "order is not a permutation");
        if let Some(active) = self.active {
            assert!(self.windows.contains_key(&active), "active id {active} is stale");
        }
    }
}
