use tracing::trace;

use crate::geometry::Point;
use crate::model::WindowId;
use crate::model::registry::WindowRegistry;
use crate::model::window::WindowUpdate;

/// Title-bar window drag.
///
/// The offset accumulates as live visual state and is committed to the
/// registry only on release, so a renderer can move the window every frame
/// without writing through the store. Screen deltas are divided by the
/// canvas scale: window positions live in world space.
#[derive(Debug)]
pub struct DragGesture {
    window: WindowId,
    origin: Point,
    start: Point,
    offset: Point,
}

impl DragGesture {
    /// Returns `None` if the window vanished between hit-test and gesture
    /// start.
    pub fn begin(registry: &WindowRegistry, id: WindowId, pointer: Point) -> Option<Self> {
        let window = registry.get(id)?;
        Some(Self {
            window: id,
            origin: Point::new(window.x, window.y),
            start: pointer,
            offset: Point::default(),
        })
    }

    pub fn window(&self) -> WindowId { self.window }

    /// Accumulated offset in world units.
    pub fn offset(&self) -> Point { self.offset }

    pub fn moved(&mut self, registry: &WindowRegistry, pointer: Point) {
        let scale = registry.canvas().scale;
        self.offset =
            Point::new((pointer.x - self.start.x) / scale, (pointer.y - self.start.y) / scale);
    }

    /// Commits `origin + offset`. Dropping the gesture without calling this
    /// discards the offset (cancel semantics).
    pub fn commit(self, registry: &mut WindowRegistry) {
        let position = Point::new(self.origin.x + self.offset.x, self.origin.y + self.offset.y);
        trace!(window = %self.window, x = position.x, y = position.y, "drag committed");
        registry.update_window(self.window, WindowUpdate::position(position));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::window::{SpawnOptions, WindowContent};

    fn registry_with_window() -> (WindowRegistry, WindowId) {
        let mut registry = WindowRegistry::new();
        let id = registry.open_window(
            WindowContent::Terminal,
            "t",
            SpawnOptions::at(Point::new(10.0, 20.0)),
        );
        (registry, id)
    }

    #[test]
    fn begin_fails_for_unknown_window() {
        let (registry, _) = registry_with_window();
        assert!(DragGesture::begin(&registry, WindowId::new(), Point::default()).is_none());
    }

    #[test]
    fn offset_tracks_total_not_incremental_motion() {
        let (registry, id) = registry_with_window();
        let mut drag = DragGesture::begin(&registry, id, Point::new(100.0, 100.0)).unwrap();

        drag.moved(&registry, Point::new(160.0, 100.0));
        drag.moved(&registry, Point::new(130.0, 70.0));
        assert_eq!(drag.offset(), Point::new(30.0, -30.0));
    }

    #[test]
    fn commit_applies_origin_plus_offset() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragGesture::begin(&registry, id, Point::new(0.0, 0.0)).unwrap();
        drag.moved(&registry, Point::new(15.0, -5.0));
        drag.commit(&mut registry);

        let window = registry.get(id).unwrap();
        assert_eq!((window.x, window.y), (25.0, 15.0));
    }

    #[test]
    fn commit_on_a_closed_window_is_silent() {
        let (mut registry, id) = registry_with_window();
        let mut drag = DragGesture::begin(&registry, id, Point::new(0.0, 0.0)).unwrap();
        drag.moved(&registry, Point::new(50.0, 50.0));

        registry.close_window(id);
        drag.commit(&mut registry);
        assert!(registry.is_empty());
    }
}
