use crate::geometry::{Point, Size};
use crate::model::WindowId;
use crate::model::registry::WindowRegistry;
use crate::model::window::{MIN_HEIGHT, MIN_WIDTH, WindowUpdate};

/// Bottom-right-handle resize.
///
/// Unlike drag, every move commits immediately: resize is visually live.
/// Deltas are measured from the gesture start so the floor does not
/// accumulate error when the pointer crosses it and comes back.
#[derive(Debug)]
pub struct ResizeGesture {
    window: WindowId,
    start: Point,
    start_size: Size,
}

impl ResizeGesture {
    pub fn begin(registry: &WindowRegistry, id: WindowId, pointer: Point) -> Option<Self> {
        let window = registry.get(id)?;
        Some(Self { window: id, start: pointer, start_size: window.size() })
    }

    pub fn window(&self) -> WindowId { self.window }

    pub fn moved(&mut self, registry: &mut WindowRegistry, pointer: Point) {
        let scale = registry.canvas().scale;
        let width = MIN_WIDTH.max(self.start_size.width + (pointer.x - self.start.x) / scale);
        let height = MIN_HEIGHT.max(self.start_size.height + (pointer.y - self.start.y) / scale);
        registry.update_window(self.window, WindowUpdate::size(Size::new(width, height)));
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
            SpawnOptions::at(Point::new(0.0, 0.0)),
        );
        (registry, id)
    }

    #[test]
    fn grows_and_shrinks_from_start_size() {
        let (mut registry, id) = registry_with_window();
        let mut resize = ResizeGesture::begin(&registry, id, Point::new(600.0, 400.0)).unwrap();

        resize.moved(&mut registry, Point::new(700.0, 450.0));
        let w = registry.get(id).unwrap();
        assert_eq!((w.width, w.height), (700.0, 450.0));

        resize.moved(&mut registry, Point::new(550.0, 380.0));
        let w = registry.get(id).unwrap();
        assert_eq!((w.width, w.height), (550.0, 380.0));
    }

    #[test]
    fn floor_does_not_accumulate_error() {
        let (mut registry, id) = registry_with_window();
        let mut resize = ResizeGesture::begin(&registry, id, Point::new(0.0, 0.0)).unwrap();

        // Deep under the floor, then back out: size must track the pointer
        // again as soon as the total delta re-crosses the minimum.
        resize.moved(&mut registry, Point::new(-2000.0, -2000.0));
        let w = registry.get(id).unwrap();
        assert_eq!((w.width, w.height), (MIN_WIDTH, MIN_HEIGHT));

        resize.moved(&mut registry, Point::new(-100.0, -100.0));
        let w = registry.get(id).unwrap();
        assert_eq!((w.width, w.height), (500.0, 300.0));
    }

    #[test]
    fn converts_screen_deltas_at_current_scale() {
        let (mut registry, id) = registry_with_window();
        registry.set_transform(0.0, 0.0, 0.5);
        let mut resize = ResizeGesture::begin(&registry, id, Point::new(300.0, 200.0)).unwrap();

        // 50 screen px at scale 0.5 is 100 world units.
        resize.moved(&mut registry, Point::new(350.0, 200.0));
        let w = registry.get(id).unwrap();
        assert_eq!((w.width, w.height), (700.0, 400.0));
    }

    #[test]
    fn resize_on_closed_window_is_silent() {
        let (mut registry, id) = registry_with_window();
        let mut resize = ResizeGesture::begin(&registry, id, Point::new(0.0, 0.0)).unwrap();
        registry.close_window(id);
        resize.moved(&mut registry, Point::new(100.0, 100.0));
        assert!(registry.is_empty());
    }
}
