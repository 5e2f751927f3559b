use crate::geometry::Point;
use crate::model::registry::WindowRegistry;

/// Drag-to-pan on the canvas background.
///
/// Each move applies the screen delta since the previous event, so the
/// gesture composes with any other transform mutation happening mid-gesture
/// (wheel pan, programmatic reset).
#[derive(Debug)]
pub struct PanGesture {
    last: Point,
}

impl PanGesture {
    pub fn begin(position: Point) -> Self { Self { last: position } }

    pub fn moved(&mut self, registry: &mut WindowRegistry, position: Point) {
        let dx = position.x - self.last.x;
        let dy = position.y - self.last.y;
        self.last = position;

        let canvas = registry.canvas();
        registry.set_transform(canvas.x + dx, canvas.y + dy, canvas.scale);
    }
}
