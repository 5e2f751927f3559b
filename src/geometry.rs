//! Pure coordinate math. The canvas applies a single affine transform with
//! uniform scale and no rotation: `screen = world * scale + (x, y)`.

use serde::{Deserialize, Serialize};

use crate::model::canvas::{CanvasTransform, clamp_scale};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }
}

pub fn world_to_screen(world: Point, transform: &CanvasTransform) -> Point {
    Point::new(
        world.x * transform.scale + transform.x,
        world.y * transform.scale + transform.y,
    )
}

pub fn screen_to_world(screen: Point, transform: &CanvasTransform) -> Point {
    Point::new(
        (screen.x - transform.x) / transform.scale,
        (screen.y - transform.y) / transform.scale,
    )
}

/// Returns a transform at `new_scale` whose translation keeps the world point
/// currently under `pointer` mapped to the same screen position.
///
/// This must be exact, not approximate; any error shows up as the content
/// jumping under the cursor while zooming.
pub fn zoom_toward_point(
    transform: &CanvasTransform,
    pointer: Point,
    new_scale: f64,
) -> CanvasTransform {
    let new_scale = clamp_scale(new_scale);
    let world = screen_to_world(pointer, transform);
    CanvasTransform {
        x: pointer.x - world.x * new_scale,
        y: pointer.y - world.y * new_scale,
        scale: new_scale,
    }
}
