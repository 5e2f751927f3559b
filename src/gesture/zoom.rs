//! Wheel handling: modifier-zoom anchored at the pointer, otherwise a 1:1
//! trackpad-style pan. Single-shot, no gesture state to carry between events.

use crate::geometry;
use crate::gesture::WheelInput;
use crate::model::canvas::clamp_scale;
use crate::model::registry::WindowRegistry;

pub fn wheel(registry: &mut WindowRegistry, input: WheelInput, sensitivity: f64) {
    let canvas = registry.canvas();
    if input.zoom_modifier {
        let new_scale = clamp_scale(canvas.scale - input.delta_y * sensitivity);
        let zoomed = geometry::zoom_toward_point(&canvas, input.position, new_scale);
        registry.set_transform(zoomed.x, zoomed.y, zoomed.scale);
    } else {
        registry.set_transform(canvas.x - input.delta_x, canvas.y - input.delta_y, canvas.scale);
    }
}
