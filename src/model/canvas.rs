use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

pub fn clamp_scale(scale: f64) -> f64 { scale.clamp(MIN_SCALE, MAX_SCALE) }

/// World-to-screen affine transform of the canvas: `screen = world * scale +
/// (x, y)`. Translation is unclamped (the canvas is conceptually infinite);
/// scale is clamped on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self { Self { x: 0.0, y: 0.0, scale: 1.0 } }
}

impl CanvasTransform {
    pub fn new(x: f64, y: f64, scale: f64) -> Self { Self { x, y, scale: clamp_scale(scale) } }

    pub fn set(&mut self, x: f64, y: f64, scale: f64) {
        self.x = x;
        self.y = y;
        self.scale = clamp_scale(scale);
    }

    pub fn reset(&mut self) { *self = Self::default(); }

    /// Re-establishes the scale invariant on state that bypassed `set`,
    /// e.g. a deserialized snapshot.
    pub fn clamp(&mut self) { self.scale = clamp_scale(self.scale); }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_clamps_scale_only() {
        let mut canvas = CanvasTransform::default();

        canvas.set(1e9, -1e9, 100.0);
        assert_eq!(canvas, CanvasTransform { x: 1e9, y: -1e9, scale: MAX_SCALE });

        canvas.set(0.0, 0.0, -3.0);
        assert_eq!(canvas.scale, MIN_SCALE);

        canvas.set(5.0, 6.0, 1.7);
        assert_eq!(canvas.scale, 1.7);
    }

    #[test]
    fn reset_restores_identity() {
        let mut canvas = CanvasTransform::new(40.0, -12.0, 3.0);
        canvas.reset();
        assert_eq!(canvas, CanvasTransform { x: 0.0, y: 0.0, scale: 1.0 });
    }
}
