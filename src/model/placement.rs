//! Initial placement for newly spawned windows.
//!
//! Default placement centers the window on the current viewport (via the
//! inverse canvas transform) and adds a small random offset so repeated
//! spawns fan out instead of stacking exactly. Batch spawns use
//! [`radial_positions`] to distribute related windows on a circle around
//! their source.

use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::geometry::{self, Point, Size};
use crate::model::canvas::CanvasTransform;

/// Small xorshift32 generator for spawn jitter. Placement only needs "visibly
/// scattered", not statistical quality, and a seedable generator keeps
/// placement deterministic in tests.
#[derive(Debug, Clone)]
pub struct Jitter {
    state: u32,
}

impl Jitter {
    pub fn new(seed: u32) -> Self {
        // xorshift has a zero fixed point.
        Self { state: seed | 1 }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish value in `[0, bound)`.
    pub fn offset(&mut self, bound: f64) -> f64 {
        if bound <= 0.0 {
            return 0.0;
        }
        (self.next() % 10_000) as f64 / 10_000.0 * bound
    }
}

impl Default for Jitter {
    fn default() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0x9e37_79b9);
        Self::new(nanos)
    }
}

/// World position that centers a `size`-sized window on the viewport, plus
/// jitter in `[0, jitter_bound)` per axis.
pub fn centered_position(
    viewport: Size,
    canvas: &CanvasTransform,
    size: Size,
    jitter: &mut Jitter,
    jitter_bound: f64,
) -> Point {
    let screen_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    let world_center = geometry::screen_to_world(screen_center, canvas);
    Point::new(
        world_center.x - size.width / 2.0 + jitter.offset(jitter_bound),
        world_center.y - size.height / 2.0 + jitter.offset(jitter_bound),
    )
}

/// Evenly distributes `count` points on a circle of `radius` around `center`,
/// starting at angle 0 and proceeding clockwise in screen orientation.
pub fn radial_positions(center: Point, count: usize, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * TAU;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}
