//! Pointer and wheel gesture controllers.
//!
//! A [`GestureRouter`] owns at most one live pointer gesture at a time.
//! Gestures are disambiguated once, at pointer-down, by hit target: the
//! background starts a canvas pan, a title bar starts a window drag, the
//! bottom-right handle starts a resize, and a window body only focuses.
//! Every pointer-down on a window focuses it before the sub-gesture runs.
//!
//! Pointer capture is the one resource that outlives a single event. The
//! router reports [`Capture::Acquire`] when a gesture begins and guarantees
//! a matching [`Capture::Release`] on every exit path, including `cancel`.

pub mod drag;
pub mod pan;
pub mod resize;
pub mod zoom;

use tracing::trace;

pub use drag::DragGesture;
pub use pan::PanGesture;
pub use resize::ResizeGesture;

use crate::common::config::Settings;
use crate::geometry::{self, Point};
use crate::model::WindowId;
use crate::model::registry::WindowRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    /// Screen-space pointer position.
    pub position: Point,
    pub button: PointerButton,
}

#[derive(Debug, Clone, Copy)]
pub struct WheelInput {
    pub position: Point,
    pub delta_x: f64,
    pub delta_y: f64,
    /// Ctrl/Cmd held: the wheel zooms instead of panning.
    pub zoom_modifier: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRegion {
    TitleBar,
    Body,
    ResizeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Background,
    Window { id: WindowId, region: WindowRegion },
}

/// Pointer-capture instruction for the embedding renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Acquire,
    Release,
    None,
}

/// Resolves a screen-space point against the registry. Regions are computed
/// in window-local units: a strip at the top is the title bar and a square at
/// the bottom-right corner is the resize handle, which wins where the two
/// overlap with the bar or body.
pub fn hit_test(registry: &WindowRegistry, screen: Point, settings: &Settings) -> HitTarget {
    let world = geometry::screen_to_world(screen, &registry.canvas());
    let hit = crate::common::log::trace_misc("hit_test", || registry.window_at(world));
    let Some(window) = hit.and_then(|id| registry.get(id)) else {
        return HitTarget::Background;
    };
    let id = window.id;

    let local = Point::new(world.x - window.x, world.y - window.y);
    let handle = settings.resize_handle_size;
    let region = if local.x >= window.width - handle && local.y >= window.height - handle {
        WindowRegion::ResizeHandle
    } else if local.y < settings.title_bar_height {
        WindowRegion::TitleBar
    } else {
        WindowRegion::Body
    };
    HitTarget::Window { id, region }
}

#[derive(Debug, Default)]
enum GestureState {
    #[default]
    Idle,
    Pan(PanGesture),
    Drag(DragGesture),
    Resize(ResizeGesture),
}

#[derive(Debug)]
pub struct GestureRouter {
    state: GestureState,
    zoom_sensitivity: f64,
}

impl Default for GestureRouter {
    fn default() -> Self { Self::new(&Settings::default()) }
}

impl GestureRouter {
    pub fn new(settings: &Settings) -> Self {
        Self { state: GestureState::Idle, zoom_sensitivity: settings.zoom_sensitivity }
    }

    pub fn is_idle(&self) -> bool { matches!(self.state, GestureState::Idle) }

    /// Live drag offset in world units, for renderers that draw the dragged
    /// window at its uncommitted position.
    pub fn drag_offset(&self) -> Option<(WindowId, Point)> {
        match &self.state {
            GestureState::Drag(drag) => Some((drag.window(), drag.offset())),
            _ => None,
        }
    }

    pub fn pointer_down(
        &mut self,
        registry: &mut WindowRegistry,
        hit: HitTarget,
        input: PointerInput,
    ) -> Capture {
        if !self.is_idle() {
            // A second button press while a gesture owns the pointer.
            trace!("ignoring pointer down during active gesture");
            return Capture::None;
        }

        match hit {
            HitTarget::Background => {
                if matches!(input.button, PointerButton::Primary | PointerButton::Middle) {
                    self.state = GestureState::Pan(PanGesture::begin(input.position));
                    Capture::Acquire
                } else {
                    Capture::None
                }
            }
            HitTarget::Window { id, region } => {
                // Focus-on-interact: promotion happens regardless of which
                // sub-gesture follows.
                registry.focus_window(id);

                if input.button != PointerButton::Primary {
                    return Capture::None;
                }
                match region {
                    WindowRegion::TitleBar => match DragGesture::begin(registry, id, input.position)
                    {
                        Some(drag) => {
                            self.state = GestureState::Drag(drag);
                            Capture::Acquire
                        }
                        None => Capture::None,
                    },
                    WindowRegion::ResizeHandle => {
                        match ResizeGesture::begin(registry, id, input.position) {
                            Some(resize) => {
                                self.state = GestureState::Resize(resize);
                                Capture::Acquire
                            }
                            None => Capture::None,
                        }
                    }
                    WindowRegion::Body => Capture::None,
                }
            }
        }
    }

    pub fn pointer_move(&mut self, registry: &mut WindowRegistry, position: Point) {
        match &mut self.state {
            GestureState::Idle => {}
            GestureState::Pan(pan) => pan.moved(registry, position),
            GestureState::Drag(drag) => drag.moved(registry, position),
            GestureState::Resize(resize) => resize.moved(registry, position),
        }
    }

    /// Ends the active gesture. A stray pointer-up with no live gesture must
    /// not mutate anything.
    pub fn pointer_up(&mut self, registry: &mut WindowRegistry, position: Point) -> Capture {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => Capture::None,
            GestureState::Pan(mut pan) => {
                pan.moved(registry, position);
                Capture::Release
            }
            GestureState::Drag(mut drag) => {
                drag.moved(registry, position);
                drag.commit(registry);
                Capture::Release
            }
            GestureState::Resize(mut resize) => {
                resize.moved(registry, position);
                Capture::Release
            }
        }
    }

    /// Aborts the active gesture (pointer left the capture, window hidden,
    /// ...). Pan keeps the deltas already applied, drag discards its
    /// uncommitted offset, resize keeps its last committed size.
    pub fn cancel(&mut self) -> Capture {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => Capture::None,
            _ => Capture::Release,
        }
    }

    /// Wheel input is single-shot: with the modifier it zooms toward the
    /// pointer, without it it pans 1:1.
    pub fn wheel(&mut self, registry: &mut WindowRegistry, input: WheelInput) {
        zoom::wheel(registry, input, self.zoom_sensitivity);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::window::{SpawnOptions, WindowContent};

    fn setup() -> (WindowRegistry, GestureRouter, WindowId) {
        let mut registry = WindowRegistry::new();
        registry.set_jitter_seed(1);
        let id = registry.open_window(
            WindowContent::Terminal,
            "Terminal",
            SpawnOptions::at(Point::new(100.0, 100.0)),
        );
        (registry, GestureRouter::default(), id)
    }

    fn primary(x: f64, y: f64) -> PointerInput {
        PointerInput { position: Point::new(x, y), button: PointerButton::Primary }
    }

    #[test]
    fn hit_test_resolves_regions() {
        let (registry, _, id) = setup();
        let settings = Settings::default();

        // Window is at world (100, 100), 600x400, identity transform.
        assert_eq!(
            hit_test(&registry, Point::new(150.0, 110.0), &settings),
            HitTarget::Window { id, region: WindowRegion::TitleBar },
        );
        assert_eq!(
            hit_test(&registry, Point::new(150.0, 300.0), &settings),
            HitTarget::Window { id, region: WindowRegion::Body },
        );
        assert_eq!(
            hit_test(&registry, Point::new(695.0, 495.0), &settings),
            HitTarget::Window { id, region: WindowRegion::ResizeHandle },
        );
        assert_eq!(hit_test(&registry, Point::new(50.0, 50.0), &settings), HitTarget::Background);
    }

    #[test]
    fn hit_test_honors_canvas_transform() {
        let (mut registry, _, id) = setup();
        let settings = Settings::default();
        registry.set_transform(-100.0, -100.0, 2.0);

        // World (100, 100) now sits at screen (100, 100); world (150, 110)
        // at screen (200, 120).
        assert_eq!(
            hit_test(&registry, Point::new(200.0, 120.0), &settings),
            HitTarget::Window { id, region: WindowRegion::TitleBar },
        );
    }

    #[test]
    fn pan_requires_background_and_applies_deltas() {
        let (mut registry, mut router, _) = setup();

        let capture =
            router.pointer_down(&mut registry, HitTarget::Background, primary(10.0, 10.0));
        assert_eq!(capture, Capture::Acquire);

        router.pointer_move(&mut registry, Point::new(25.0, 4.0));
        assert_eq!((registry.canvas().x, registry.canvas().y), (15.0, -6.0));

        router.pointer_move(&mut registry, Point::new(30.0, 4.0));
        assert_eq!((registry.canvas().x, registry.canvas().y), (20.0, -6.0));

        assert_eq!(router.pointer_up(&mut registry, Point::new(30.0, 4.0)), Capture::Release);
        assert!(router.is_idle());
    }

    #[test]
    fn stray_pointer_up_is_inert() {
        let (mut registry, mut router, _) = setup();
        let before = registry.canvas();
        assert_eq!(router.pointer_up(&mut registry, Point::new(500.0, 500.0)), Capture::None);
        assert_eq!(registry.canvas(), before);
    }

    #[test]
    fn pan_mid_gesture_survives_external_transform_changes() {
        let (mut registry, mut router, _) = setup();
        router.pointer_down(&mut registry, HitTarget::Background, primary(0.0, 0.0));
        router.pointer_move(&mut registry, Point::new(10.0, 0.0));

        // Deltas are incremental, so an external mutation is preserved.
        registry.set_transform(1000.0, 1000.0, 1.0);
        router.pointer_move(&mut registry, Point::new(20.0, 0.0));
        assert_eq!((registry.canvas().x, registry.canvas().y), (1010.0, 1000.0));
        router.pointer_up(&mut registry, Point::new(20.0, 0.0));
    }

    #[test]
    fn drag_commits_only_on_release() {
        let (mut registry, mut router, id) = setup();
        let hit = HitTarget::Window { id, region: WindowRegion::TitleBar };

        assert_eq!(router.pointer_down(&mut registry, hit, primary(150.0, 110.0)), Capture::Acquire);
        router.pointer_move(&mut registry, Point::new(250.0, 160.0));

        // Live offset is visible, the registry is not yet touched.
        assert_eq!(router.drag_offset(), Some((id, Point::new(100.0, 50.0))));
        let window = registry.get(id).unwrap();
        assert_eq!((window.x, window.y), (100.0, 100.0));

        assert_eq!(router.pointer_up(&mut registry, Point::new(250.0, 160.0)), Capture::Release);
        let window = registry.get(id).unwrap();
        assert_eq!((window.x, window.y), (200.0, 150.0));
    }

    #[test]
    fn drag_scales_screen_deltas_into_world_units() {
        let (mut registry, mut router, id) = setup();
        registry.set_transform(0.0, 0.0, 2.0);
        let hit = HitTarget::Window { id, region: WindowRegion::TitleBar };

        router.pointer_down(&mut registry, hit, primary(300.0, 220.0));
        router.pointer_up(&mut registry, Point::new(400.0, 220.0));

        // 100 screen px at scale 2 is 50 world units.
        assert_eq!(registry.get(id).unwrap().x, 150.0);
    }

    #[test]
    fn drag_focuses_window_at_start() {
        let (mut registry, mut router, first) = setup();
        let second = registry.open_window(
            WindowContent::Vault,
            "Vault",
            SpawnOptions::at(Point::new(900.0, 100.0)),
        );
        assert_eq!(registry.active_id(), Some(second));

        let hit = HitTarget::Window { id: first, region: WindowRegion::TitleBar };
        router.pointer_down(&mut registry, hit, primary(150.0, 110.0));
        assert_eq!(registry.active_id(), Some(first));
        assert_eq!(registry.order().last(), Some(&first));
        router.cancel();
    }

    #[test]
    fn body_click_focuses_without_gesture() {
        let (mut registry, mut router, first) = setup();
        let second = registry.open_window(
            WindowContent::Vault,
            "Vault",
            SpawnOptions::at(Point::new(900.0, 100.0)),
        );

        let hit = HitTarget::Window { id: first, region: WindowRegion::Body };
        let capture = router.pointer_down(&mut registry, hit, primary(200.0, 300.0));
        assert_eq!(capture, Capture::None);
        assert!(router.is_idle());
        assert_eq!(registry.active_id(), Some(first));
        let _ = second;
    }

    #[test]
    fn cancel_discards_uncommitted_drag() {
        let (mut registry, mut router, id) = setup();
        let hit = HitTarget::Window { id, region: WindowRegion::TitleBar };

        router.pointer_down(&mut registry, hit, primary(150.0, 110.0));
        router.pointer_move(&mut registry, Point::new(650.0, 610.0));
        assert_eq!(router.cancel(), Capture::Release);

        let window = registry.get(id).unwrap();
        assert_eq!((window.x, window.y), (100.0, 100.0));
        assert!(router.is_idle());
    }

    #[test]
    fn resize_commits_live_and_floors() {
        let (mut registry, mut router, id) = setup();
        let hit = HitTarget::Window { id, region: WindowRegion::ResizeHandle };

        router.pointer_down(&mut registry, hit, primary(700.0, 500.0));
        router.pointer_move(&mut registry, Point::new(750.0, 560.0));

        // Committed immediately, not deferred to release.
        let window = registry.get(id).unwrap();
        assert_eq!((window.width, window.height), (650.0, 460.0));

        router.pointer_move(&mut registry, Point::new(0.0, 0.0));
        let window = registry.get(id).unwrap();
        assert_eq!((window.width, window.height), (300.0, 200.0));

        assert_eq!(router.pointer_up(&mut registry, Point::new(0.0, 0.0)), Capture::Release);
    }

    #[test]
    fn gestures_are_mutually_exclusive() {
        let (mut registry, mut router, id) = setup();
        let hit = HitTarget::Window { id, region: WindowRegion::ResizeHandle };
        router.pointer_down(&mut registry, hit, primary(700.0, 500.0));

        // A pan cannot start while the resize owns the pointer.
        let capture =
            router.pointer_down(&mut registry, HitTarget::Background, primary(0.0, 0.0));
        assert_eq!(capture, Capture::None);
        let before = registry.canvas();
        router.pointer_move(&mut registry, Point::new(710.0, 510.0));
        assert_eq!(registry.canvas(), before, "resize must not pan the canvas");
        router.pointer_up(&mut registry, Point::new(710.0, 510.0));
    }

    #[test]
    fn wheel_zoom_and_wheel_pan() {
        let (mut registry, mut router, _) = setup();
        registry.set_transform(100.0, 50.0, 1.0);

        router.wheel(&mut registry, WheelInput {
            position: Point::new(400.0, 300.0),
            delta_x: 0.0,
            delta_y: -1000.0,
            zoom_modifier: true,
        });
        let canvas = registry.canvas();
        assert_eq!(canvas.scale, 2.0);
        assert_eq!((canvas.x, canvas.y), (-200.0, -200.0));

        // Without the modifier the wheel pans 1:1, scale untouched.
        router.wheel(&mut registry, WheelInput {
            position: Point::new(400.0, 300.0),
            delta_x: 30.0,
            delta_y: -20.0,
            zoom_modifier: false,
        });
        let canvas = registry.canvas();
        assert_eq!(canvas.scale, 2.0);
        assert_eq!((canvas.x, canvas.y), (-230.0, -180.0));
    }
}
