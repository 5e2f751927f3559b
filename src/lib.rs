//! State-management core for an infinite desktop: a pannable/zoomable 2D
//! canvas hosting floating windows. The crate owns the canvas transform, the
//! window registry with its stacking order, the gesture state machines that
//! mutate them, and the snapshot persistence boundary. Rendering is someone
//! else's job: everything here is plain data a renderer projects to pixels.

pub mod common;
pub mod desktop;
pub mod geometry;
pub mod gesture;
pub mod model;
pub mod persist;

pub use desktop::Desktop;
pub use geometry::{Point, Size};
pub use gesture::{Capture, GestureRouter, HitTarget, PointerButton, PointerInput, WheelInput};
pub use model::{
    CanvasTransform, ComponentKind, SpawnOptions, Window, WindowContent, WindowId, WindowRegistry,
    WindowUpdate,
};
pub use persist::{BlobStore, FileStore, MemoryStore, STORAGE_KEY};
