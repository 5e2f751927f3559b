pub mod canvas;
pub mod placement;
pub mod registry;
pub mod window;

pub use canvas::CanvasTransform;
pub use registry::{Connector, DockEntry, WindowRegistry};
pub use window::{
    ComponentKind, SpawnOptions, Window, WindowContent, WindowId, WindowUpdate,
};
