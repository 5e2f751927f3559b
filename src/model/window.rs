use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::geometry::{Point, Size};

pub const MIN_WIDTH: f64 = 300.0;
pub const MIN_HEIGHT: f64 = 200.0;

/// Stored z-index hint. Paint order is driven by the registry's stacking
/// list, not by this value.
pub const BASE_Z_INDEX: i32 = 10;

/// Stable identity of a window for its entire lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WindowId(Uuid);

impl WindowId {
    pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for WindowId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// The mini-applications a window body can host. `Placeholder` stands in for
/// anything unknown so a stale or foreign snapshot never fails to render.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Browser,
    Github,
    Terminal,
    DeepDive,
    Vault,
    Placeholder,
}

impl ComponentKind {
    /// Parses a component name, falling back to `Placeholder` instead of
    /// erroring on unknown names.
    pub fn parse(name: &str) -> Self { name.parse().unwrap_or(Self::Placeholder) }
}

/// Per-kind window payload. Each variant carries only the fields that kind
/// needs; the renderer matches exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowContent {
    Browser { url: String },
    Github,
    Terminal,
    DeepDive,
    Vault,
    Placeholder,
}

impl WindowContent {
    /// Empty payload for a kind, used by dock-style launchers that spawn by
    /// name.
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Browser => Self::Browser { url: String::new() },
            ComponentKind::Github => Self::Github,
            ComponentKind::Terminal => Self::Terminal,
            ComponentKind::DeepDive => Self::DeepDive,
            ComponentKind::Vault => Self::Vault,
            ComponentKind::Placeholder => Self::Placeholder,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Browser { .. } => ComponentKind::Browser,
            Self::Github => ComponentKind::Github,
            Self::Terminal => ComponentKind::Terminal,
            Self::DeepDive => ComponentKind::DeepDive,
            Self::Vault => ComponentKind::Vault,
            Self::Placeholder => ComponentKind::Placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    pub title: String,
    /// World-space top-left corner, independent of the canvas transform.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub z_index: i32,
    pub minimized: bool,
    pub maximized: bool,
    /// Non-owning back-reference used for connector lines. Dangles silently
    /// if the parent is closed.
    pub parent: Option<WindowId>,
    pub content: WindowContent,
}

impl Window {
    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, world: Point) -> bool {
        world.x >= self.x
            && world.x < self.x + self.width
            && world.y >= self.y
            && world.y < self.y + self.height
    }

    /// Re-applies the size floor. Used on every resize and on rehydration.
    pub fn clamp_size(&mut self) {
        self.width = self.width.max(MIN_WIDTH);
        self.height = self.height.max(MIN_HEIGHT);
    }
}

/// Partial update merged into a window record, mirroring what interactive
/// gestures and mini-applications are allowed to change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowUpdate {
    pub title: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub minimized: Option<bool>,
    pub maximized: Option<bool>,
}

impl WindowUpdate {
    pub fn position(position: Point) -> Self {
        Self { x: Some(position.x), y: Some(position.y), ..Default::default() }
    }

    pub fn size(size: Size) -> Self {
        Self { width: Some(size.width), height: Some(size.height), ..Default::default() }
    }

    pub fn minimized(minimized: bool) -> Self {
        Self { minimized: Some(minimized), ..Default::default() }
    }

    pub fn maximized(maximized: bool) -> Self {
        Self { maximized: Some(maximized), ..Default::default() }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    pub(crate) fn apply(self, window: &mut Window) {
        if let Some(title) = self.title {
            window.title = title;
        }
        if let Some(x) = self.x {
            window.x = x;
        }
        if let Some(y) = self.y {
            window.y = y;
        }
        if let Some(width) = self.width {
            window.width = width;
        }
        if let Some(height) = self.height {
            window.height = height;
        }
        if let Some(minimized) = self.minimized {
            window.minimized = minimized;
        }
        if let Some(maximized) = self.maximized {
            window.maximized = maximized;
        }
        window.clamp_size();
    }
}

/// Options for `open_window`. An explicit position suppresses the default
/// centered-with-jitter placement.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub parent: Option<WindowId>,
}

impl SpawnOptions {
    pub fn at(position: Point) -> Self { Self { position: Some(position), ..Default::default() } }

    pub fn sized(size: Size) -> Self { Self { size: Some(size), ..Default::default() } }

    pub fn with_parent(mut self, parent: WindowId) -> Self {
        self.parent = Some(parent);
        self
    }
}
