use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::model::canvas::{MAX_SCALE, MIN_SCALE};
use crate::model::window::{MIN_HEIGHT, MIN_WIDTH};

pub fn data_dir() -> PathBuf { dirs::home_dir().unwrap().join(".mural") }
pub fn config_file() -> PathBuf { dirs::home_dir().unwrap().join(".mural.toml") }

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Scale change per unit of wheel delta when the zoom modifier is held.
    #[serde(default = "default_zoom_sensitivity")]
    pub zoom_sensitivity: f64,
    /// Initial size for windows that do not request one.
    #[serde(default = "default_window_width")]
    pub default_window_width: f64,
    #[serde(default = "default_window_height")]
    pub default_window_height: f64,
    /// Upper bound, in world units per axis, of the random offset applied to
    /// default spawn placement so repeated spawns fan out.
    #[serde(default = "default_spawn_jitter")]
    pub spawn_jitter: f64,
    /// Radius of the circle used when a batch of related windows is spawned
    /// around a source window.
    #[serde(default = "default_ring_radius")]
    pub ring_radius: f64,
    /// Height of the draggable title-bar strip, in window-local units.
    #[serde(default = "default_title_bar_height")]
    pub title_bar_height: f64,
    /// Edge length of the square resize handle at the bottom-right corner.
    #[serde(default = "default_resize_handle_size")]
    pub resize_handle_size: f64,
}

fn default_zoom_sensitivity() -> f64 { 0.001 }
fn default_window_width() -> f64 { 600.0 }
fn default_window_height() -> f64 { 400.0 }
fn default_spawn_jitter() -> f64 { 50.0 }
fn default_ring_radius() -> f64 { 500.0 }
fn default_title_bar_height() -> f64 { 40.0 }
fn default_resize_handle_size() -> f64 { 24.0 }

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom_sensitivity: default_zoom_sensitivity(),
            default_window_width: default_window_width(),
            default_window_height: default_window_height(),
            spawn_jitter: default_spawn_jitter(),
            ring_radius: default_ring_radius(),
            title_bar_height: default_title_bar_height(),
            resize_handle_size: default_resize_handle_size(),
        }
    }
}

impl Settings {
    pub fn default_window_size(&self) -> Size {
        Size::new(self.default_window_width, self.default_window_height)
    }

    /// Validates the settings and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.zoom_sensitivity <= 0.0 {
            issues.push("zoom_sensitivity must be positive".to_string());
        }
        if self.zoom_sensitivity > (MAX_SCALE - MIN_SCALE) / 100.0 {
            issues.push(format!(
                "zoom_sensitivity {} traverses the whole scale range in a few wheel ticks",
                self.zoom_sensitivity
            ));
        }
        if self.default_window_width < MIN_WIDTH {
            issues.push(format!("default_window_width must be at least {MIN_WIDTH}"));
        }
        if self.default_window_height < MIN_HEIGHT {
            issues.push(format!("default_window_height must be at least {MIN_HEIGHT}"));
        }
        if self.spawn_jitter < 0.0 {
            issues.push("spawn_jitter must not be negative".to_string());
        }
        if self.ring_radius <= 0.0 {
            issues.push("ring_radius must be positive".to_string());
        }
        if self.title_bar_height <= 0.0 {
            issues.push("title_bar_height must be positive".to_string());
        }
        if self.resize_handle_size <= 0.0 {
            issues.push("resize_handle_size must be positive".to_string());
        }

        issues
    }

    /// Attempts to fix out-of-range values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;
        let defaults = Settings::default();

        if self.zoom_sensitivity <= 0.0 {
            self.zoom_sensitivity = defaults.zoom_sensitivity;
            fixes += 1;
        }
        if self.default_window_width < MIN_WIDTH {
            self.default_window_width = defaults.default_window_width;
            fixes += 1;
        }
        if self.default_window_height < MIN_HEIGHT {
            self.default_window_height = defaults.default_window_height;
            fixes += 1;
        }
        if self.spawn_jitter < 0.0 {
            self.spawn_jitter = defaults.spawn_jitter;
            fixes += 1;
        }
        if self.ring_radius <= 0.0 {
            self.ring_radius = defaults.ring_radius;
            fixes += 1;
        }
        if self.title_bar_height <= 0.0 {
            self.title_bar_height = defaults.title_bar_height;
            fixes += 1;
        }
        if self.resize_handle_size <= 0.0 {
            self.resize_handle_size = defaults.resize_handle_size;
            fixes += 1;
        }

        fixes
    }
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(buf)?;
        Ok(config)
    }

    pub fn default_config() -> Config {
        Self::parse(include_str!("../../mural.default.toml")).unwrap()
    }

    /// Save the current config to a file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }
}
