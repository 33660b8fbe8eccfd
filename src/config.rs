use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{ConfigError, Result};
use crate::view_state::ViewMode;

/// Persisted view preferences. Positions are stored as 0..100 percentages
/// of the scrollable range so they survive viewport changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub mode: ViewMode,
    pub integer: bool,
    pub aspect: f64,
    pub max_crop: f64,
    pub zoom: f64,
    pub rel_x: f64,
    pub rel_y: f64,
    pub scroll_speed: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            mode: ViewMode::Fit,
            integer: false,
            aspect: 1.0,
            max_crop: 0.0,
            zoom: 1.0,
            rel_x: 50.0,
            rel_y: 50.0,
            scroll_speed: 4.0,
        }
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

impl ViewSettings {
    /// Copy with every value pulled into the range the engine accepts.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            mode: self.mode,
            integer: self.integer,
            aspect: clamp_or(self.aspect, 0.01, 100.0, defaults.aspect),
            max_crop: clamp_or(self.max_crop, 0.0, 0.5, defaults.max_crop),
            zoom: clamp_or(self.zoom, 1e-6, 1e6, defaults.zoom),
            rel_x: clamp_or(self.rel_x, 0.0, 100.0, defaults.rel_x),
            rel_y: clamp_or(self.rel_y, 0.0, 100.0, defaults.rel_y),
            scroll_speed: clamp_or(self.scroll_speed, 1.0, 1000.0, defaults.scroll_speed),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_pos: Option<[f32; 2]>,
    pub window_size: Option<[f32; 2]>,
    pub view: ViewSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_pos: None,
            window_size: Some([1024.0, 768.0]),
            view: ViewSettings::default(),
        }
    }
}

impl AppConfig {
    fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("com", "pixel_viewer", "pixel_viewer").ok_or(ConfigError::NoConfigDir)?;
        let config_dir = proj_dirs.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }
        Ok(config_dir.join("config.json"))
    }

    /// Loads the user config, falling back to defaults on any problem.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!("could not load config, using defaults: {err}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.view = config.view.sanitized();
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self) {
        if let Err(err) = Self::config_path().and_then(|path| self.save_to(&path)) {
            warn!("saving config failed: {err}");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
