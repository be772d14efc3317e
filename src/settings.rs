use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EditorError, EditorResult};
use crate::queue::DEFAULT_HISTORY_LIMIT;
use crate::space::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last file saved or opened.
    pub file_path: Option<String>,
    /// Grid spacing; also the offset added to every vertex on load.
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    pub show_bounds: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_path: None,
            grid_size: 30.0,
            snap_to_grid: false,
            show_grid: true,
            show_bounds: false,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// `~/.config/shapescape.toml` if present, else `./settings.toml` if present.
pub fn config_path() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join("shapescape.toml");
        if path.exists() {
            return Some(path);
        }
    }
    let local = Path::new("settings.toml");
    local.exists().then(|| local.to_path_buf())
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

pub fn parse_settings(s: &str, prefer_toml: bool) -> Option<Settings> {
    if prefer_toml {
        toml::from_str::<Settings>(s)
            .ok()
            .or_else(|| serde_json::from_str::<Settings>(s).ok())
    } else {
        serde_json::from_str::<Settings>(s)
            .ok()
            .or_else(|| toml::from_str::<Settings>(s).ok())
    }
}

pub fn load_settings(path: &Path) -> Option<Settings> {
    let s = std::fs::read_to_string(path).ok()?;
    let settings = parse_settings(&s, is_toml(path));
    if settings.is_none() {
        tracing::warn!(path = %path.display(), "unreadable settings, using defaults");
    }
    settings
}

pub fn save_settings(path: &Path, settings: &Settings) -> EditorResult<()> {
    let text = if is_toml(path) {
        toml::to_string_pretty(settings).map_err(|e| EditorError::Settings(e.to_string()))?
    } else {
        serde_json::to_string_pretty(settings).map_err(|e| EditorError::Settings(e.to_string()))?
    };
    std::fs::write(path, text)?;
    Ok(())
}
