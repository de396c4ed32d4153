//! Configuration loading for the curve editor binary.
//!
//! The segmentation, tracking, and cache crates never require a config file
//! of their own — every knob they expose is a plain constructor argument.
//! This crate exists purely so the binary has somewhere to source
//! `Cache::new`'s `max_size` and the preloader's window size from, the way
//! every complete instance of this stack carries a config layer even when
//! the core logic underneath doesn't ask for one.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use tracing::info;

/// Parsed `[cache]` section of `curve-editor.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_max_cache_size")]
    pub max_cache_size: usize,
    #[serde(default = "CacheConfig::default_preload_window")]
    pub preload_window: usize,
    #[serde(default)]
    pub image_directory: Option<PathBuf>,
}

impl CacheConfig {
    const fn default_max_cache_size() -> usize {
        64
    }

    const fn default_preload_window() -> usize {
        12
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cache_size: Self::default_max_cache_size(),
            preload_window: Self::default_preload_window(),
            image_directory: None,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
}

/// Prefers a `curve-editor.toml` in the working directory, falling back to
/// the platform config directory (mirrors `core_config::discover`).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("curve-editor.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("curve-editor").join("curve-editor.toml");
    }
    PathBuf::from("curve-editor.toml")
}

/// Loads `path` (or the discovered default) if present; a missing file or a
/// parse error both fall back to `Config::default()` rather than failing
/// the caller — the same resilience policy `core_config::load_from` uses.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "curve_config", path = %path.display(), "loaded config");
            Ok(Config { file })
        }
        Err(err) => {
            tracing::warn!(target: "curve_config", path = %path.display(), %err, "config parse error, using defaults");
            Ok(Config::default())
        }
    }
}
