//! TOML + environment configuration.
//!
//! Loaded once at startup and read-only thereafter. Defaults are merged
//! under the config file, which is merged under `INKHOLE_*` environment
//! variables, so a bare install works against a password-less appliance
//! on localhost with no file at all.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Runtime settings for one dashboard run.
#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Appliance host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Appliance API port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Appliance password; empty disables authentication entirely.
    #[serde(default)]
    pub password: String,

    /// Network interface reported on the panel's first line.
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Rotate the panel 180 degrees (display mounted upside down).
    #[serde(default)]
    pub rotate_display: bool,

    /// Display hardware variant identifier, passed to the renderer.
    #[serde(default = "default_variant")]
    pub display_variant: String,

    /// Request timeout in seconds for every API call.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Override for the session/fingerprint cache directory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            password: String::new(),
            interface: default_interface(),
            rotate_display: false,
            display_variant: default_variant(),
            timeout_secs: default_timeout(),
            cache_dir: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    80
}
fn default_interface() -> String {
    "wlan0".into()
}
fn default_variant() -> String {
    "epd2in13_v2".into()
}
fn default_timeout() -> u64 {
    10
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "inkhole", "inkhole").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("inkhole");
    p
}

/// Resolve the directory holding the session and fingerprint cache records.
pub fn cache_dir(settings: &Settings) -> PathBuf {
    if let Some(ref dir) = settings.cache_dir {
        return dir.clone();
    }
    ProjectDirs::from("com", "inkhole", "inkhole").map_or_else(
        || std::env::temp_dir().join("inkhole"),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

/// Load settings from defaults, the TOML file, and the environment.
pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("INKHOLE_"));

    let settings: Settings = figment.extract()?;

    if settings.host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "appliance host must not be empty".into(),
        });
    }

    Ok(settings)
}
