//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.protoscope/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProtoscopeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory exported JSON artifacts are written to.
    pub export_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_EXPORT_DIR: &str = ".";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_base_url: String,
    pub export_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.protoscope/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".protoscope").join("config.toml"))
}

/// Load config from `~/.protoscope/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ProtoscopeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ProtoscopeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ProtoscopeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ProtoscopeConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ProtoscopeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Protoscope Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# export_dir = "."                    # Where components_*.json files land

# [backend]
# base_url = "http://localhost:5000"  # Or set PROTOSCOPE_BACKEND_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_backend_url` and `cli_export_dir` are from CLI flags (None = not specified).
pub fn resolve(
    config: &ProtoscopeConfig,
    cli_backend_url: Option<&str>,
    cli_export_dir: Option<&str>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_base_url = cli_backend_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PROTOSCOPE_BACKEND_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string());

    // Export dir: CLI → env → config → default
    let export_dir = cli_export_dir
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PROTOSCOPE_EXPORT_DIR").ok())
        .or_else(|| config.general.export_dir.clone())
        .unwrap_or_else(|| DEFAULT_EXPORT_DIR.to_string());

    ResolvedConfig {
        backend_base_url,
        export_dir: PathBuf::from(export_dir),
    }
}
