//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.aise/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::chat::CANNED_REPLY;
use crate::core::panel::{DEFAULT_BOTTOM_HEIGHT, DEFAULT_MIN_BOTTOM_HEIGHT, DEFAULT_MIN_TOP_HEIGHT};
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AiseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub reply_delay_ms: Option<u64>,
    pub reply_text: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub bottom_bar_height: Option<u16>,
    pub min_bottom_height: Option<u16>,
    pub min_top_height: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub theme: Theme,
    pub reply_delay: Duration,
    pub reply_text: String,
    pub bottom_bar_height: u16,
    pub min_bottom_height: u16,
    pub min_top_height: u16,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&AiseConfig::default(), &CliOverrides::default(), |_| None)
    }
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub theme: Option<Theme>,
    pub reply_delay_ms: Option<u64>,
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

/// Returns the path to `~/.aise/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".aise").join("config.toml"))
}

/// Load config from `explicit` or `~/.aise/config.toml`.
///
/// A missing default-location file is generated (commented out) and
/// `AiseConfig::default()` returned. A missing explicit path is an error.
/// A malformed file returns `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<AiseConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AiseConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(AiseConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<AiseConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AiseConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# aise configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "dark"                     # "dark" or "light" (env AISE_THEME)

# [chat]
# reply_delay_ms = 1000              # env AISE_REPLY_DELAY_MS
# reply_text = "I'm an AI assistant. How can I help you with your code?"

# [layout]
# bottom_bar_height = 10             # rows
# min_bottom_height = 5
# min_top_height = 8
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AiseConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |name| std::env::var(name).ok())
}

fn resolve_with(
    config: &AiseConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| {
            env("AISE_THEME").and_then(|name| {
                let parsed = Theme::from_name(&name);
                if parsed.is_none() {
                    warn!("Ignoring unknown AISE_THEME value: {}", name);
                }
                parsed
            })
        })
        .or(config.general.theme)
        .unwrap_or_default();

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| {
            env("AISE_REPLY_DELAY_MS").and_then(|raw| match raw.trim().parse() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("Ignoring AISE_REPLY_DELAY_MS={}: {}", raw, e);
                    None
                }
            })
        })
        .or(config.chat.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    let reply_text = config
        .chat
        .reply_text
        .clone()
        .unwrap_or_else(|| CANNED_REPLY.to_string());

    ResolvedConfig {
        theme,
        reply_delay: Duration::from_millis(reply_delay_ms),
        reply_text,
        bottom_bar_height: config
            .layout
            .bottom_bar_height
            .unwrap_or(DEFAULT_BOTTOM_HEIGHT),
        min_bottom_height: config
            .layout
            .min_bottom_height
            .unwrap_or(DEFAULT_MIN_BOTTOM_HEIGHT),
        min_top_height: config
            .layout
            .min_top_height
            .unwrap_or(DEFAULT_MIN_TOP_HEIGHT),
    }
}
