//! TOML Configuration File Support
//!
//! Configuration for the quote widget, read from
//! `~/.config/quotes/quotes.toml` when present.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [selection]
//! fade_delay_ms = 500
//! request_policy = "restart"
//! seed = 42
//! catalog = "quotes.toml"   # relative to this file
//!
//! [fade]
//! duration_ms = 500
//! easing = "ease-in-out"
//!
//! [palette]
//! colors = ["#ffadad", "#caffbf", "#a0c4ff"]
//! ```
//!
//! # Environment Variables
//!
//! | Variable                  | Meaning                         |
//! |---------------------------|---------------------------------|
//! | `QUOTES_FADE_DELAY_MS`    | delay before the pick           |
//! | `QUOTES_FADE_DURATION_MS` | length of the opacity fade      |
//! | `QUOTES_REQUEST_POLICY`   | `ignore` or `restart`           |
//! | `QUOTES_SEED`             | seed for reproducible rotations |
//! | `QUOTES_CATALOG`          | path to a catalog file          |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::{AccentColor, Palette};
use crate::quote::{Catalog, CatalogError};
use crate::transition::{Easing, RequestPolicy, DEFAULT_FADE_DELAY};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Selection section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionToml {
    /// Delay between hiding a quote and picking the next one
    pub fade_delay_ms: Option<u64>,

    /// What a request does while a pick is pending
    pub request_policy: Option<RequestPolicy>,

    /// Seed for reproducible rotations
    pub seed: Option<u64>,

    /// Catalog file, relative paths resolve against the config file
    pub catalog: Option<PathBuf>,
}

/// Fade section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeToml {
    /// Length of the opacity fade
    pub duration_ms: Option<u64>,

    /// Fade curve
    pub easing: Option<Easing>,
}

/// Palette section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteToml {
    /// Accent colors as `#rrggbb`
    pub colors: Option<Vec<AccentColor>>,
}

/// Root TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotesToml {
    pub selection: SelectionToml,
    pub fade: FadeToml,
    pub palette: PaletteToml,
}

// =============================================================================
// Unified Configuration
// =============================================================================

/// Effective configuration after merging all sources
#[derive(Clone, Debug)]
pub struct QuotesConfig {
    /// Delay between the hide step and the pick
    pub fade_delay: Duration,

    /// Length of the opacity fade drawn by surfaces
    pub fade_duration: Duration,

    /// Fade curve drawn by surfaces
    pub easing: Easing,

    /// Re-entrancy policy for requests during a pending pick
    pub request_policy: RequestPolicy,

    /// Seed for reproducible rotations (`None` = OS randomness)
    pub seed: Option<u64>,

    /// Catalog file (`None` = built-in catalog)
    pub catalog_path: Option<PathBuf>,

    /// Accent palette
    pub palette: Palette,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            fade_delay: DEFAULT_FADE_DELAY,
            fade_duration: DEFAULT_FADE_DELAY,
            easing: Easing::default(),
            request_policy: RequestPolicy::default(),
            seed: None,
            catalog_path: None,
            palette: Palette::builtin(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl QuotesConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Load the configured catalog, or the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file is unreadable or empty.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/quotes/quotes.toml` or
/// `~/.config/quotes/quotes.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quotes").join("quotes.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<QuotesConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<QuotesConfig, ConfigError> {
    let mut config = QuotesConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: QuotesToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config, config_path.parent())?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(
    config: &mut QuotesConfig,
    toml: &QuotesToml,
    base_dir: Option<&Path>,
) -> Result<(), ConfigError> {
    if let Some(ms) = toml.selection.fade_delay_ms {
        config.fade_delay = Duration::from_millis(ms);
    }
    if let Some(policy) = toml.selection.request_policy {
        config.request_policy = policy;
    }
    if toml.selection.seed.is_some() {
        config.seed = toml.selection.seed;
    }
    if let Some(ref catalog) = toml.selection.catalog {
        config.catalog_path = Some(match base_dir {
            Some(dir) if catalog.is_relative() => dir.join(catalog),
            _ => catalog.clone(),
        });
    }

    if let Some(ms) = toml.fade.duration_ms {
        config.fade_duration = Duration::from_millis(ms);
    }
    if let Some(easing) = toml.fade.easing {
        config.easing = easing;
    }

    if let Some(ref colors) = toml.palette.colors {
        config.palette = Palette::new(colors.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    }

    Ok(())
}

/// Apply environment variable overrides to the config
///
/// `lookup` resolves a variable name; unparsable values are ignored.
fn apply_env_config<F>(config: &mut QuotesConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("QUOTES_FADE_DELAY_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.fade_delay = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = lookup("QUOTES_FADE_DURATION_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.fade_duration = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = lookup("QUOTES_REQUEST_POLICY") {
        match value.parse::<RequestPolicy>() {
            Ok(policy) => {
                config.request_policy = policy;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!("Ignoring QUOTES_REQUEST_POLICY: {}", e),
        }
    }
    if let Some(value) = lookup("QUOTES_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.seed = Some(seed);
            config.source = ConfigSource::Env;
        }
    }
    if let Some(value) = lookup("QUOTES_CATALOG") {
        if !value.is_empty() {
            config.catalog_path = Some(PathBuf::from(value));
            config.source = ConfigSource::Env;
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Command-line overrides, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Fade delay override
    pub fade_delay_ms: Option<u64>,

    /// Request policy override
    pub request_policy: Option<RequestPolicy>,

    /// Seed override
    pub seed: Option<u64>,

    /// Catalog file override
    pub catalog_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fade delay override
    #[must_use]
    pub fn with_fade_delay_ms(mut self, ms: u64) -> Self {
        self.fade_delay_ms = Some(ms);
        self
    }

    /// Set request policy override
    #[must_use]
    pub fn with_request_policy(mut self, policy: RequestPolicy) -> Self {
        self.request_policy = Some(policy);
        self
    }

    /// Set seed override
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set catalog file override
    #[must_use]
    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut QuotesConfig) {
        if self.fade_delay_ms.is_some()
            || self.request_policy.is_some()
            || self.seed.is_some()
            || self.catalog_path.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ms) = self.fade_delay_ms {
            config.fade_delay = Duration::from_millis(ms);
        }
        if let Some(policy) = self.request_policy {
            config.request_policy = policy;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ref path) = self.catalog_path {
            config.catalog_path = Some(path.clone());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
