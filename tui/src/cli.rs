//! Command Line Arguments
//!
//! Flags sit on top of the config file and `QUOTES_*` environment variables.

use std::path::PathBuf;

use clap::Parser;

use quotes_core::config::default_config_path;
use quotes_core::{load_config_from_path, ConfigError, ConfigOverrides, QuotesConfig, RequestPolicy};

#[derive(Debug, Parser)]
#[command(name = "quotes", version, about = "A random quote machine for the terminal")]
pub struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/quotes/quotes.toml)
    #[arg(long, value_name = "PATH", env = "QUOTES_CONFIG")]
    pub config: Option<PathBuf>,

    /// TOML quote catalog replacing the built-in quotes
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Seed for a reproducible rotation
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Delay between hiding a quote and showing the next, in milliseconds
    #[arg(long = "fade-ms", value_name = "MS")]
    pub fade_ms: Option<u64>,

    /// What a request does while another is pending: ignore or restart
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<RequestPolicy>,

    /// Show share links instead of opening a browser
    #[arg(long)]
    pub no_open: bool,
}

impl Args {
    /// Overrides carried by the flags
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ms) = self.fade_ms {
            overrides = overrides.with_fade_delay_ms(ms);
        }
        if let Some(policy) = self.policy {
            overrides = overrides.with_request_policy(policy);
        }
        if let Some(seed) = self.seed {
            overrides = overrides.with_seed(seed);
        }
        if let Some(ref path) = self.catalog {
            overrides = overrides.with_catalog_path(path.clone());
        }
        overrides
    }

    /// Load file and environment configuration, then apply the flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load_config(&self) -> Result<QuotesConfig, ConfigError> {
        let path = self.config.clone().or_else(default_config_path);
        let mut config = load_config_from_path(path)?;
        self.overrides().apply(&mut config);
        Ok(config)
    }
}
