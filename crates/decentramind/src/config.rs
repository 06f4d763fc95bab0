//! Layered configuration
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `decentramind.toml` (or the file named by `DECENTRAMIND_CONFIG`), optional
//! 3. `DECENTRAMIND__<SECTION>__<KEY>` environment variables
//!
//! A `.env` file in the working directory is read first.

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use decentramind_evolution::{EvolutionConfig, EvolutionEngine};
use decentramind_governance::GovernanceConfig;
use decentramind_matcher::MatcherConfig;
use serde::Deserialize;
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "DECENTRAMIND_CONFIG";

/// Configuration file read when `DECENTRAMIND_CONFIG` is unset
pub const DEFAULT_CONFIG_FILE: &str = "decentramind.toml";

/// Prefix of override environment variables
pub const ENV_PREFIX: &str = "DECENTRAMIND";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DecentraMindConfig {
    pub matcher: MatcherConfig,
    pub evolution: EvolutionConfig,
    pub governance: GovernanceConfig,
}

impl DecentraMindConfig {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        debug!(path = %path, "Loading configuration");

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path))?;

        let cfg = Self::from_settings(settings)?;
        info!(path = %path, "Configuration loaded");
        Ok(cfg)
    }

    /// Parse a TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .context("failed to parse TOML configuration")?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self> {
        let cfg: Self = settings
            .try_deserialize()
            .context("configuration does not match the expected schema")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section before engines are built from it
    pub fn validate(&self) -> Result<()> {
        self.governance
            .validate()
            .context("invalid [governance] section")?;
        EvolutionEngine::new(self.evolution.clone()).context("invalid [evolution] section")?;
        Ok(())
    }
}
