//! Configuration loading and validation for the encryption service.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any variable cannot be parsed.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Lowest bcrypt work factor the `bcrypt` crate accepts.
const MIN_KDF_COST: u32 = 4;

/// Highest bcrypt work factor the `bcrypt` crate accepts.
const MAX_KDF_COST: u32 = 31;

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// TCP port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Deployment mode; `"development"` attaches per-request trace logging.
    #[serde(default = "default_deploy_mode")]
    pub deploy_mode: String,

    /// bcrypt work factor used for passphrase-to-key derivation.
    #[serde(default = "default_kdf_cost")]
    pub kdf_cost: u32,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    5000
}
fn default_deploy_mode() -> String {
    "production".into()
}
fn default_kdf_cost() -> u32 {
    8
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Whether per-request trace logging should be attached to the router.
    pub fn request_tracing_enabled(&self) -> bool {
        self.deploy_mode == "development"
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if !(MIN_KDF_COST..=MAX_KDF_COST).contains(&self.kdf_cost) {
            anyhow::bail!(
                "KDF_COST must be in {MIN_KDF_COST}..={MAX_KDF_COST}, got {}",
                self.kdf_cost
            );
        }
        if self.deploy_mode.trim().is_empty() {
            anyhow::bail!("DEPLOY_MODE must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            listen_port: default_listen_port(),
            deploy_mode: default_deploy_mode(),
            kdf_cost: default_kdf_cost(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 5000);
        assert_eq!(default_deploy_mode(), "production");
        assert_eq!(default_kdf_cost(), 8);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_kdf_cost_below_minimum() {
        let mut cfg = base_config();
        cfg.kdf_cost = 3;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_kdf_cost_above_maximum() {
        let mut cfg = base_config();
        cfg.kdf_cost = 32;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_deploy_mode() {
        let mut cfg = base_config();
        cfg.deploy_mode = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn request_tracing_follows_deploy_mode() {
        let mut cfg = base_config();
        assert!(!cfg.request_tracing_enabled());
        cfg.deploy_mode = "development".into();
        assert!(cfg.request_tracing_enabled());
    }
}
