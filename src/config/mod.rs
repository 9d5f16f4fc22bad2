use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use dotenvy::dotenv;
use serde::Deserialize;

/// Prefix shared by every environment variable the application reads.
pub const ENV_PREFIX: &str = "CONSTRUCTION_";

/// Configuration for the application
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Directory holding seed JSON files; the bundled fixtures are used when unset
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,
    /// Multiplier applied to the simulated service latency, 0 disables it
    #[serde(default = "default_latency_scale")]
    pub latency_scale: f64,
    /// Where log output goes while the terminal UI owns the screen
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub seed_dir: Option<PathBuf>,
    pub no_latency: bool,
    pub log_file: Option<PathBuf>,
}

fn default_latency_scale() -> f64 {
    1.0
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize `CONSTRUCTION_*` environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;

        Ok(config)
    }

    pub fn seed_dir(&self) -> Option<&Path> {
        self.seed_dir.as_deref()
    }

    /// Rejects a latency scale that is negative, infinite or NaN.
    pub fn validate(self) -> Result<Self> {
        if !self.latency_scale.is_finite() || self.latency_scale < 0.0 {
            bail!(
                "{}LATENCY_SCALE must be a finite number >= 0, got {}",
                ENV_PREFIX,
                self.latency_scale
            );
        }
        Ok(self)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.seed_dir {
            self.seed_dir = Some(dir);
        }
        if overrides.no_latency {
            self.latency_scale = 0.0;
        }
        if let Some(file) = overrides.log_file {
            self.log_file = Some(file);
        }
        self
    }
}

/// Initialize environment variables and load configuration
pub fn init(overrides: Overrides) -> Result<Config> {
    let config = Config::load()?.with_overrides(overrides).validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string()));
        envy::prefixed(ENV_PREFIX).from_iter(vars).unwrap()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = from_pairs(&[("PATH", "/usr/bin")]);
        assert_eq!(config.seed_dir, None);
        assert_eq!(config.latency_scale, 1.0);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn prefixed_variables_are_read() {
        let config = from_pairs(&[
            ("CONSTRUCTION_SEED_DIR", "/srv/seed"),
            ("CONSTRUCTION_LATENCY_SCALE", "0.25"),
            ("CONSTRUCTION_LOG_FILE", "/tmp/construction.log"),
        ]);
        assert_eq!(config.seed_dir(), Some(Path::new("/srv/seed")));
        assert_eq!(config.latency_scale, 0.25);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/construction.log")));
    }

    #[test]
    fn command_line_overrides_win() {
        let config = from_pairs(&[("CONSTRUCTION_SEED_DIR", "/srv/seed")]).with_overrides(
            Overrides {
                seed_dir: Some(PathBuf::from("./fixtures")),
                no_latency: true,
                log_file: None,
            },
        );
        assert_eq!(config.seed_dir(), Some(Path::new("./fixtures")));
        assert_eq!(config.latency_scale, 0.0);
    }

    #[test]
    fn unusable_latency_scales_are_rejected() {
        let infinite = from_pairs(&[("CONSTRUCTION_LATENCY_SCALE", "inf")]);
        assert_eq!(infinite.latency_scale, f64::INFINITY);
        assert!(infinite.validate().is_err());

        let negative = from_pairs(&[("CONSTRUCTION_LATENCY_SCALE", "-1")]);
        assert!(negative.validate().is_err());

        let silenced = from_pairs(&[("CONSTRUCTION_LATENCY_SCALE", "inf")])
            .with_overrides(Overrides { no_latency: true, ..Overrides::default() });
        assert_eq!(silenced.validate().unwrap().latency_scale, 0.0);
    }
}
