//! Configuration loading.
//!
//! Every key is optional; a missing file means the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analyzer::FieldLayout;
use crate::positioning::Point;
use crate::positioning::signal_calculations::PathLossParameters;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "cell-position-plot.toml";

/// Log file read when the config does not name one.
pub const DEFAULT_LOG_FILE: &str = "prs_log.txt";

/// Radius of the schematic circle the towers are placed on.
pub const DEFAULT_TOWER_RADIUS: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub log_file: PathBuf,
    pub tower_radius: f64,
    /// Seed for the bearing RNG; runs are reproducible when set.
    pub seed: Option<u64>,
    /// Known device position in plot units, e.g. from a GPS fix.
    pub ground_truth: Option<Point>,
    pub path_loss: PathLossParameters,
    pub layout: FieldLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            tower_radius: DEFAULT_TOWER_RADIUS,
            seed: None,
            ground_truth: None,
            path_loss: PathLossParameters::default(),
            layout: FieldLayout::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::parse(&data).with_context(|| format!("Failed to parse config file: {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read config file: {}", path.display())),
        }
    }

    fn parse(data: &str) -> Result<Self> {
        let config: Config = toml::from_str(data)?;
        if !(config.tower_radius.is_finite() && config.tower_radius > 0.0) {
            anyhow::bail!("tower-radius must be a positive number, got {}", config.tower_radius);
        }
        if !(config.path_loss.path_loss_exponent.is_finite() && config.path_loss.path_loss_exponent > 0.0) {
            anyhow::bail!("path-loss-exponent must be a positive number, got {}", config.path_loss.path_loss_exponent);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_file, PathBuf::from("prs_log.txt"));
        assert_eq!(config.tower_radius, 500.0);
        assert_eq!(config.path_loss.tx_power, 43.0);
        assert_eq!(config.path_loss.path_loss_at_reference_distance, 32.4);
        assert_eq!(config.path_loss.path_loss_exponent, 3.5);
        assert_eq!(config.layout.serving_signal_field, 14);
    }

    #[test]
    fn partial_file_overrides_named_keys() {
        let config = Config::parse(
            r#"
            log-file = "capture.log"
            seed = 7
            ground-truth = { x = 10.0, y = -20.0 }

            [path-loss]
            path-loss-exponent = 3.0

            [layout]
            serving-signal-field = 13
            "#,
        )
        .unwrap();
        assert_eq!(config.log_file, PathBuf::from("capture.log"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ground_truth, Some(Point::new(10.0, -20.0)));
        assert_eq!(config.path_loss.path_loss_exponent, 3.0);
        assert_eq!(config.path_loss.tx_power, 43.0);
        assert_eq!(config.layout.serving_signal_field, 13);
        assert_eq!(config.layout.serving_id_field, 6);
        assert_eq!(config.tower_radius, 500.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Config::parse("tower-radius = -1.0").is_err());
        assert!(Config::parse("[path-loss]\npath-loss-exponent = 0.0").is_err());
        assert!(Config::parse("seed = \"abc\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("cell-position-plot-no-such-config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = std::env::temp_dir();
        let err = Config::load(&dir).err().expect("a directory is not a config file");
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("cell-position-plot-{}-bad.toml", std::process::id()));
        std::fs::write(&path, "tower-radius = -1.0").unwrap();
        let err = Config::load(&path).err().expect("invalid radius should fail");
        assert!(err.to_string().contains("Failed to parse config file"));
        std::fs::remove_file(path).ok();
    }
}
