//! Processing settings.
//!
//! The tool has no config file or settings flags: every run uses the stock
//! values below. They still travel as one typed struct so the pipeline never
//! reaches for a global, and tests can vary them.
//!
//! ## Stock values
//!
//! ```text
//! quality        75        JPEG encoder default
//! dpi            300       6-inch print at 1800x1200
//! output_dir     "output"  sibling folder next to each source file
//! output_suffix  "-out"    <stem>-out.jpg
//! ```

use crate::imaging::Quality;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    /// JPEG encoding quality.
    pub quality: Quality,
    /// Resolution tagged onto every output, both axes.
    pub dpi: u32,
    /// Name of the folder created next to each source file.
    pub output_dir: String,
    /// Appended to the source file stem to name the output.
    pub output_suffix: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            dpi: 300,
            output_dir: "output".to_string(),
            output_suffix: "-out".to_string(),
        }
    }
}

impl ProcessingConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.quality.value()) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if self.dpi == 0 {
            return Err(ConfigError::Validation("dpi must be non-zero".into()));
        }
        let mut components = Path::new(&self.output_dir).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(ConfigError::Validation(format!(
                "output_dir must be a single folder name, got {:?}",
                self.output_dir
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = ProcessingConfig::default();
        assert_eq!(config.quality.value(), 75);
        assert_eq!(config.dpi, 300);
        assert_eq!(config.output_dir, "output");
        assert_eq!(config.output_suffix, "-out");
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ProcessingConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_quality_is_rejected() {
        // Bypass Quality::new clamping
        let config = ProcessingConfig {
            quality: Quality(0),
            ..ProcessingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_dpi_is_rejected() {
        let config = ProcessingConfig {
            dpi: 0,
            ..ProcessingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Validation("dpi must be non-zero".into()))
        );
    }

    #[test]
    fn output_dir_must_be_one_component() {
        for bad in ["", "a/b", "..", "/abs", "."] {
            let config = ProcessingConfig {
                output_dir: bad.to_string(),
                ..ProcessingConfig::default()
            };
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }
}
