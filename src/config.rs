use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::error::{PipelineError, PipelineResult};

/// Default seed kept fixed so repeat runs reproduce the same split
pub const DEFAULT_SEED: u64 = 42;

const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Train/val/test proportions. Validated once at configuration time;
/// never silently renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            val: 0.1,
            test: 0.1,
        }
    }
}

impl SplitRatios {
    pub fn validate(&self) -> PipelineResult<()> {
        if self.train < 0.0 || self.val < 0.0 || self.test < 0.0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "split ratios must be non-negative (got {}/{}/{})",
                self.train, self.val, self.test
            )));
        }
        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(PipelineError::InvalidConfiguration(format!(
                "split ratios must sum to 1.0 (got {})",
                sum
            )));
        }
        Ok(())
    }
}

/// Whether materialization preserves or consumes the source files
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }
}

/// Immutable configuration for one preparation run, validated at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub raw_root: PathBuf,
    pub out_root: PathBuf,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub ratios: SplitRatios,
    #[serde(default)]
    pub mode: TransferMode,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl PipelineConfig {
    pub fn new(
        raw_root: PathBuf,
        out_root: PathBuf,
        seed: u64,
        ratios: SplitRatios,
        mode: TransferMode,
    ) -> PipelineResult<Self> {
        ratios.validate()?;
        Ok(Self {
            raw_root,
            out_root,
            seed,
            ratios,
            mode,
        })
    }

    /// Load a configuration file (JSON). Parse failures are configuration
    /// errors, not I/O errors: a corrupt file must abort the run.
    pub fn load(path: &Path) -> PipelineResult<Self> {
        info!("Loading pipeline configuration from: {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| {
            PipelineError::InvalidConfiguration(format!(
                "failed to read config file {:?}: {}",
                path, e
            ))
        })?;
        let config: PipelineConfig = serde_json::from_str(&contents).map_err(|e| {
            PipelineError::InvalidConfiguration(format!(
                "failed to parse config file {:?}: {}",
                path, e
            ))
        })?;
        config.ratios.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratios_are_valid() {
        assert!(SplitRatios::default().validate().is_ok());
    }

    #[test]
    fn test_negative_ratio_is_rejected() {
        let ratios = SplitRatios {
            train: 1.2,
            val: -0.1,
            test: -0.1,
        };
        assert!(matches!(
            ratios.validate(),
            Err(PipelineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_ratios_must_sum_to_one() {
        let ratios = SplitRatios {
            train: 0.8,
            val: 0.1,
            test: 0.2,
        };
        assert!(ratios.validate().is_err());
    }

    #[test]
    fn test_invalid_ratios_fail_at_construction() {
        let result = PipelineConfig::new(
            PathBuf::from("raw"),
            PathBuf::from("out"),
            DEFAULT_SEED,
            SplitRatios {
                train: 0.5,
                val: 0.1,
                test: 0.1,
            },
            TransferMode::Copy,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = PipelineConfig::new(
            PathBuf::from("raw/hagrid"),
            PathBuf::from("data"),
            7,
            SplitRatios::default(),
            TransferMode::Move,
        )
        .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let loaded: PipelineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.raw_root, PathBuf::from("raw/hagrid"));
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.mode, TransferMode::Move);
        assert_eq!(loaded.ratios, SplitRatios::default());
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let json = r#"{"raw_root": "raw", "out_root": "out"}"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.mode, TransferMode::Copy);
        assert_eq!(config.ratios, SplitRatios::default());
    }
}
