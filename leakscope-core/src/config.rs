//! Configuration file support
//!
//! Loads engine overrides from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.leakscoperc.json` in the working root
//! 3. `leakscope.config.json` in the working root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::actions::RankerSettings;
use crate::dashboard::EngineSettings;
use crate::inputs::RawInputs;
use crate::score::ScoreCalibration;

/// Engine configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeakscopeConfig {
    /// Override for the average job value input
    #[serde(default)]
    pub avg_job_value: Option<f64>,

    /// Override for the close rate input, in percent
    #[serde(default)]
    pub close_rate: Option<f64>,

    /// Custom protection-score calibration
    #[serde(default)]
    pub score: Option<ScoreConfig>,

    /// Custom recommendation-ranker settings
    #[serde(default)]
    pub recommendations: Option<RecommendationConfig>,
}

/// Custom protection-score calibration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreConfig {
    /// Leak total at which the full leak penalty applies (default: 99600)
    pub reference_max_leak: Option<f64>,
    /// Maximum points deducted for leak severity (default: 40)
    pub leak_penalty_weight: Option<f64>,
    /// Points deducted per critical category (default: 5)
    pub critical_penalty: Option<f64>,
    /// Points added per improving category (default: 2)
    pub improving_bonus: Option<f64>,
}

/// Custom recommendation-ranker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationConfig {
    /// Minimum estimated revenue for a leak to qualify (default: 5000)
    pub revenue_threshold: Option<f64>,
    /// Maximum recommendations returned (default: 3)
    pub top: Option<usize>,
}

/// Resolved configuration ready for use
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Input overrides applied after parsing
    pub avg_job_value: Option<f64>,
    pub close_rate: Option<f64>,
    /// Engine knobs derived from the config
    pub settings: EngineSettings,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl LeakscopeConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(v) = self.avg_job_value {
            if v <= 0.0 || !v.is_finite() {
                anyhow::bail!("avg_job_value must be positive (got {})", v);
            }
        }
        if let Some(v) = self.close_rate {
            if !(0.0..=100.0).contains(&v) {
                anyhow::bail!("close_rate must be between 0 and 100 (got {})", v);
            }
        }

        if let Some(ref s) = self.score {
            if let Some(v) = s.reference_max_leak {
                if v <= 0.0 {
                    anyhow::bail!("score.reference_max_leak must be positive (got {})", v);
                }
            }
            for (name, val) in [
                ("leak_penalty_weight", s.leak_penalty_weight),
                ("critical_penalty", s.critical_penalty),
                ("improving_bonus", s.improving_bonus),
            ] {
                if let Some(v) = val {
                    if v < 0.0 {
                        anyhow::bail!("score.{} must be non-negative (got {})", name, v);
                    }
                }
            }
        }

        if let Some(ref r) = self.recommendations {
            if let Some(v) = r.revenue_threshold {
                if v < 0.0 {
                    anyhow::bail!(
                        "recommendations.revenue_threshold must be non-negative (got {})",
                        v
                    );
                }
            }
            if let Some(n) = r.top {
                if n == 0 {
                    anyhow::bail!("recommendations.top must be at least 1");
                }
            }
        }

        Ok(())
    }

    /// Resolve config into usable form
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let score_defaults = ScoreCalibration::default();
        let score = match &self.score {
            Some(s) => ScoreCalibration {
                reference_max_leak: s.reference_max_leak.unwrap_or(score_defaults.reference_max_leak),
                leak_penalty_weight: s
                    .leak_penalty_weight
                    .unwrap_or(score_defaults.leak_penalty_weight),
                critical_penalty: s.critical_penalty.unwrap_or(score_defaults.critical_penalty),
                improving_bonus: s.improving_bonus.unwrap_or(score_defaults.improving_bonus),
            },
            None => score_defaults,
        };

        let ranker_defaults = RankerSettings::default();
        let recommendations = match &self.recommendations {
            Some(r) => RankerSettings {
                revenue_threshold: r
                    .revenue_threshold
                    .unwrap_or(ranker_defaults.revenue_threshold),
                top_n: r.top.unwrap_or(ranker_defaults.top_n),
            },
            None => ranker_defaults,
        };

        Ok(ResolvedConfig {
            avg_job_value: self.avg_job_value,
            close_rate: self.close_rate,
            settings: EngineSettings {
                score,
                recommendations,
            },
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Apply the configured input overrides
    pub fn apply_overrides(&self, inputs: &mut RawInputs) {
        if let Some(v) = self.avg_job_value {
            inputs.avg_job_value = v.into();
        }
        if let Some(v) = self.close_rate {
            inputs.close_rate = v.into();
        }
    }

    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        LeakscopeConfig::default().resolve()
    }
}

/// Discover and load a config file from the working root
///
/// Search order:
/// 1. `.leakscoperc.json`
/// 2. `leakscope.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(root: &Path) -> Result<Option<(LeakscopeConfig, PathBuf)>> {
    for name in [".leakscoperc.json", "leakscope.config.json"] {
        let path = root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<LeakscopeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: LeakscopeConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a working root
///
/// If `config_path` is provided, loads from that file. Otherwise discovers
/// config from the root. Returns default config if nothing is found.
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (LeakscopeConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = LeakscopeConfig::default();
        config.validate().expect("default config should be valid");
        let resolved = config.resolve().expect("default config should resolve");
        assert!(resolved.avg_job_value.is_none());
        assert_eq!(resolved.settings.score.reference_max_leak, 99600.0);
        assert_eq!(resolved.settings.recommendations.top_n, 3);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: LeakscopeConfig = serde_json::from_str("{}").unwrap();
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "avg_job_value": 1500.0,
            "close_rate": 45.0,
            "score": {
                "reference_max_leak": 80000.0,
                "critical_penalty": 8.0
            },
            "recommendations": {
                "revenue_threshold": 3000.0,
                "top": 5
            }
        }"#;
        let config: LeakscopeConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.avg_job_value, Some(1500.0));
        assert_eq!(resolved.close_rate, Some(45.0));
        assert_eq!(resolved.settings.score.reference_max_leak, 80000.0);
        assert_eq!(resolved.settings.score.critical_penalty, 8.0);
        // Unspecified fields keep defaults.
        assert_eq!(resolved.settings.score.leak_penalty_weight, 40.0);
        assert_eq!(resolved.settings.recommendations.revenue_threshold, 3000.0);
        assert_eq!(resolved.settings.recommendations.top_n, 5);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let result: Result<LeakscopeConfig, _> =
            serde_json::from_str(r#"{"unknown_field": true}"#);
        assert!(result.is_err(), "unknown fields should be rejected");
    }

    #[test]
    fn test_reject_non_positive_job_value() {
        let config: LeakscopeConfig = serde_json::from_str(r#"{"avg_job_value": 0.0}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_out_of_range_close_rate() {
        let config: LeakscopeConfig = serde_json::from_str(r#"{"close_rate": 140.0}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_zero_top() {
        let config: LeakscopeConfig =
            serde_json::from_str(r#"{"recommendations": {"top": 0}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let config: LeakscopeConfig =
            serde_json::from_str(r#"{"avg_job_value": 2000.0, "close_rate": 40.0}"#).unwrap();
        let resolved = config.resolve().unwrap();
        let mut inputs = RawInputs::default();
        resolved.apply_overrides(&mut inputs);
        assert_eq!(inputs.avg_job_value.as_f64(), 2000.0);
        assert_eq!(inputs.close_rate.as_f64(), 40.0);
    }

    #[test]
    fn test_discover_rc_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".leakscoperc.json");
        fs::write(&config_path, r#"{"close_rate": 50.0}"#).unwrap();

        let (config, path) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.close_rate, Some(50.0));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".leakscoperc.json"),
            r#"{"close_rate": 50.0}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("leakscope.config.json"),
            r#"{"close_rate": 60.0}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.close_rate,
            Some(50.0),
            ".leakscoperc.json should take priority"
        );
    }

    #[test]
    fn test_no_config_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_and_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"score": {"improving_bonus": 3.0}}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&config_path)).unwrap();
        assert_eq!(resolved.settings.score.improving_bonus, 3.0);
        assert_eq!(resolved.config_path, Some(config_path));
    }

    #[test]
    fn test_load_and_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.settings.score.critical_penalty, 5.0);
    }
}
