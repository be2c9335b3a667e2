//! YAML configuration for the plagscan pipeline.
//!
//! All stage settings live in one file, loaded at startup with
//! [`PlagscanConfig::from_file`] and converted into each stage's own config.
//! Every field has a default, so an empty document (just `version`) is valid.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "coursework scan"
//!
//! ingest:
//!   version: 1
//!   max_payload_bytes: 4194304
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: false
//!   lowercase: true
//!   strip_punctuation: true
//!   remove_stop_words: true
//!   stem: true
//!   extra_stop_words: ["ibid", "et", "al"]
//!
//! matcher:
//!   window_size: 20
//!   threshold: 0.8
//!   use_parallel: false
//!
//! scan:
//!   parallel: true
//! ```
//!
//! ## Environment overrides
//!
//! `PLAGSCAN_WINDOW_SIZE` and `PLAGSCAN_THRESHOLD` replace the matcher values
//! after the file is parsed; see [`PlagscanConfig::apply_env_overrides`].

use std::fs;
use std::path::Path;
use std::sync::Arc;

use canonical::{NormalizeConfig, StopWords};
use ingest::{IngestConfig, DEFAULT_MAX_PAYLOAD_BYTES};
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `matcher.window_size`.
pub const ENV_WINDOW_SIZE: &str = "PLAGSCAN_WINDOW_SIZE";
/// Environment variable overriding `matcher.threshold`.
pub const ENV_THRESHOLD: &str = "PLAGSCAN_THRESHOLD";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the whole pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PlagscanConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub ingest: IngestYamlConfig,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    #[serde(default)]
    pub scan: ScanYamlConfig,
}

impl PlagscanConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PlagscanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.ingest
            .to_ingest_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("ingest: {e}")))?;
        self.canonical
            .to_normalize_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("canonical: {e}")))?;
        self.matcher
            .to_match_config()
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("matcher: {e}")))?;

        Ok(())
    }

    /// Apply `PLAGSCAN_WINDOW_SIZE` / `PLAGSCAN_THRESHOLD` from the process
    /// environment, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, then re-validate.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_WINDOW_SIZE) {
            self.matcher.window_size = raw.trim().parse().map_err(|_| {
                ConfigLoadError::Validation(format!("{ENV_WINDOW_SIZE} is not an integer: {raw}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_THRESHOLD) {
            self.matcher.threshold = raw.trim().parse().map_err(|_| {
                ConfigLoadError::Validation(format!("{ENV_THRESHOLD} is not a number: {raw}"))
            })?;
        }
        self.validate()
    }
}

impl Default for PlagscanConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            ingest: IngestYamlConfig::default(),
            canonical: CanonicalYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            scan: ScanYamlConfig::default(),
        }
    }
}

/// Ingest stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// `null` disables the cap.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: Option<usize>,
}

impl IngestYamlConfig {
    pub fn to_ingest_config(&self) -> IngestConfig {
        IngestConfig {
            version: self.version,
            max_payload_bytes: self.max_payload_bytes,
        }
    }
}

impl Default for IngestYamlConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

/// Normalization stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub normalize_unicode: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub strip_punctuation: bool,

    #[serde(default = "true_value")]
    pub remove_stop_words: bool,

    #[serde(default = "true_value")]
    pub stem: bool,

    /// Added to the English stop-word list.
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

impl CanonicalYamlConfig {
    pub fn to_normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            lowercase: self.lowercase,
            strip_punctuation: self.strip_punctuation,
            remove_stop_words: self.remove_stop_words,
            stem: self.stem,
        }
    }

    /// English list plus `extra_stop_words`, ready to share.
    pub fn stop_words(&self) -> Arc<StopWords> {
        Arc::new(StopWords::english().with_extra(self.extra_stop_words.iter().cloned()))
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        let defaults = NormalizeConfig::default();
        Self {
            version: defaults.version,
            normalize_unicode: defaults.normalize_unicode,
            lowercase: defaults.lowercase,
            strip_punctuation: defaults.strip_punctuation,
            remove_stop_words: defaults.remove_stop_words,
            stem: defaults.stem,
            extra_stop_words: Vec::new(),
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchYamlConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default)]
    pub use_parallel: bool,
}

impl MatchYamlConfig {
    pub fn to_match_config(&self) -> MatchConfig {
        MatchConfig::default()
            .with_window_size(self.window_size)
            .with_threshold(self.threshold)
            .with_parallel(self.use_parallel)
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            threshold: default_threshold(),
            use_parallel: false,
        }
    }
}

/// One-to-many scan YAML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanYamlConfig {
    /// Evaluate candidates on the rayon pool. Report order is unchanged.
    #[serde(default)]
    pub parallel: bool,
}

fn default_version() -> u32 {
    1
}
fn default_max_payload_bytes() -> Option<usize> {
    Some(DEFAULT_MAX_PAYLOAD_BYTES)
}
fn true_value() -> bool {
    true
}
fn default_window_size() -> usize {
    MatchConfig::default().window_size
}
fn default_threshold() -> f64 {
    MatchConfig::default().threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
canonical:
  stem: false
  extra_stop_words: ["ibid"]
matcher:
  window_size: 12
  threshold: 0.65
scan:
  parallel: true
"#;

        let config = PlagscanConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("test config".to_string()));
        assert!(!config.canonical.stem);
        assert!(config.canonical.lowercase);
        assert_eq!(config.matcher.window_size, 12);
        assert_eq!(config.matcher.threshold, 0.65);
        assert!(config.scan.parallel);
        assert!(config.canonical.stop_words().contains("ibid"));
        assert_eq!(
            config.ingest.max_payload_bytes,
            Some(DEFAULT_MAX_PAYLOAD_BYTES)
        );
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
ingest:
  max_payload_bytes: null
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PlagscanConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1");
        assert_eq!(config.ingest.max_payload_bytes, None);
    }

    #[test]
    fn test_missing_file() {
        let err = PlagscanConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileRead(_)));
    }

    #[test]
    fn test_default_config_matches_stage_defaults() {
        let config = PlagscanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.matcher.to_match_config(), MatchConfig::default());
        assert_eq!(
            config.canonical.to_normalize_config(),
            NormalizeConfig::default()
        );
        assert_eq!(config.ingest.to_ingest_config(), IngestConfig::default());
        assert!(!config.scan.parallel);
    }

    #[test]
    fn test_unsupported_version() {
        let err = PlagscanConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_matcher_validation() {
        let yaml = r#"
version: "1.0"
matcher:
  threshold: 1.5
"#;
        let err = PlagscanConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("threshold"));

        let yaml = r#"
version: "1.0"
matcher:
  window_size: 0
"#;
        let err = PlagscanConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn test_canonical_and_ingest_validation() {
        let err = PlagscanConfig::from_yaml("version: \"1\"\ncanonical:\n  version: 0\n")
            .unwrap_err();
        assert!(err.to_string().starts_with("validation error: canonical"));

        let err = PlagscanConfig::from_yaml("version: \"1\"\ningest:\n  max_payload_bytes: 0\n")
            .unwrap_err();
        assert!(err.to_string().contains("max_payload_bytes"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = PlagscanConfig::from_yaml("version: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigLoadError::YamlParse(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = PlagscanConfig::default();
        config.name = Some("roundtrip".into());
        config.matcher.threshold = 0.5;
        config.canonical.extra_stop_words = vec!["foo".into()];

        let yaml = config.to_yaml().unwrap();
        let parsed = PlagscanConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_overrides_applied_and_validated() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_WINDOW_SIZE, "8"), (ENV_THRESHOLD, " 0.9 ")]);
        let mut config = PlagscanConfig::default();
        config
            .apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.matcher.window_size, 8);
        assert_eq!(config.matcher.threshold, 0.9);

        let mut config = PlagscanConfig::default();
        let err = config
            .apply_overrides_from(|k| (k == ENV_THRESHOLD).then(|| "2".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));

        let mut config = PlagscanConfig::default();
        let err = config
            .apply_overrides_from(|k| (k == ENV_WINDOW_SIZE).then(|| "wide".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_WINDOW_SIZE));
    }
}
