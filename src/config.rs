//! YAML session configuration.
//!
//! Lets embedders describe a whole match session in one declarative file
//! and derive the per-stage configs from it at runtime.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # pathsieve session configuration
//! version: 1
//!
//! case_mode: smart
//! diagnostics: true
//! reference: "src/main.rs"
//! match_reference: false
//! path_separator: "/"
//! limit: 50
//! threads: 4
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rank::RankConfig;
use score::{CaseMode, MatchOptions};

/// Top-level YAML configuration for a match session.
///
/// Every field defaults, so the empty document is a valid configuration
/// equivalent to [`MatchOptions::default`] plus [`RankConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Configuration format version.
    #[serde(default = "SessionConfig::default_version")]
    pub version: u32,
    /// Case policy for character comparison.
    #[serde(default)]
    pub case_mode: CaseMode,
    /// Whether matches carry diagnostics (positions + score breakdown).
    #[serde(default)]
    pub diagnostics: bool,
    /// Reference path used for proximity tie-breaks; empty for none.
    #[serde(default)]
    pub reference: String,
    /// Whether the reference path itself may appear in the results.
    #[serde(default)]
    pub match_reference: bool,
    /// Character splitting candidates into path components.
    #[serde(default = "SessionConfig::default_path_separator")]
    pub path_separator: char,
    /// Maximum number of results retained; `null` keeps every match.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Scoring worker threads for the parallel drive loop.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl SessionConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_path_separator() -> char {
        '/'
    }

    /// Parse and validate a configuration from a YAML string.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load, parse, and validate a configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&raw)?;
        tracing::debug!(path = %path.display(), "session_config_loaded");
        Ok(config)
    }

    /// Validate the configuration as a whole.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != Self::default_version() {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        self.match_options()
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        self.rank_config()
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(())
    }

    /// Match options derived from this configuration.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_mode: self.case_mode,
            want_match_info: self.diagnostics,
            reference: self.reference.clone(),
            match_reference: self.match_reference,
            path_separator: self.path_separator,
        }
    }

    /// Rank configuration derived from this configuration.
    pub fn rank_config(&self) -> RankConfig {
        RankConfig {
            limit: self.limit,
            threads: self.threads,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            case_mode: CaseMode::default(),
            diagnostics: false,
            reference: String::new(),
            match_reference: false,
            path_separator: Self::default_path_separator(),
            limit: None,
            threads: None,
        }
    }
}

/// Errors that can occur when loading session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SessionConfig::from_yaml_str("{}").expect("empty config is valid");
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.match_options(), MatchOptions::default());
        assert_eq!(config.rank_config(), RankConfig::default());
    }

    #[test]
    fn full_document_parses() {
        let yaml = r#"
version: 1
case_mode: smart
diagnostics: true
reference: "src/main.rs"
path_separator: "/"
limit: 50
threads: 4
"#;
        let config = SessionConfig::from_yaml_str(yaml).expect("config is valid");
        assert_eq!(config.case_mode, CaseMode::Smart);
        assert!(config.diagnostics);
        assert_eq!(config.reference, "src/main.rs");
        assert_eq!(config.limit, Some(50));
        assert_eq!(config.rank_config().threads, Some(4));
        assert!(config.match_options().want_match_info);
    }

    #[test]
    fn unsupported_version_rejected() {
        let err = SessionConfig::from_yaml_str("version: 2").expect_err("version 2 is unknown");
        match err {
            ConfigError::UnsupportedVersion(2) => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_fields_rejected_through_stage_validation() {
        let err = SessionConfig::from_yaml_str("limit: 0").expect_err("zero limit is invalid");
        match err {
            ConfigError::Validation(msg) => assert!(msg.contains("limit")),
            other => panic!("unexpected error: {other}"),
        }

        let err = SessionConfig::from_yaml_str("path_separator: \"x\"")
            .expect_err("alphanumeric separator is invalid");
        match err {
            ConfigError::Validation(msg) => assert!(msg.contains("separator")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = SessionConfig::from_yaml_str(": nonsense [").expect_err("not yaml");
        assert!(matches!(err, ConfigError::YamlParse(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.yaml");
        fs::write(&path, "diagnostics: true\nlimit: 10\n").expect("write config");

        let config = SessionConfig::from_yaml_file(&path).expect("file config is valid");
        assert!(config.diagnostics);
        assert_eq!(config.limit, Some(10));

        let missing = SessionConfig::from_yaml_file(dir.path().join("absent.yaml"));
        assert!(matches!(missing, Err(ConfigError::FileRead(_))));
    }
}
