use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Case policy applied when comparing query and candidate characters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Characters compare case-folded. The default.
    #[default]
    Insensitive,
    /// Characters must compare exactly.
    Sensitive,
    /// Sensitive when the query contains an uppercase character,
    /// insensitive otherwise.
    Smart,
}

/// Immutable configuration for one match session.
///
/// `MatchOptions` is cheap to clone and serde-friendly so it can be
/// embedded in higher-level configs. Construct once per session and share
/// read-only across scoring workers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOptions {
    /// Case policy for character comparison.
    #[serde(default)]
    pub case_mode: CaseMode,
    /// Whether scoring should produce [`MatchInfo`](crate::MatchInfo)
    /// diagnostics (positions + breakdown) for each match.
    #[serde(default)]
    pub want_match_info: bool,
    /// Reference path ("the file currently open"); used only for the
    /// proximity tie-break and the reference-exclusion rule. Empty means
    /// no reference, in which case proximity degrades to component count.
    #[serde(default)]
    pub reference: String,
    /// When false and `reference` is non-empty, a candidate whose text
    /// equals the reference is excluded from the results.
    #[serde(default)]
    pub match_reference: bool,
    /// Character splitting candidates into path components.
    #[serde(default = "MatchOptions::default_path_separator")]
    pub path_separator: char,
}

impl MatchOptions {
    pub(crate) fn default_path_separator() -> char {
        '/'
    }

    /// Validate the options for a single session.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.path_separator.is_alphanumeric() {
            return Err(OptionsError::InvalidSeparator(self.path_separator));
        }
        Ok(())
    }

    pub fn with_case_mode(mut self, case_mode: CaseMode) -> Self {
        self.case_mode = case_mode;
        self
    }

    pub fn with_want_match_info(mut self, want: bool) -> Self {
        self.want_match_info = want;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_match_reference(mut self, match_reference: bool) -> Self {
        self.match_reference = match_reference;
        self
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_mode: CaseMode::default(),
            want_match_info: false,
            reference: String::new(),
            match_reference: false,
            path_separator: Self::default_path_separator(),
        }
    }
}

/// Errors produced when match options fail validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The configured path separator would collide with matchable text.
    #[error("path separator must not be alphanumeric: {0:?}")]
    InvalidSeparator(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        let opts = MatchOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.case_mode, CaseMode::Insensitive);
        assert_eq!(opts.path_separator, '/');
        assert!(opts.reference.is_empty());
        assert!(!opts.want_match_info);
    }

    #[test]
    fn alphanumeric_separator_rejected() {
        let opts = MatchOptions {
            path_separator: 'x',
            ..MatchOptions::default()
        };
        let err = opts.validate().expect_err("options should be invalid");
        assert_eq!(err, OptionsError::InvalidSeparator('x'));
    }

    #[test]
    fn builders_chain() {
        let opts = MatchOptions::default()
            .with_case_mode(CaseMode::Smart)
            .with_want_match_info(true)
            .with_reference("src/lib.rs");
        assert_eq!(opts.case_mode, CaseMode::Smart);
        assert!(opts.want_match_info);
        assert_eq!(opts.reference, "src/lib.rs");
    }

    #[test]
    fn options_roundtrip_through_serde() {
        let opts = MatchOptions::default().with_reference("a/b");
        let yaml = serde_yaml::to_string(&opts).expect("serialize");
        let back: MatchOptions = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(opts, back);
    }
}
