//! Check parameters and the fuzzy null vocabulary.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};

/// Default threshold for the "mostly same" checks.
pub const DEFAULT_THRESH: f64 = 0.95;

/// Literal values treated as null-equivalent by default.
pub const DEFAULT_FUZZY_NULLS: &[&str] = &["null", "Null", "NULL", "", " "];

/// Require `thresh` to lie strictly between 0 and 1.
pub fn validate_thresh(thresh: f64) -> Result<()> {
    if thresh > 0.0 && thresh < 1.0 {
        Ok(())
    } else {
        Err(SurveyError::Range {
            name: "thresh",
            value: thresh,
            min: 0.0,
            max: 1.0,
        })
    }
}

/// A literal value that stands in for a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NullToken {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl NullToken {
    /// Interpret a raw command-line token.
    ///
    /// The text form is always included; numeric forms are added when the
    /// token parses as a number so it can match numeric columns too.
    pub fn from_raw(raw: &str) -> Vec<Self> {
        let mut tokens = vec![Self::Text(raw.to_string())];
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            tokens.push(Self::Int(value));
        } else if let Ok(value) = trimmed.parse::<f64>()
            && value.is_finite()
        {
            tokens.push(Self::Float(value));
        }
        tokens
    }
}

impl From<&str> for NullToken {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NullToken {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for NullToken {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for NullToken {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for NullToken {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The set of values a fuzzy null check matches.
///
/// Built from [`DEFAULT_FUZZY_NULLS`] plus caller additions; never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyNulls {
    tokens: Vec<NullToken>,
}

impl Default for FuzzyNulls {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_FUZZY_NULLS
                .iter()
                .map(|token| NullToken::from(*token))
                .collect(),
        }
    }
}

impl FuzzyNulls {
    /// Default vocabulary extended with `extra`.
    pub fn with_extra<I, T>(extra: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NullToken>,
    {
        let mut tokens = Self::default().tokens;
        for token in extra.into_iter().map(Into::into) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[NullToken] {
        &self.tokens
    }

    pub fn matches_text(&self, value: &str) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, NullToken::Text(text) if text == value))
    }

    pub fn matches_number(&self, value: f64) -> bool {
        self.tokens.iter().any(|token| match token {
            NullToken::Int(v) => *v as f64 == value,
            NullToken::Float(v) => *v == value,
            _ => false,
        })
    }

    /// Integer tokens compare exactly; float tokens compare by value.
    pub fn matches_integer(&self, value: i64) -> bool {
        self.tokens.iter().any(|token| match token {
            NullToken::Int(v) => *v == value,
            NullToken::Float(v) => *v == value as f64,
            _ => false,
        })
    }

    pub fn matches_bool(&self, value: bool) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, NullToken::Bool(v) if *v == value))
    }

    /// True when any token can match a column of numeric kind.
    pub fn has_numeric(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, NullToken::Int(_) | NullToken::Float(_)))
    }
}

/// Options shared by the table audit and the command-line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyOptions {
    /// Threshold for the "mostly same" checks, in (0, 1).
    pub thresh: f64,
    /// Exclude absent values from category counts and modes.
    pub dropna: bool,
    /// Extra fuzzy null tokens on top of the defaults.
    pub fuzzy_nulls: Vec<NullToken>,
}

impl Default for SurveyOptions {
    fn default() -> Self {
        Self {
            thresh: DEFAULT_THRESH,
            dropna: false,
            fuzzy_nulls: Vec::new(),
        }
    }
}

impl SurveyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thresh(mut self, thresh: f64) -> Self {
        self.thresh = thresh;
        self
    }

    #[must_use]
    pub fn with_dropna(mut self, dropna: bool) -> Self {
        self.dropna = dropna;
        self
    }

    #[must_use]
    pub fn with_fuzzy_null(mut self, token: impl Into<NullToken>) -> Self {
        self.fuzzy_nulls.push(token.into());
        self
    }

    /// Check parameter ranges before any column is touched.
    pub fn validate(&self) -> Result<()> {
        validate_thresh(self.thresh)
    }

    pub fn fuzzy_null_set(&self) -> FuzzyNulls {
        FuzzyNulls::with_extra(self.fuzzy_nulls.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_thresh_bounds() {
        assert!(validate_thresh(0.5).is_ok());
        assert!(validate_thresh(0.0).is_err());
        assert!(validate_thresh(1.0).is_err());
        assert!(validate_thresh(-0.1).is_err());
        assert!(validate_thresh(f64::NAN).is_err());
    }

    #[test]
    fn test_default_fuzzy_nulls() {
        let fuzzy = FuzzyNulls::default();
        for token in ["null", "Null", "NULL", "", " "] {
            assert!(fuzzy.matches_text(token), "{token:?} should match");
        }
        assert!(!fuzzy.matches_text("NA"));
        assert!(!fuzzy.has_numeric());
    }

    #[test]
    fn test_with_extra_leaves_defaults_untouched() {
        let extended = FuzzyNulls::with_extra(["foo"]);
        assert!(extended.matches_text("foo"));
        assert!(!FuzzyNulls::default().matches_text("foo"));
        assert_eq!(extended.tokens().len(), DEFAULT_FUZZY_NULLS.len() + 1);
    }

    #[test]
    fn test_numeric_tokens() {
        let fuzzy = FuzzyNulls::with_extra([NullToken::Int(-999), NullToken::Float(-1.5)]);
        assert!(fuzzy.matches_number(-999.0));
        assert!(fuzzy.matches_number(-1.5));
        assert!(!fuzzy.matches_number(0.0));
        assert!(!fuzzy.matches_text("-999"));
    }

    #[test]
    fn test_integer_tokens_compare_exactly() {
        let sentinel = 9_007_199_254_740_993i64;
        let fuzzy = FuzzyNulls::with_extra([sentinel]);
        assert!(fuzzy.matches_integer(sentinel));
        assert!(!fuzzy.matches_integer(sentinel - 1));
        assert!(FuzzyNulls::with_extra([NullToken::Float(3.0)]).matches_integer(3));
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(
            NullToken::from_raw("-999"),
            vec![NullToken::Text("-999".to_string()), NullToken::Int(-999)]
        );
        assert_eq!(
            NullToken::from_raw("N/A"),
            vec![NullToken::Text("N/A".to_string())]
        );
    }

    #[test]
    fn test_options_builder() {
        let options = SurveyOptions::new()
            .with_thresh(0.8)
            .with_dropna(true)
            .with_fuzzy_null("missing");
        assert_eq!(options.thresh, 0.8);
        assert!(options.dropna);
        assert!(options.fuzzy_null_set().matches_text("missing"));
        assert!(options.validate().is_ok());
        assert!(SurveyOptions::new().with_thresh(1.2).validate().is_err());
    }
}
