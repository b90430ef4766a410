//! placeholder detection
//!
//! A placeholder is a string scalar matching a configured pattern, with the
//! lookup key in the pattern's single capture group. The default pattern
//! wraps the key in tilde characters, for example: `~hello~`.
//!
//! The compiled pattern is passed around explicitly; there is no global
//! pattern state.
use crate::value::Value;

/// Pattern used when the user does not supply one
pub const DEFAULT_PATTERN: &str = "~(.*?)~";

/// A compiled placeholder pattern with exactly one capture group
#[derive(Debug, Clone)]
pub struct PlaceholderPattern {
    regex: regex::Regex,
}

impl PlaceholderPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = regex::Regex::new(pattern)?;

        // captures_len counts the implicit whole-match group
        let explicit_groups = regex.captures_len() - 1;
        if explicit_groups != 1 {
            return Err(PatternError::CaptureGroups {
                found: explicit_groups,
            });
        }

        Ok(Self { regex })
    }

    /// Extract the lookup key if `value` is a placeholder
    ///
    /// Non-string values and strings that do not match the pattern are not
    /// placeholders.
    pub fn key_for<'v>(&self, value: &'v Value) -> Option<&'v str> {
        let text = value.as_str()?;
        let captures = self.regex.captures(text)?;

        captures.get(1).map(|group| group.as_str())
    }
}

impl Default for PlaceholderPattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).expect("default pattern must compile")
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    #[error("invalid placeholder pattern")]
    Invalid(#[from] regex::Error),
    #[error("placeholder pattern must contain exactly one capture group, found {found}")]
    CaptureGroups { found: usize },
}
