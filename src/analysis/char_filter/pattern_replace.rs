use std::fmt;

use regex::Regex;

use super::CharFilter;
use crate::error::{Result, SentimentError};

/// A char filter that replaces every match of a regex pattern.
///
/// With an empty replacement this removes the matched text, which is how
/// mentions, URLs, hashtags, digits and punctuation are stripped from tweets.
#[derive(Clone)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| SentimentError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// Create a filter that deletes every match of `pattern`.
    pub fn remove(pattern: &str) -> Result<Self> {
        Self::new(pattern, "")
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        // `NoExpand` keeps `$` in the replacement literal.
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

impl fmt::Debug for PatternReplaceCharFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternReplaceCharFilter")
            .field("pattern", &self.pattern.as_str())
            .field("replacement", &self.replacement)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_remove_pattern() {
        let filter = PatternReplaceCharFilter::remove(r"-").unwrap();
        assert_eq!(filter.filter("123-456-789"), "123456789");
    }

    #[test]
    fn test_replacement_is_literal() {
        let filter = PatternReplaceCharFilter::new(r"x", "$1").unwrap();
        assert_eq!(filter.filter("axb"), "a$1b");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternReplaceCharFilter::new(r"(unclosed", "");
        assert!(matches!(result, Err(SentimentError::Analysis(_))));
    }
}
