//! Lowercase char filter.
//!
//! Case folding runs on the full string before any pattern removal, so
//! patterns such as the retweet marker only need to match lowercase text.

use super::CharFilter;

/// A char filter that converts the whole input to lowercase.
///
/// ASCII-only input takes the cheaper ASCII path; anything else goes through
/// Unicode-aware lowercasing.
///
/// # Examples
///
/// ```
/// use tweet_sentiment::analysis::char_filter::CharFilter;
/// use tweet_sentiment::analysis::char_filter::lowercase::LowercaseCharFilter;
///
/// let filter = LowercaseCharFilter::new();
/// assert_eq!(filter.filter("I LOVE Mondays"), "i love mondays");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
