//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the whole input string before it reaches the
//! tokenizer. They run in the order they were added to the pipeline, so
//! later filters see the output of earlier ones.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode lowercasing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::analysis::char_filter::CharFilter;
//! use tweet_sentiment::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"\d+", "").unwrap();
//! assert_eq!(filter.filter("top 10 list"), "top  list");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
