//! Stop filter implementation.
//!
//! This module provides a filter that removes common English words that carry
//! no sentiment. A second word set lists exceptions that are never removed,
//! which is how negations ("not", "no", "don't", ...) survive filtering: the
//! effective stop set is `stop words − exceptions`, computed once when the
//! filter is built.
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::analysis::token_filter::Filter;
//! use tweet_sentiment::analysis::token_filter::stop::StopFilter;
//! use tweet_sentiment::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["i", "do", "not"]).with_exceptions(vec!["not"]);
//! let tokens = vec![
//!     Token::new("i", 0),
//!     Token::new("do", 1),
//!     Token::new("not", 2),
//!     Token::new("care", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "not");
//! assert_eq!(result[1].text, "care");
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further",
    "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll",
    "he's", "her", "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's",
    "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its",
    "itself", "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't",
    "so", "some", "such", "than", "that", "that's", "the", "their", "theirs", "them",
    "themselves", "then", "there", "there's", "these", "they", "they'd", "they'll", "they're",
    "they've", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "wasn't", "we", "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's",
    "when", "when's", "where", "where's", "which", "while", "who", "who's", "whom", "why",
    "why's", "with", "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've",
    "your", "yours", "yourself", "yourselves",
];

/// Negation-bearing words that must never be treated as stop words.
///
/// Contracted forms are listed both with and without the apostrophe since
/// punctuation stripping happens before stop word removal.
const DEFAULT_NEGATION_EXCEPTIONS: &[&str] = &[
    "no", "not", "nor", "never", "cannot", "aren't", "arent", "can't", "cant", "couldn't",
    "couldnt", "didn't", "didnt", "doesn't", "doesnt", "don't", "dont", "hadn't", "hadnt",
    "hasn't", "hasnt", "haven't", "havent", "isn't", "isnt", "mustn't", "mustnt", "shan't",
    "shant", "shouldn't", "shouldnt", "wasn't", "wasnt", "weren't", "werent", "won't", "wont",
    "wouldn't", "wouldnt",
];

/// Default English stop words as a set.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<BTreeSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// Default negation exceptions as a set.
pub static DEFAULT_NEGATION_EXCEPTIONS_SET: LazyLock<BTreeSet<String>> = LazyLock::new(|| {
    DEFAULT_NEGATION_EXCEPTIONS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// The filter can either remove stop words entirely or mark them as stopped
/// while keeping them in the stream. Words listed as exceptions are never
/// considered stop words, even if they appear in the stop word list.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// Stop words as configured, before exceptions are applied
    stop_words: Arc<HashSet<String>>,
    /// Words that are never stopped
    exceptions: Arc<HashSet<String>>,
    /// `stop_words − exceptions`
    effective: Arc<HashSet<String>>,
    /// Whether to remove stopped tokens entirely or just mark them as stopped
    remove_stopped: bool,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words and the
    /// default negation exceptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweet_sentiment::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::new();
    /// assert!(filter.is_stop_word("the"));
    /// assert!(!filter.is_stop_word("not"));
    /// assert!(!filter.is_stop_word("happy"));
    /// ```
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.iter().cloned().collect())
            .with_exceptions(DEFAULT_NEGATION_EXCEPTIONS_SET.iter().cloned())
    }

    /// Create a new stop filter with custom stop words and no exceptions.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        let stop_words = Arc::new(stop_words);
        StopFilter {
            effective: Arc::clone(&stop_words),
            stop_words,
            exceptions: Arc::new(HashSet::new()),
            remove_stopped: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweet_sentiment::analysis::token_filter::stop::StopFilter;
    ///
    /// let filter = StopFilter::from_words(vec!["foo", "bar", "baz"]);
    /// assert_eq!(filter.len(), 3);
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Replace the exception set and recompute the effective stop words.
    pub fn with_exceptions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let exceptions: HashSet<String> = words.into_iter().map(|s| s.into()).collect();
        let effective = self
            .stop_words
            .iter()
            .filter(|word| !exceptions.contains(*word))
            .cloned()
            .collect();

        self.exceptions = Arc::new(exceptions);
        self.effective = Arc::new(effective);
        self
    }

    /// Set whether to remove stopped tokens entirely or just mark them as stopped.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check if a word is removed by this filter.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.effective.contains(word)
    }

    /// Check if a word is protected from removal.
    pub fn is_exception(&self, word: &str) -> bool {
        self.exceptions.contains(word)
    }

    /// Number of words this filter actually removes.
    pub fn len(&self) -> usize {
        self.effective.len()
    }

    /// Check if the effective stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.effective.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|token| {
                if token.is_stopped() {
                    Some(token)
                } else if self.is_stop_word(&token.text) {
                    if self.remove_stopped {
                        None
                    } else {
                        Some(token.stop())
                    }
                } else {
                    Some(token)
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
