//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by a tokenizer and return a new
//! stream, removing or marking tokens along the way.
//!
//! # Available Filters
//!
//! - [`stop::StopFilter`] - Removes stop words, with a protected exception set
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::analysis::token_filter::Filter;
//! use tweet_sentiment::analysis::token_filter::stop::StopFilter;
//! use tweet_sentiment::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["the"]);
//! let tokens = vec![Token::new("the", 0), Token::new("movie", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "movie");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod stop;
