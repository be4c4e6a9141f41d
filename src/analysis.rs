//! Text analysis module.
//!
//! This module turns raw tweet text into the token sequences the classifier
//! consumes. Processing is organised as a pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Tokens
//! ```
//!
//! [`normalizer::TweetNormalizer`] assembles the pipeline used for sentiment
//! classification.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
