//! Error types for the tweet-sentiment library.
//!
//! All fallible operations return [`SentimentError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::error::{SentimentError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SentimentError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tweet-sentiment operations.
///
/// It uses the `thiserror` crate for the `Error` implementation and provides
/// constructor helpers for the string-carrying variants.
#[derive(Error, Debug)]
pub enum SentimentError {
    /// I/O errors (model files, datasets)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `fit` was called with unusable training data.
    #[error("Training error: {0}")]
    Training(String),

    /// A scoring or evaluation method was called before a successful `fit`.
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// Input at the dataset boundary did not have the expected shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Arguments that violate a method's contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SentimentError.
pub type Result<T> = std::result::Result<T, SentimentError>;

impl SentimentError {
    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        SentimentError::Training(msg.into())
    }

    /// Create a new not-fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        SentimentError::NotFitted(msg.into())
    }

    /// Create a new malformed input error.
    pub fn malformed_input<S: Into<String>>(msg: S) -> Self {
        SentimentError::MalformedInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SentimentError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SentimentError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SentimentError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SentimentError::Other(msg.into())
    }
}
