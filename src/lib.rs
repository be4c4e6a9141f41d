//! # tweet-sentiment
//!
//! Sentiment classification for tweets with multinomial Naive Bayes.
//!
//! ## Features
//!
//! - Tweet normalization pipeline (mentions, URLs, hashtags, digits and
//!   punctuation removed, negations kept)
//! - Laplace-smoothed multinomial Naive Bayes with log-space scoring
//! - Precision, recall, F1 and confusion matrix reporting
//! - Sentiment140 CSV loading, balancing and train/test splitting
//! - JSON model persistence and a command line interface

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod model;
pub mod training;

pub mod prelude {
    pub use crate::analysis::normalizer::{NormalizerConfig, TweetNormalizer};
    pub use crate::classification::{
        ClassLabel, ClassProbabilities, ClassificationReport, MultinomialNaiveBayes,
        NaiveBayesConfig, Sentiment, Vocabulary,
    };
    pub use crate::error::{Result, SentimentError};
    pub use crate::inference::{Prediction, SentimentPredictor};
    pub use crate::model::SentimentModel;
    pub use crate::training::{TrainingConfig, TrainingOutcome};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
