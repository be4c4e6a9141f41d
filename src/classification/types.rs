//! Common types for classification.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

/// Class identifier. Classes are iterated and tie-broken in ascending order.
pub type ClassLabel = u32;

/// Probability per class for one document, keyed in ascending class order.
pub type ClassProbabilities = BTreeMap<ClassLabel, f64>;

/// Sentiment classes of the tweet task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Negative sentiment, class 0.
    Negative,
    /// Positive sentiment, class 1.
    Positive,
}

impl Sentiment {
    /// Every sentiment in class order.
    pub const ALL: [Sentiment; 2] = [Sentiment::Negative, Sentiment::Positive];

    /// Class label used by the estimator.
    pub fn class(self) -> ClassLabel {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        }
    }

    /// Map an estimator class back to a sentiment.
    pub fn from_class(class: ClassLabel) -> Result<Self> {
        match class {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Positive),
            other => Err(SentimentError::invalid_argument(format!(
                "unknown sentiment class {other}"
            ))),
        }
    }

    /// Class labels of every sentiment, ascending.
    pub fn classes() -> Vec<ClassLabel> {
        Self::ALL.iter().map(|sentiment| sentiment.class()).collect()
    }
}

impl From<Sentiment> for ClassLabel {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.class()
    }
}

impl TryFrom<ClassLabel> for Sentiment {
    type Error = SentimentError;

    fn try_from(class: ClassLabel) -> Result<Self> {
        Sentiment::from_class(class)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
