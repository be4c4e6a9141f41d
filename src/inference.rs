//! Sentiment prediction for raw text.
//!
//! # Examples
//!
//! ```no_run
//! use tweet_sentiment::inference::SentimentPredictor;
//!
//! let predictor = SentimentPredictor::from_path("models/model.json").unwrap();
//! let prediction = predictor.predict("I love this new phone!").unwrap();
//! println!("{} ({:.4})", prediction.label, prediction.confidence);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classification::types::{ClassLabel, ClassProbabilities};
use crate::error::Result;
use crate::model::SentimentModel;

/// Result of classifying one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Name of the predicted class.
    pub label: String,
    /// Numeric id of the predicted class.
    pub class: ClassLabel,
    /// Probability per class name.
    pub probabilities: BTreeMap<String, f64>,
    /// Probability of the predicted class.
    pub confidence: f64,
    /// Tokens the text was reduced to.
    pub tokens: Vec<String>,
}

/// Normalizes text and scores it against a trained model.
#[derive(Debug, Clone)]
pub struct SentimentPredictor {
    model: SentimentModel,
}

impl SentimentPredictor {
    pub fn new(model: SentimentModel) -> Self {
        Self { model }
    }

    /// Load a model saved with [`SentimentModel::save`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(SentimentModel::load(path)?))
    }

    pub fn model(&self) -> &SentimentModel {
        &self.model
    }

    /// Classify a single text.
    ///
    /// Texts that normalize to no tokens are still scored; the result then
    /// reflects the class priors alone.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let tokens = self.model.normalizer().normalize(text)?;
        let probabilities = self
            .model
            .classifier()
            .predict_proba(std::slice::from_ref(&tokens))?;

        Ok(self.to_prediction(tokens, probabilities.into_iter().next().unwrap_or_default()))
    }

    /// Classify several texts, scoring them in parallel.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Prediction>> {
        let documents = texts
            .iter()
            .map(|text| self.model.normalizer().normalize(text.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let probabilities = self.model.classifier().predict_proba_par(&documents)?;

        Ok(documents
            .into_iter()
            .zip(probabilities)
            .map(|(tokens, distribution)| self.to_prediction(tokens, distribution))
            .collect())
    }

    fn to_prediction(&self, tokens: Vec<String>, distribution: ClassProbabilities) -> Prediction {
        // Ascending iteration with a strict comparison keeps the smallest
        // class on ties, matching the estimator's `predict`.
        let mut best: Option<(ClassLabel, f64)> = None;
        for (&class, &probability) in &distribution {
            if best.is_none_or(|(_, top)| probability > top) {
                best = Some((class, probability));
            }
        }
        let (class, confidence) = best.unwrap_or((0, 0.0));

        let metadata = self.model.metadata();
        Prediction {
            label: metadata.label_of(class),
            class,
            probabilities: distribution
                .iter()
                .map(|(&class, &probability)| (metadata.label_of(class), probability))
                .collect(),
            confidence,
            tokens,
        }
    }
}
