//! Trained model bundle and its JSON persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TweetNormalizer;
use crate::classification::naive_bayes::MultinomialNaiveBayes;
use crate::classification::types::{ClassLabel, Sentiment};
use crate::error::{Result, SentimentError};

/// Descriptive information stored alongside a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name.
    pub name: String,
    /// Crate version that produced the model.
    pub version: String,
    /// Training timestamp.
    pub trained_at: DateTime<Utc>,
    /// Number of documents the estimator was fitted on.
    pub training_documents: usize,
    /// Human-readable name of each class.
    pub labels: BTreeMap<ClassLabel, String>,
    /// Metrics measured on the held-out split, if any.
    #[serde(default)]
    pub validation_metrics: BTreeMap<String, f64>,
}

impl ModelMetadata {
    fn new(training_documents: usize) -> Self {
        Self {
            name: "multinomial-naive-bayes".to_string(),
            version: crate::VERSION.to_string(),
            trained_at: Utc::now(),
            training_documents,
            labels: Sentiment::ALL
                .iter()
                .map(|sentiment| (sentiment.class(), sentiment.label().to_string()))
                .collect(),
            validation_metrics: BTreeMap::new(),
        }
    }

    /// Name of `class`, falling back to its number.
    pub fn label_of(&self, class: ClassLabel) -> String {
        self.labels
            .get(&class)
            .cloned()
            .unwrap_or_else(|| class.to_string())
    }
}

/// A fitted estimator together with the normalizer it was trained with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentModel {
    normalizer: TweetNormalizer,
    classifier: MultinomialNaiveBayes,
    metadata: ModelMetadata,
}

impl SentimentModel {
    /// Bundle a fitted classifier with its normalizer.
    pub fn new(
        normalizer: TweetNormalizer,
        classifier: MultinomialNaiveBayes,
        training_documents: usize,
    ) -> Result<Self> {
        if !classifier.is_fitted() {
            return Err(SentimentError::not_fitted(
                "only fitted classifiers can be bundled into a model",
            ));
        }

        Ok(Self {
            normalizer,
            classifier,
            metadata: ModelMetadata::new(training_documents),
        })
    }

    /// Attach held-out metrics to the metadata.
    pub fn with_validation_metrics(mut self, metrics: BTreeMap<String, f64>) -> Self {
        self.metadata.validation_metrics = metrics;
        self
    }

    pub fn normalizer(&self) -> &TweetNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &MultinomialNaiveBayes {
        &self.classifier
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Write the model as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Saved model to {}", path.display());
        Ok(())
    }

    /// Read a model written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let model: SentimentModel = serde_json::from_str(&content).map_err(|e| {
            SentimentError::malformed_input(format!(
                "failed to parse model {}: {e}",
                path.display()
            ))
        })?;

        if !model.classifier.is_fitted() {
            return Err(SentimentError::malformed_input(format!(
                "model {} holds no fitted parameters",
                path.display()
            )));
        }

        info!(
            "Loaded model {} v{} trained at {}",
            model.metadata.name, model.metadata.version, model.metadata.trained_at
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fitted_model() -> SentimentModel {
        let normalizer = TweetNormalizer::new().unwrap();
        let mut classifier = MultinomialNaiveBayes::new();
        classifier
            .fit(&[vec!["love", "sunny"], vec!["hate", "rain"]], &[1, 0])
            .unwrap();
        SentimentModel::new(normalizer, classifier, 2).unwrap()
    }

    #[test]
    fn test_unfitted_classifier_is_rejected() {
        let result = SentimentModel::new(
            TweetNormalizer::new().unwrap(),
            MultinomialNaiveBayes::new(),
            0,
        );
        assert!(matches!(result, Err(SentimentError::NotFitted(_))));
    }

    #[test]
    fn test_metadata_labels() {
        let model = fitted_model();
        assert_eq!(model.metadata().label_of(0), "negative");
        assert_eq!(model.metadata().label_of(1), "positive");
        assert_eq!(model.metadata().label_of(9), "9");
        assert_eq!(model.metadata().training_documents, 2);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models").join("model.json");

        let mut metrics = BTreeMap::new();
        metrics.insert("accuracy".to_string(), 0.75);
        let model = fitted_model().with_validation_metrics(metrics);
        model.save(&path).unwrap();

        let loaded = SentimentModel::load(&path).unwrap();
        assert_eq!(loaded.metadata(), model.metadata());
        assert_eq!(
            loaded.normalizer().config(),
            model.normalizer().config()
        );
        assert_eq!(
            loaded.classifier().class_priors().unwrap(),
            model.classifier().class_priors().unwrap()
        );
        assert_eq!(
            loaded.classifier().predict_proba(&[vec!["love"]]).unwrap(),
            model.classifier().predict_proba(&[vec!["love"]]).unwrap()
        );
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            SentimentModel::load(&path),
            Err(SentimentError::MalformedInput(_))
        ));
        assert!(matches!(
            SentimentModel::load(temp_dir.path().join("missing.json")),
            Err(SentimentError::Io(_))
        ));
    }
}
