//! End-to-end training pipeline.
//!
//! load → balance → normalize → split → fit → evaluate on the held-out part.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{NormalizerConfig, TweetNormalizer};
use crate::classification::metrics::ClassificationReport;
use crate::classification::naive_bayes::{MultinomialNaiveBayes, NaiveBayesConfig};
use crate::dataset::{self, LabeledText, Sentiment140Reader};
use crate::error::{Result, SentimentError};
use crate::model::SentimentModel;

/// Configuration for [`train`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of the corpus used for fitting; the rest is the test part.
    pub train_ratio: f64,
    /// Truncate classes to the size of the smallest one before splitting.
    pub balance: bool,
    /// Read at most this many labeled rows.
    pub limit: Option<usize>,
    /// Shuffle with this seed before splitting. `None` keeps file order.
    pub shuffle_seed: Option<u64>,
    pub normalizer: NormalizerConfig,
    pub naive_bayes: NaiveBayesConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            balance: true,
            limit: None,
            shuffle_seed: None,
            normalizer: NormalizerConfig::default(),
            naive_bayes: NaiveBayesConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: TrainingConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.train_ratio > 0.0 && self.train_ratio <= 1.0) {
            return Err(SentimentError::invalid_config(format!(
                "train_ratio must be in (0, 1], got {}",
                self.train_ratio
            )));
        }
        self.naive_bayes.validate()
    }
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: SentimentModel,
    /// Metrics on the test part; `None` when the test part is empty.
    pub report: Option<ClassificationReport>,
    pub train_size: usize,
    pub test_size: usize,
}

/// Train a model from a Sentiment140 CSV file.
pub fn train<P: AsRef<Path>>(dataset_path: P, config: &TrainingConfig) -> Result<TrainingOutcome> {
    config.validate()?;
    let samples = Sentiment140Reader::new()
        .with_limit(config.limit)
        .read_path(dataset_path)?;
    train_on_samples(samples, config)
}

/// Train a model from already loaded samples.
pub fn train_on_samples(
    samples: Vec<LabeledText>,
    config: &TrainingConfig,
) -> Result<TrainingOutcome> {
    config.validate()?;
    let started = Instant::now();

    let samples = if config.balance {
        dataset::balance(samples)
    } else {
        samples
    };

    let normalizer = TweetNormalizer::with_config(config.normalizer.clone())?;
    let preprocess_started = Instant::now();
    let corpus = dataset::preprocess(&samples, &normalizer)?;
    info!(
        "Preprocessing finished in {:.2}s",
        preprocess_started.elapsed().as_secs_f64()
    );

    let (train_part, test_part) = corpus.split(config.train_ratio, config.shuffle_seed)?;
    info!(
        "Training on {} documents, testing on {}",
        train_part.len(),
        test_part.len()
    );

    let fit_started = Instant::now();
    let mut classifier = MultinomialNaiveBayes::with_config(config.naive_bayes.clone());
    classifier.fit(&train_part.documents, &train_part.labels)?;
    info!(
        "Fitted in {:.2}s, vocabulary of {} tokens",
        fit_started.elapsed().as_secs_f64(),
        classifier.vocabulary()?.len()
    );

    let report = if test_part.is_empty() {
        None
    } else {
        Some(classifier.get_metrics(&test_part.documents, &test_part.labels)?)
    };

    let mut validation_metrics = BTreeMap::new();
    if let Some(report) = &report {
        info!("Test accuracy {:.4}", report.accuracy);
        validation_metrics.insert("accuracy".to_string(), report.accuracy);
        validation_metrics.insert("macro_precision".to_string(), report.macro_avg.precision);
        validation_metrics.insert("macro_recall".to_string(), report.macro_avg.recall);
        validation_metrics.insert("macro_f1".to_string(), report.macro_avg.f1_score);
    }

    let model = SentimentModel::new(normalizer, classifier, train_part.len())?
        .with_validation_metrics(validation_metrics);

    info!(
        "Training pipeline finished in {:.2}s",
        started.elapsed().as_secs_f64()
    );

    Ok(TrainingOutcome {
        model,
        report,
        train_size: train_part.len(),
        test_size: test_part.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::types::Sentiment;
    use tempfile::TempDir;

    fn samples() -> Vec<LabeledText> {
        let positive = [
            "I love this sunny day",
            "great game, so happy",
            "love my friends",
            "happy birthday, great party",
            "what a wonderful happy morning",
        ];
        let negative = [
            "I hate rainy days",
            "awful traffic, so sad",
            "hate this bad weather",
            "terrible awful service",
            "sad and tired today",
            "worst day ever, hate it",
        ];
        positive
            .iter()
            .map(|text| LabeledText::new(*text, Sentiment::Positive))
            .chain(
                negative
                    .iter()
                    .map(|text| LabeledText::new(*text, Sentiment::Negative)),
            )
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.train_ratio, 0.8);
        assert!(config.balance);
        assert_eq!(config.naive_bayes.alpha, 1.0);
        assert_eq!(config.naive_bayes.min_count, 1);
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("training.json");
        fs::write(
            &path,
            r#"{"train_ratio": 0.5, "shuffle_seed": 3, "naive_bayes": {"alpha": 0.5}}"#,
        )
        .unwrap();

        let config = TrainingConfig::from_file(&path).unwrap();
        assert_eq!(config.train_ratio, 0.5);
        assert_eq!(config.shuffle_seed, Some(3));
        assert_eq!(config.naive_bayes.alpha, 0.5);
        assert_eq!(config.naive_bayes.min_count, 1);
        assert!(config.balance);

        fs::write(&path, r#"{"train_ratio": 2.0}"#).unwrap();
        assert!(matches!(
            TrainingConfig::from_file(&path),
            Err(SentimentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_train_on_samples() {
        let config = TrainingConfig {
            shuffle_seed: Some(11),
            ..TrainingConfig::default()
        };
        let outcome = train_on_samples(samples(), &config).unwrap();

        // Balanced to 5 + 5, split 8 / 2.
        assert_eq!(outcome.train_size, 8);
        assert_eq!(outcome.test_size, 2);
        assert_eq!(outcome.model.metadata().training_documents, 8);
        assert!(outcome.report.is_some());
        assert!(
            outcome
                .model
                .metadata()
                .validation_metrics
                .contains_key("accuracy")
        );
    }

    #[test]
    fn test_train_without_test_part() {
        let config = TrainingConfig {
            train_ratio: 1.0,
            balance: false,
            ..TrainingConfig::default()
        };
        let outcome = train_on_samples(samples(), &config).unwrap();

        assert_eq!(outcome.train_size, 11);
        assert!(outcome.report.is_none());
        assert!(outcome.model.metadata().validation_metrics.is_empty());
    }

    #[test]
    fn test_single_class_training_fails() {
        let config = TrainingConfig {
            balance: false,
            train_ratio: 1.0,
            ..TrainingConfig::default()
        };
        let only_positive = vec![LabeledText::new("love it", Sentiment::Positive)];
        assert!(matches!(
            train_on_samples(only_positive, &config),
            Err(SentimentError::Training(_))
        ));
    }
}
