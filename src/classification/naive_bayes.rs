//! Multinomial Naive Bayes estimator.
//!
//! Training estimates class priors from label frequencies and a
//! Laplace-smoothed conditional probability for every (class, vocabulary
//! token) pair:
//!
//! ```text
//! P(token | class) = (count(token, class) + alpha) / (total(class) + alpha * |V|)
//! ```
//!
//! The table is fully materialized at `fit` time so scoring a document costs
//! O(document length). Tokens outside the vocabulary get the smoothed
//! probability of an unseen token, `alpha / (total(class) + alpha * |V|)`.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classification::metrics::{self, ClassificationReport};
use crate::classification::scorer::{argmax, normalize_log_scores};
use crate::classification::types::{ClassLabel, ClassProbabilities, Sentiment};
use crate::classification::vocabulary::Vocabulary;
use crate::error::{Result, SentimentError};

/// Configuration for [`MultinomialNaiveBayes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive smoothing constant. Must be finite and positive.
    pub alpha: f64,
    /// Minimum corpus frequency for a token to enter the vocabulary.
    pub min_count: usize,
    /// Classes that must each have at least one training example.
    ///
    /// When non-empty, labels outside this set are rejected as well. When
    /// empty, the classes are whatever `fit` observes.
    pub expected_classes: Vec<ClassLabel>,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            min_count: 1,
            expected_classes: Sentiment::classes(),
        }
    }
}

impl NaiveBayesConfig {
    /// Check that the configuration can be used for training.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SentimentError::invalid_config(format!(
                "alpha must be a positive finite number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Learned parameters. Written once by `fit`, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FittedSnapshot", into = "FittedSnapshot")]
struct FittedModel {
    alpha: f64,
    /// Ascending.
    classes: Vec<ClassLabel>,
    class_priors: Vec<f64>,
    vocabulary: Vocabulary,
    /// `[class][term]`
    token_counts: Vec<Vec<u64>>,
    total_counts: Vec<u64>,
    /// `[class][term]`, derived from the counts.
    feature_probs: Vec<Vec<f64>>,
    /// Per class, derived from the counts.
    unseen_probs: Vec<f64>,
}

impl FittedModel {
    fn new(
        alpha: f64,
        classes: Vec<ClassLabel>,
        class_priors: Vec<f64>,
        vocabulary: Vocabulary,
        token_counts: Vec<Vec<u64>>,
        total_counts: Vec<u64>,
    ) -> Self {
        let vocabulary_size = vocabulary.len() as f64;
        let mut feature_probs = Vec::with_capacity(classes.len());
        let mut unseen_probs = Vec::with_capacity(classes.len());

        for (counts, &total) in token_counts.iter().zip(&total_counts) {
            let denominator = total as f64 + alpha * vocabulary_size;
            feature_probs.push(
                counts
                    .iter()
                    .map(|&count| (count as f64 + alpha) / denominator)
                    .collect(),
            );
            unseen_probs.push(alpha / denominator);
        }

        Self {
            alpha,
            classes,
            class_priors,
            vocabulary,
            token_counts,
            total_counts,
            feature_probs,
            unseen_probs,
        }
    }

    fn class_index(&self, class: ClassLabel) -> Option<usize> {
        self.classes.binary_search(&class).ok()
    }

    fn log_scores<S: AsRef<str>>(&self, document: &[S]) -> Vec<f64> {
        let term_indices: Vec<Option<usize>> = document
            .iter()
            .map(|token| self.vocabulary.index_of(token.as_ref()))
            .collect();

        (0..self.classes.len())
            .map(|class_idx| {
                let probs = &self.feature_probs[class_idx];
                let unseen = self.unseen_probs[class_idx].ln();
                term_indices.iter().fold(
                    self.class_priors[class_idx].ln(),
                    |score, term_idx| match term_idx {
                        Some(term_idx) => score + probs[*term_idx].ln(),
                        None => score + unseen,
                    },
                )
            })
            .collect()
    }

    fn probabilities<S: AsRef<str>>(&self, document: &[S]) -> Vec<f64> {
        normalize_log_scores(&self.log_scores(document))
    }

    fn class_probabilities<S: AsRef<str>>(&self, document: &[S]) -> ClassProbabilities {
        self.classes
            .iter()
            .copied()
            .zip(self.probabilities(document))
            .collect()
    }

    fn predict_one<S: AsRef<str>>(&self, document: &[S]) -> ClassLabel {
        // Classes are ascending, so ties resolve to the smallest label.
        let best = argmax(&self.probabilities(document)).unwrap_or(0);
        self.classes[best]
    }
}

/// Persisted form of [`FittedModel`]: counts only, the table is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FittedSnapshot {
    alpha: f64,
    classes: Vec<ClassLabel>,
    class_priors: Vec<f64>,
    vocabulary: Vocabulary,
    /// Non-zero counts per class, in class order.
    token_counts: Vec<BTreeMap<String, u64>>,
    total_counts: Vec<u64>,
}

impl From<FittedModel> for FittedSnapshot {
    fn from(model: FittedModel) -> Self {
        let token_counts = model
            .token_counts
            .iter()
            .map(|counts| {
                counts
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0)
                    .map(|(idx, &count)| (model.vocabulary.terms()[idx].clone(), count))
                    .collect()
            })
            .collect();

        Self {
            alpha: model.alpha,
            classes: model.classes,
            class_priors: model.class_priors,
            vocabulary: model.vocabulary,
            token_counts,
            total_counts: model.total_counts,
        }
    }
}

impl TryFrom<FittedSnapshot> for FittedModel {
    type Error = SentimentError;

    fn try_from(snapshot: FittedSnapshot) -> Result<Self> {
        if !snapshot.alpha.is_finite() || snapshot.alpha <= 0.0 {
            return Err(SentimentError::malformed_input(format!(
                "stored alpha {} is not a positive finite number",
                snapshot.alpha
            )));
        }
        let class_count = snapshot.classes.len();
        if class_count == 0
            || snapshot.class_priors.len() != class_count
            || snapshot.token_counts.len() != class_count
            || snapshot.total_counts.len() != class_count
        {
            return Err(SentimentError::malformed_input(
                "stored classes, priors and counts differ in length",
            ));
        }
        if snapshot.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SentimentError::malformed_input(
                "stored classes are not strictly ascending",
            ));
        }
        if snapshot
            .class_priors
            .iter()
            .any(|prior| !prior.is_finite() || *prior <= 0.0)
        {
            return Err(SentimentError::malformed_input(
                "stored class priors must be positive",
            ));
        }
        if snapshot.vocabulary.is_empty() {
            return Err(SentimentError::malformed_input("stored vocabulary is empty"));
        }

        let mut token_counts = Vec::with_capacity(class_count);
        for (sparse, &total) in snapshot.token_counts.iter().zip(&snapshot.total_counts) {
            let mut dense = vec![0u64; snapshot.vocabulary.len()];
            for (term, &count) in sparse {
                let idx = snapshot.vocabulary.index_of(term).ok_or_else(|| {
                    SentimentError::malformed_input(format!(
                        "stored count for '{term}' which is not in the vocabulary"
                    ))
                })?;
                dense[idx] = count;
            }
            if dense.iter().sum::<u64>() != total {
                return Err(SentimentError::malformed_input(
                    "stored per-class totals do not match the token counts",
                ));
            }
            token_counts.push(dense);
        }

        Ok(FittedModel::new(
            snapshot.alpha,
            snapshot.classes,
            snapshot.class_priors,
            snapshot.vocabulary,
            token_counts,
            snapshot.total_counts,
        ))
    }
}

/// Multinomial Naive Bayes classifier over token documents.
///
/// Documents are slices of tokens; anything that is `AsRef<[S]>` with
/// `S: AsRef<str>` works, e.g. `Vec<String>` or `Vec<&str>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultinomialNaiveBayes {
    config: NaiveBayesConfig,
    model: Option<FittedModel>,
}

impl MultinomialNaiveBayes {
    /// Create an unfitted classifier with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfitted classifier with the given configuration.
    pub fn with_config(config: NaiveBayesConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Check whether `fit` has completed successfully.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn fitted(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or_else(|| {
            SentimentError::not_fitted("call fit before scoring or evaluating documents")
        })
    }

    /// Train on tokenized documents and their class labels.
    ///
    /// Replaces any previously fitted parameters. On error the previous
    /// parameters are left untouched.
    pub fn fit<D, S>(&mut self, documents: &[D], labels: &[ClassLabel]) -> Result<()>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.config.validate()?;

        if documents.len() != labels.len() {
            return Err(SentimentError::training(format!(
                "got {} documents but {} labels",
                documents.len(),
                labels.len()
            )));
        }
        if documents.is_empty() {
            return Err(SentimentError::training("no training documents"));
        }

        let mut class_documents: BTreeMap<ClassLabel, usize> = BTreeMap::new();
        for &label in labels {
            *class_documents.entry(label).or_insert(0) += 1;
        }

        if !self.config.expected_classes.is_empty() {
            if let Some(unknown) = class_documents
                .keys()
                .find(|label| !self.config.expected_classes.contains(*label))
            {
                return Err(SentimentError::training(format!(
                    "label {unknown} is not one of the expected classes {:?}",
                    self.config.expected_classes
                )));
            }
            if let Some(missing) = self
                .config
                .expected_classes
                .iter()
                .find(|class| !class_documents.contains_key(*class))
            {
                return Err(SentimentError::training(format!(
                    "class {missing} has no training examples"
                )));
            }
        }

        let vocabulary = Vocabulary::build(documents, self.config.min_count);
        if vocabulary.is_empty() {
            return Err(SentimentError::training(format!(
                "vocabulary is empty (min_count = {})",
                self.config.min_count
            )));
        }

        let classes: Vec<ClassLabel> = class_documents.keys().copied().collect();
        let total_documents = documents.len() as f64;
        let class_priors: Vec<f64> = class_documents
            .values()
            .map(|&count| count as f64 / total_documents)
            .collect();

        let mut token_counts = vec![vec![0u64; vocabulary.len()]; classes.len()];
        let mut total_counts = vec![0u64; classes.len()];
        for (document, label) in documents.iter().zip(labels) {
            // Every label is a key of `class_documents`, hence in `classes`.
            let Ok(class_idx) = classes.binary_search(label) else {
                continue;
            };
            for token in document.as_ref() {
                if let Some(term_idx) = vocabulary.index_of(token.as_ref()) {
                    token_counts[class_idx][term_idx] += 1;
                    total_counts[class_idx] += 1;
                }
            }
        }

        debug!(
            "fitted naive bayes: {} documents, classes {:?}, vocabulary {}, tokens per class {:?}",
            documents.len(),
            classes,
            vocabulary.len(),
            total_counts
        );

        self.model = Some(FittedModel::new(
            self.config.alpha,
            classes,
            class_priors,
            vocabulary,
            token_counts,
            total_counts,
        ));

        Ok(())
    }

    /// Probability of every class for each document.
    pub fn predict_proba<D, S>(&self, documents: &[D]) -> Result<Vec<ClassProbabilities>>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let model = self.fitted()?;
        Ok(documents
            .iter()
            .map(|document| model.class_probabilities(document.as_ref()))
            .collect())
    }

    /// Same as [`predict_proba`](Self::predict_proba), scoring documents in
    /// parallel against the fitted parameters.
    pub fn predict_proba_par<D, S>(&self, documents: &[D]) -> Result<Vec<ClassProbabilities>>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        let model = self.fitted()?;
        Ok(documents
            .par_iter()
            .map(|document| model.class_probabilities(document.as_ref()))
            .collect())
    }

    /// Most probable class for each document; ties go to the smallest label.
    pub fn predict<D, S>(&self, documents: &[D]) -> Result<Vec<ClassLabel>>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let model = self.fitted()?;
        Ok(documents
            .iter()
            .map(|document| model.predict_one(document.as_ref()))
            .collect())
    }

    /// Fraction of documents whose predicted class matches `labels`.
    ///
    /// An empty document set scores 0.0.
    pub fn score<D, S>(&self, documents: &[D], labels: &[ClassLabel]) -> Result<f64>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let predictions = self.predict(documents)?;
        if predictions.len() != labels.len() {
            return Err(SentimentError::invalid_argument(format!(
                "got {} documents but {} labels",
                predictions.len(),
                labels.len()
            )));
        }
        if predictions.is_empty() {
            return Ok(0.0);
        }

        let correct = predictions
            .iter()
            .zip(labels)
            .filter(|(predicted, truth)| predicted == truth)
            .count();
        Ok(correct as f64 / predictions.len() as f64)
    }

    /// Per-class precision/recall/F1, macro averages and confusion matrix.
    pub fn get_metrics<D, S>(
        &self,
        documents: &[D],
        labels: &[ClassLabel],
    ) -> Result<ClassificationReport>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let predictions = self.predict(documents)?;
        metrics::evaluate(&self.fitted()?.classes, labels, &predictions)
    }

    /// Classes seen during training, ascending.
    pub fn classes(&self) -> Result<&[ClassLabel]> {
        Ok(&self.fitted()?.classes)
    }

    /// Prior probability of each class.
    pub fn class_priors(&self) -> Result<BTreeMap<ClassLabel, f64>> {
        let model = self.fitted()?;
        Ok(model
            .classes
            .iter()
            .copied()
            .zip(model.class_priors.iter().copied())
            .collect())
    }

    /// The fitted vocabulary.
    pub fn vocabulary(&self) -> Result<&Vocabulary> {
        Ok(&self.fitted()?.vocabulary)
    }

    /// Alpha the current parameters were fitted with.
    pub fn alpha(&self) -> Result<f64> {
        Ok(self.fitted()?.alpha)
    }

    /// Number of vocabulary tokens counted for `class` during training.
    pub fn total_count(&self, class: ClassLabel) -> Result<Option<u64>> {
        let model = self.fitted()?;
        Ok(model
            .class_index(class)
            .map(|class_idx| model.total_counts[class_idx]))
    }

    /// Training count of `token` within `class`.
    pub fn token_count(&self, class: ClassLabel, token: &str) -> Result<Option<u64>> {
        let model = self.fitted()?;
        Ok(model.class_index(class).map(|class_idx| {
            model
                .vocabulary
                .index_of(token)
                .map_or(0, |term_idx| model.token_counts[class_idx][term_idx])
        }))
    }

    /// `P(token | class)` from the table; `None` for unknown classes or
    /// tokens outside the vocabulary.
    pub fn conditional_probability(&self, class: ClassLabel, token: &str) -> Result<Option<f64>> {
        let model = self.fitted()?;
        Ok(model.class_index(class).and_then(|class_idx| {
            model
                .vocabulary
                .index_of(token)
                .map(|term_idx| model.feature_probs[class_idx][term_idx])
        }))
    }

    /// Smoothed probability given to tokens outside the vocabulary.
    pub fn unseen_probability(&self, class: ClassLabel) -> Result<Option<f64>> {
        let model = self.fitted()?;
        Ok(model
            .class_index(class)
            .map(|class_idx| model.unseen_probs[class_idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn toy_model() -> MultinomialNaiveBayes {
        let documents = vec![vec!["good", "great"], vec!["bad", "bad"]];
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &[1, 0]).unwrap();
        model
    }

    fn corpus() -> (Vec<Vec<&'static str>>, Vec<ClassLabel>) {
        let documents = vec![
            vec!["love", "sunny", "day"],
            vec!["great", "fun", "love"],
            vec!["happy", "happy", "friends"],
            vec!["hate", "rain"],
            vec!["awful", "day", "bad"],
            vec!["bad", "sad", "tired"],
            vec!["dont", "like", "traffic"],
        ];
        let labels = vec![1, 1, 1, 0, 0, 0, 0];
        (documents, labels)
    }

    #[test]
    fn test_priors_and_direction_on_toy_corpus() {
        let model = toy_model();

        let priors = model.class_priors().unwrap();
        assert_eq!(priors.len(), 2);
        assert!((priors[&0] - 0.5).abs() < TOLERANCE);
        assert!((priors[&1] - 0.5).abs() < TOLERANCE);

        let probabilities = model.predict_proba(&[vec!["good"]]).unwrap();
        assert!(probabilities[0][&1] > probabilities[0][&0]);
        assert_eq!(model.predict(&[vec!["good"]]).unwrap(), vec![1]);
        assert_eq!(model.predict(&[vec!["bad"]]).unwrap(), vec![0]);
    }

    #[test]
    fn test_laplace_table_values() {
        let model = toy_model();
        // |V| = 3 (bad, good, great); both classes hold 2 tokens.
        let p = model.conditional_probability(1, "good").unwrap().unwrap();
        assert!((p - 2.0 / 5.0).abs() < TOLERANCE);
        let p = model.conditional_probability(0, "good").unwrap().unwrap();
        assert!((p - 1.0 / 5.0).abs() < TOLERANCE);
        let p = model.conditional_probability(0, "bad").unwrap().unwrap();
        assert!((p - 3.0 / 5.0).abs() < TOLERANCE);
        assert_eq!(model.conditional_probability(0, "meh").unwrap(), None);
        assert_eq!(model.token_count(0, "bad").unwrap(), Some(2));
        assert_eq!(model.total_count(1).unwrap(), Some(2));
    }

    #[test]
    fn test_conditional_probabilities_in_open_unit_interval() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        for &class in model.classes().unwrap() {
            let mut row_sum = 0.0;
            for term in model.vocabulary().unwrap().iter() {
                let p = model.conditional_probability(class, term).unwrap().unwrap();
                assert!(p > 0.0 && p < 1.0, "P({term}|{class}) = {p}");
                row_sum += p;
            }
            assert!((row_sum - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_priors_sum_to_one() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        let total: f64 = model.class_priors().unwrap().values().sum();
        assert!((total - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_predict_proba_sums_to_one_and_is_idempotent() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        let queries = vec![
            vec!["love", "day"],
            vec![],
            vec!["unknown", "words", "only"],
            vec!["bad"; 5_000],
        ];
        let first = model.predict_proba(&queries).unwrap();
        let second = model.predict_proba(&queries).unwrap();
        assert_eq!(first, second);

        for distribution in &first {
            let total: f64 = distribution.values().sum();
            assert!((total - 1.0).abs() < TOLERANCE);
            assert!(distribution.values().all(|p| p.is_finite()));
        }
        // A very long document saturates rather than producing NaN.
        assert!(first[3][&0] > 0.999);
    }

    #[test]
    fn test_unseen_token_does_not_fail() {
        let model = toy_model();
        for class in [0, 1] {
            let p = model.unseen_probability(class).unwrap().unwrap();
            assert!(p > 0.0);
            assert!((p - 1.0 / 5.0).abs() < TOLERANCE);
        }

        let probabilities = model.predict_proba(&[vec!["zyzzyva"]]).unwrap();
        assert!((probabilities[0][&0] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_ties_break_to_smallest_class() {
        let model = toy_model();
        // Equal priors and an unseen token give a perfect tie.
        assert_eq!(model.predict(&[vec!["zyzzyva"]]).unwrap(), vec![0]);
        assert_eq!(model.predict(&[Vec::<&str>::new()]).unwrap(), vec![0]);
    }

    #[test]
    fn test_missing_class_is_rejected() {
        let mut model = MultinomialNaiveBayes::new();
        let result = model.fit(&[vec!["good"], vec!["great"]], &[1, 1]);
        assert!(matches!(result, Err(SentimentError::Training(_))));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_unexpected_label_is_rejected() {
        let mut model = MultinomialNaiveBayes::new();
        let result = model.fit(&[vec!["good"], vec!["bad"], vec!["meh"]], &[1, 0, 4]);
        assert!(matches!(result, Err(SentimentError::Training(_))));
    }

    #[test]
    fn test_mismatched_and_empty_inputs_are_rejected() {
        let mut model = MultinomialNaiveBayes::new();
        let result = model.fit(&[vec!["good"]], &[1, 0]);
        assert!(matches!(result, Err(SentimentError::Training(_))));

        let empty: Vec<Vec<String>> = Vec::new();
        let result = model.fit(&empty, &[]);
        assert!(matches!(result, Err(SentimentError::Training(_))));

        let blank: Vec<Vec<String>> = vec![vec![], vec![]];
        let result = model.fit(&blank, &[0, 1]);
        assert!(matches!(result, Err(SentimentError::Training(_))));
    }

    #[test]
    fn test_failed_fit_keeps_previous_parameters() {
        let mut model = toy_model();
        let before = model.class_priors().unwrap();
        assert!(model.fit(&[vec!["x"]], &[1]).is_err());
        assert_eq!(model.class_priors().unwrap(), before);
    }

    #[test]
    fn test_refit_replaces_parameters() {
        let mut model = toy_model();
        model
            .fit(&[vec!["sun"], vec!["rain"], vec!["sun"]], &[1, 0, 1])
            .unwrap();

        assert!(!model.vocabulary().unwrap().contains("good"));
        let priors = model.class_priors().unwrap();
        assert!((priors[&1] - 2.0 / 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_generic_classes_without_expectations() {
        let config = NaiveBayesConfig {
            expected_classes: Vec::new(),
            ..NaiveBayesConfig::default()
        };
        let mut model = MultinomialNaiveBayes::with_config(config);
        model
            .fit(
                &[vec!["goal"], vec!["vote"], vec!["match", "goal"]],
                &[7, 3, 7],
            )
            .unwrap();

        assert_eq!(model.classes().unwrap(), &[3, 7]);
        assert_eq!(model.predict(&[vec!["goal"]]).unwrap(), vec![7]);
    }

    #[test]
    fn test_min_count_treats_rare_tokens_as_unseen() {
        let config = NaiveBayesConfig {
            min_count: 2,
            ..NaiveBayesConfig::default()
        };
        let mut model = MultinomialNaiveBayes::with_config(config);
        model
            .fit(&[vec!["good", "rare"], vec!["bad"], vec!["good", "bad"]], &[1, 0, 1])
            .unwrap();

        assert_eq!(model.vocabulary().unwrap().terms(), ["bad", "good"]);
        assert_eq!(model.conditional_probability(1, "rare").unwrap(), None);
        // Only in-vocabulary tokens are counted.
        assert_eq!(model.total_count(1).unwrap(), Some(3));
    }

    #[test]
    fn test_invalid_alpha() {
        for alpha in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = NaiveBayesConfig {
                alpha,
                ..NaiveBayesConfig::default()
            };
            let mut model = MultinomialNaiveBayes::with_config(config);
            let result = model.fit(&[vec!["good"], vec!["bad"]], &[1, 0]);
            assert!(matches!(result, Err(SentimentError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_not_fitted_errors() {
        let model = MultinomialNaiveBayes::new();
        let documents = vec![vec!["good"]];

        assert!(matches!(
            model.predict_proba(&documents),
            Err(SentimentError::NotFitted(_))
        ));
        assert!(matches!(
            model.predict(&documents),
            Err(SentimentError::NotFitted(_))
        ));
        assert!(matches!(
            model.score(&documents, &[1]),
            Err(SentimentError::NotFitted(_))
        ));
        assert!(matches!(
            model.get_metrics(&documents, &[1]),
            Err(SentimentError::NotFitted(_))
        ));
        assert!(matches!(model.classes(), Err(SentimentError::NotFitted(_))));
    }

    #[test]
    fn test_score() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        assert_eq!(model.score(&documents, &labels).unwrap(), 1.0);
        let flipped: Vec<ClassLabel> = labels.iter().map(|label| 1 - label).collect();
        assert_eq!(model.score(&documents, &flipped).unwrap(), 0.0);
        assert!(model.score(&documents, &labels[..2]).is_err());

        let empty: Vec<Vec<String>> = Vec::new();
        assert_eq!(model.score(&empty, &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_perfect_metrics() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        let report = model.get_metrics(&documents, &labels).unwrap();
        for metrics in report.per_class.values() {
            assert_eq!(metrics.precision, 1.0);
            assert_eq!(metrics.recall, 1.0);
            assert_eq!(metrics.f1_score, 1.0);
        }
        assert!(report.confusion_matrix.is_diagonal());
        assert_eq!(report.confusion_matrix.get(0, 0), Some(4));
        assert_eq!(report.confusion_matrix.get(1, 1), Some(3));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        assert_eq!(
            model.predict_proba(&documents).unwrap(),
            model.predict_proba_par(&documents).unwrap()
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let (documents, labels) = corpus();
        let mut model = MultinomialNaiveBayes::new();
        model.fit(&documents, &labels).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: MultinomialNaiveBayes = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.classes().unwrap(), model.classes().unwrap());
        assert_eq!(restored.class_priors().unwrap(), model.class_priors().unwrap());
        assert_eq!(restored.vocabulary().unwrap(), model.vocabulary().unwrap());
        assert_eq!(restored.alpha().unwrap(), model.alpha().unwrap());
        for &class in model.classes().unwrap() {
            assert_eq!(restored.total_count(class).unwrap(), model.total_count(class).unwrap());
            for term in model.vocabulary().unwrap().iter() {
                assert_eq!(
                    restored.token_count(class, term).unwrap(),
                    model.token_count(class, term).unwrap()
                );
            }
        }
        assert_eq!(
            restored.predict_proba(&documents).unwrap(),
            model.predict_proba(&documents).unwrap()
        );
    }

    #[test]
    fn test_unfitted_serde_round_trip() {
        let json = serde_json::to_string(&MultinomialNaiveBayes::new()).unwrap();
        let restored: MultinomialNaiveBayes = serde_json::from_str(&json).unwrap();
        assert!(!restored.is_fitted());
    }

    #[test]
    fn test_corrupted_snapshot_is_rejected() {
        let model = toy_model();
        let mut value = serde_json::to_value(&model).unwrap();
        value["model"]["total_counts"][0] = serde_json::json!(99);

        let result = serde_json::from_value::<MultinomialNaiveBayes>(value);
        assert!(result.is_err());
    }
}
