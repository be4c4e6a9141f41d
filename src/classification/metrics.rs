//! Classification metrics.
//!
//! Precision, recall and F1 per class, their unweighted (macro) averages,
//! accuracy and a confusion matrix. Any ratio whose denominator is zero is
//! reported as 0.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classification::types::ClassLabel;
use crate::error::{Result, SentimentError};

/// Precision, recall and F1 for a single class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of true instances of the class.
    pub support: usize,
}

impl ClassMetrics {
    fn from_counts(true_positives: usize, false_positives: usize, false_negatives: usize) -> Self {
        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f1_score,
            support: true_positives + false_negatives,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Counts of (actual, predicted) class pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Row and column order, ascending.
    pub classes: Vec<ClassLabel>,
    /// `counts[actual][predicted]`
    pub counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Create an all-zero matrix for the given classes.
    pub fn new(classes: &[ClassLabel]) -> Self {
        let mut classes = classes.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let size = classes.len();

        Self {
            classes,
            counts: vec![vec![0; size]; size],
        }
    }

    fn position(&self, class: ClassLabel) -> Option<usize> {
        self.classes.binary_search(&class).ok()
    }

    /// Record one prediction.
    pub fn record(&mut self, actual: ClassLabel, predicted: ClassLabel) -> Result<()> {
        let row = self.position(actual).ok_or_else(|| {
            SentimentError::invalid_argument(format!("unknown true label {actual}"))
        })?;
        let column = self.position(predicted).ok_or_else(|| {
            SentimentError::invalid_argument(format!("unknown predicted label {predicted}"))
        })?;
        self.counts[row][column] += 1;
        Ok(())
    }

    /// Count for an (actual, predicted) pair, `None` for unknown classes.
    pub fn get(&self, actual: ClassLabel, predicted: ClassLabel) -> Option<usize> {
        let row = self.position(actual)?;
        let column = self.position(predicted)?;
        Some(self.counts[row][column])
    }

    /// Total number of recorded predictions.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Number of correct predictions.
    pub fn correct(&self) -> usize {
        (0..self.classes.len()).map(|idx| self.counts[idx][idx]).sum()
    }

    /// Check whether every recorded prediction is on the diagonal.
    pub fn is_diagonal(&self) -> bool {
        self.counts.iter().enumerate().all(|(row, counts)| {
            counts
                .iter()
                .enumerate()
                .all(|(column, &count)| row == column || count == 0)
        })
    }

    fn class_metrics(&self, idx: usize) -> ClassMetrics {
        let true_positives = self.counts[idx][idx];
        let predicted: usize = self.counts.iter().map(|row| row[idx]).sum();
        let actual: usize = self.counts[idx].iter().sum();

        ClassMetrics::from_counts(
            true_positives,
            predicted - true_positives,
            actual - true_positives,
        )
    }
}

/// Evaluation summary over a labelled set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub per_class: BTreeMap<ClassLabel, ClassMetrics>,
    /// Unweighted mean of the per-class scores; support is the total.
    pub macro_avg: ClassMetrics,
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// Compare predictions with the true labels.
///
/// Every label in `truth` and `predicted` must be one of `classes`.
///
/// # Examples
///
/// ```
/// use tweet_sentiment::classification::metrics::evaluate;
///
/// let report = evaluate(&[0, 1], &[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
/// assert_eq!(report.accuracy, 0.75);
/// assert_eq!(report.per_class[&1].precision, 1.0);
/// assert_eq!(report.per_class[&1].recall, 0.5);
/// ```
pub fn evaluate(
    classes: &[ClassLabel],
    truth: &[ClassLabel],
    predicted: &[ClassLabel],
) -> Result<ClassificationReport> {
    if truth.len() != predicted.len() {
        return Err(SentimentError::invalid_argument(format!(
            "got {} true labels but {} predictions",
            truth.len(),
            predicted.len()
        )));
    }

    let mut confusion_matrix = ConfusionMatrix::new(classes);
    for (&actual, &guess) in truth.iter().zip(predicted) {
        confusion_matrix.record(actual, guess)?;
    }

    let per_class: BTreeMap<ClassLabel, ClassMetrics> = confusion_matrix
        .classes
        .iter()
        .enumerate()
        .map(|(idx, &class)| (class, confusion_matrix.class_metrics(idx)))
        .collect();

    let class_count = per_class.len() as f64;
    let macro_avg = if per_class.is_empty() {
        ClassMetrics::default()
    } else {
        ClassMetrics {
            precision: per_class.values().map(|m| m.precision).sum::<f64>() / class_count,
            recall: per_class.values().map(|m| m.recall).sum::<f64>() / class_count,
            f1_score: per_class.values().map(|m| m.f1_score).sum::<f64>() / class_count,
            support: truth.len(),
        }
    };

    let accuracy = ratio(confusion_matrix.correct(), confusion_matrix.total());

    Ok(ClassificationReport {
        per_class,
        macro_avg,
        accuracy,
        confusion_matrix,
    })
}

impl ClassificationReport {
    /// Render the report with custom class names.
    pub fn render<F>(&self, class_name: F) -> String
    where
        F: Fn(ClassLabel) -> String,
    {
        let mut out = String::new();
        let names: Vec<String> = self
            .confusion_matrix
            .classes
            .iter()
            .map(|&class| class_name(class))
            .collect();
        let width = names
            .iter()
            .map(String::len)
            .chain(["macro avg".len()])
            .max()
            .unwrap_or(0)
            .max(8);

        out.push_str(&format!(
            "{:>width$}  {:>9}  {:>9}  {:>9}  {:>9}\n",
            "", "precision", "recall", "f1-score", "support"
        ));
        for (name, metrics) in names.iter().zip(self.per_class.values()) {
            out.push_str(&format_row(name, metrics, width));
        }
        out.push('\n');
        out.push_str(&format!(
            "{:>width$}  {:>9}  {:>9}  {:>9.4}  {:>9}\n",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        ));
        out.push_str(&format_row("macro avg", &self.macro_avg, width));

        out.push_str("\nConfusion matrix (rows: actual, columns: predicted)\n");
        out.push_str(&format!("{:>width$}", ""));
        for name in &names {
            out.push_str(&format!("  {name:>width$}"));
        }
        out.push('\n');
        for (name, row) in names.iter().zip(&self.confusion_matrix.counts) {
            out.push_str(&format!("{name:>width$}"));
            for count in row {
                out.push_str(&format!("  {count:>width$}"));
            }
            out.push('\n');
        }

        out
    }
}

fn format_row(name: &str, metrics: &ClassMetrics, width: usize) -> String {
    format!(
        "{:>width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>9}\n",
        name, metrics.precision, metrics.recall, metrics.f1_score, metrics.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|class| class.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let labels = [0, 1, 1, 0, 1];
        let report = evaluate(&[0, 1], &labels, &labels).unwrap();

        assert_eq!(report.accuracy, 1.0);
        for metrics in report.per_class.values() {
            assert_eq!(metrics.precision, 1.0);
            assert_eq!(metrics.recall, 1.0);
            assert_eq!(metrics.f1_score, 1.0);
        }
        assert_eq!(report.per_class[&0].support, 2);
        assert_eq!(report.per_class[&1].support, 3);
        assert!(report.confusion_matrix.is_diagonal());
        assert_eq!(report.macro_avg.f1_score, 1.0);
        assert_eq!(report.macro_avg.support, 5);
    }

    #[test]
    fn test_mixed_predictions() {
        let truth = [1, 1, 1, 0, 0, 0];
        let predicted = [1, 1, 0, 0, 1, 1];
        let report = evaluate(&[0, 1], &truth, &predicted).unwrap();

        // Class 1: tp 2, fp 2, fn 1.
        let positive = report.per_class[&1];
        assert_eq!(positive.precision, 0.5);
        assert!((positive.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((positive.f1_score - 4.0 / 7.0).abs() < 1e-12);

        // Class 0: tp 1, fp 1, fn 2.
        let negative = report.per_class[&0];
        assert_eq!(negative.precision, 0.5);
        assert!((negative.recall - 1.0 / 3.0).abs() < 1e-12);

        assert_eq!(report.accuracy, 0.5);
        assert_eq!(report.confusion_matrix.get(1, 0), Some(1));
        assert_eq!(report.confusion_matrix.get(0, 1), Some(2));
        assert!(!report.confusion_matrix.is_diagonal());
        assert_eq!(report.confusion_matrix.total(), 6);
    }

    #[test]
    fn test_zero_denominators() {
        // Nothing predicted as 1 and no true 1s.
        let report = evaluate(&[0, 1], &[0, 0], &[0, 0]).unwrap();
        let positive = report.per_class[&1];
        assert_eq!(positive.precision, 0.0);
        assert_eq!(positive.recall, 0.0);
        assert_eq!(positive.f1_score, 0.0);
        assert_eq!(positive.support, 0);

        let empty = evaluate(&[0, 1], &[], &[]).unwrap();
        assert_eq!(empty.accuracy, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            evaluate(&[0, 1], &[0], &[0, 1]),
            Err(SentimentError::InvalidArgument(_))
        ));
        assert!(matches!(
            evaluate(&[0, 1], &[2], &[0]),
            Err(SentimentError::InvalidArgument(_))
        ));
        assert_eq!(ConfusionMatrix::new(&[0, 1]).get(5, 0), None);
    }

    #[test]
    fn test_render() {
        let report = evaluate(&[0, 1], &[0, 1], &[0, 0]).unwrap();
        let text = report.render(|class| if class == 0 { "neg" } else { "pos" }.to_string());

        assert!(text.contains("precision"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("neg"));
        assert!(text.contains("Confusion matrix"));
        assert!(report.to_string().contains("accuracy"));
    }
}
