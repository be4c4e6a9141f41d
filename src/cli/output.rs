//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classification::metrics::ClassificationReport;
use crate::classification::types::ClassLabel;
use crate::cli::args::{OutputFormat, SentimentArgs};
use crate::error::Result;
use crate::inference::Prediction;

/// Something that can be printed for a person as well as serialized.
pub trait HumanReadable {
    /// Render the value as plain text lines.
    fn to_human(&self) -> String;
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub model_path: String,
    pub dataset: String,
    pub train_documents: usize,
    pub test_documents: usize,
    pub vocabulary_size: usize,
    pub alpha: f64,
    pub duration_ms: u64,
    pub labels: BTreeMap<ClassLabel, String>,
    pub report: Option<ClassificationReport>,
}

/// One classified text.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextPrediction {
    pub text: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Result structure for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResults {
    pub predictions: Vec<TextPrediction>,
}

/// Result structure for evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub model_path: String,
    pub dataset: String,
    pub documents: usize,
    pub skipped_empty: usize,
    pub duration_ms: u64,
    pub labels: BTreeMap<ClassLabel, String>,
    pub report: ClassificationReport,
}

fn render_report(report: &ClassificationReport, labels: &BTreeMap<ClassLabel, String>) -> String {
    report.render(|class| {
        labels
            .get(&class)
            .cloned()
            .unwrap_or_else(|| class.to_string())
    })
}

impl HumanReadable for TrainingSummary {
    fn to_human(&self) -> String {
        let mut out = format!(
            "Model: {}\nDataset: {}\nTraining documents: {}\nTest documents: {}\nVocabulary size: {}\nAlpha: {}\nDuration: {}ms\n",
            self.model_path,
            self.dataset,
            self.train_documents,
            self.test_documents,
            self.vocabulary_size,
            self.alpha,
            self.duration_ms
        );
        match &self.report {
            Some(report) => {
                out.push('\n');
                out.push_str(&render_report(report, &self.labels));
            }
            None => out.push_str("No test documents, evaluation skipped\n"),
        }
        out
    }
}

impl HumanReadable for PredictionResults {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for (idx, item) in self.predictions.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(&format!("Text: {}\n", item.text));
            out.push_str(&format!(
                "Prediction: {} (confidence: {:.4})\n",
                item.prediction.label, item.prediction.confidence
            ));
            let probabilities = item
                .prediction
                .probabilities
                .iter()
                .map(|(label, probability)| format!("{label}: {probability:.4}"))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("Probabilities: {probabilities}\n"));
        }
        out
    }
}

impl HumanReadable for EvaluationResult {
    fn to_human(&self) -> String {
        let mut out = format!(
            "Model: {}\nDataset: {}\nDocuments: {} ({} empty after normalization skipped)\nDuration: {}ms\n\n",
            self.model_path, self.dataset, self.documents, self.skipped_empty, self.duration_ms
        );
        out.push_str(&render_report(&self.report, &self.labels));
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SentimentArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    println!("{}", format_result(message, result, args)?);
    Ok(())
}

/// Render a result the way [`output_result`] prints it.
pub fn format_result<T>(message: &str, result: &T, args: &SentimentArgs) -> Result<String>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => Ok(format_human(message, result, args)),
        OutputFormat::Json => format_json(result, args),
    }
}

fn format_human<T: HumanReadable>(message: &str, result: &T, args: &SentimentArgs) -> String {
    let body = result.to_human();
    if args.verbosity() > 0 {
        format!("{message}\n\n{}", body.trim_end())
    } else {
        body.trim_end().to_string()
    }
}

fn format_json<T: Serialize>(result: &T, args: &SentimentArgs) -> Result<String> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
