//! Command implementations for the tweet-sentiment CLI.

use std::time::Instant;

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::{self, Sentiment140Reader};
use crate::error::Result;
use crate::inference::SentimentPredictor;
use crate::training;

/// Execute a CLI command.
pub fn execute_command(args: SentimentArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Predict(predict_args) => predict_texts(predict_args, &args),
        Command::Evaluate(evaluate_args) => evaluate_model(evaluate_args, &args),
    }
}

/// Train a model and write it to disk.
fn train_model(args: &TrainArgs, cli_args: &SentimentArgs) -> Result<()> {
    let config = args.training_config()?;
    let start_time = Instant::now();

    let outcome = training::train(&args.dataset, &config)?;
    outcome.model.save(&args.output)?;

    let classifier = outcome.model.classifier();
    let summary = TrainingSummary {
        model_path: args.output.display().to_string(),
        dataset: args.dataset.display().to_string(),
        train_documents: outcome.train_size,
        test_documents: outcome.test_size,
        vocabulary_size: classifier.vocabulary()?.len(),
        alpha: classifier.alpha()?,
        duration_ms: start_time.elapsed().as_millis() as u64,
        labels: outcome.model.metadata().labels.clone(),
        report: outcome.report,
    };

    output_result("Training completed", &summary, cli_args)
}

/// Classify texts given on the command line.
fn predict_texts(args: &PredictArgs, cli_args: &SentimentArgs) -> Result<()> {
    let predictor = SentimentPredictor::from_path(&args.model)?;
    let predictions = predictor.analyze_batch(&args.texts)?;

    let results = PredictionResults {
        predictions: args
            .texts
            .iter()
            .cloned()
            .zip(predictions)
            .map(|(text, prediction)| TextPrediction { text, prediction })
            .collect(),
    };

    output_result("Predictions", &results, cli_args)
}

/// Evaluate a trained model against a labeled dataset.
fn evaluate_model(args: &EvaluateArgs, cli_args: &SentimentArgs) -> Result<()> {
    let start_time = Instant::now();
    let predictor = SentimentPredictor::from_path(&args.model)?;
    let model = predictor.model();

    let samples = Sentiment140Reader::new()
        .with_limit(args.limit)
        .read_path(&args.dataset)?;
    let corpus = dataset::preprocess(&samples, model.normalizer())?;
    info!("Evaluating on {} documents", corpus.len());

    let report = model
        .classifier()
        .get_metrics(&corpus.documents, &corpus.labels)?;

    let result = EvaluationResult {
        model_path: args.model.display().to_string(),
        dataset: args.dataset.display().to_string(),
        documents: corpus.len(),
        skipped_empty: samples.len() - corpus.len(),
        duration_ms: start_time.elapsed().as_millis() as u64,
        labels: model.metadata().labels.clone(),
        report,
    };

    output_result("Evaluation completed", &result, cli_args)
}
