//! Command line argument parsing for the tweet-sentiment CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::training::TrainingConfig;

/// tweet-sentiment - Naive Bayes sentiment classification for tweets
#[derive(Parser, Debug, Clone)]
#[command(name = "tweet-sentiment")]
#[command(about = "Train and apply a Naive Bayes sentiment model for tweets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentimentArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentimentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a Sentiment140 CSV file
    Train(TrainArgs),

    /// Classify one or more texts
    Predict(PredictArgs),

    /// Measure a trained model against a labeled CSV file
    Evaluate(EvaluateArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Sentiment140 CSV file
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Where to write the trained model (JSON)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: PathBuf,

    /// Training configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Laplace smoothing constant
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Minimum token frequency to enter the vocabulary
    #[arg(long)]
    pub min_count: Option<usize>,

    /// Fraction of the data used for fitting
    #[arg(long)]
    pub train_ratio: Option<f64>,

    /// Keep the class distribution of the file instead of balancing it
    #[arg(long)]
    pub no_balance: bool,

    /// Read at most this many labeled rows
    #[arg(long)]
    pub limit: Option<usize>,

    /// Shuffle with this seed before splitting
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TrainArgs {
    /// Build the training configuration: file values first, then flags.
    pub fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_file(path)?,
            None => TrainingConfig::default(),
        };

        if let Some(alpha) = self.alpha {
            config.naive_bayes.alpha = alpha;
        }
        if let Some(min_count) = self.min_count {
            config.naive_bayes.min_count = min_count;
        }
        if let Some(train_ratio) = self.train_ratio {
            config.train_ratio = train_ratio;
        }
        if self.no_balance {
            config.balance = false;
        }
        if self.limit.is_some() {
            config.limit = self.limit;
        }
        if self.seed.is_some() {
            config.shuffle_seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Trained model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Texts to classify
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Trained model file
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Sentiment140 CSV file
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Read at most this many labeled rows
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
