//! Sentiment140 dataset loading and corpus preparation.
//!
//! The Sentiment140 export is a headerless CSV with six columns:
//! polarity, id, date, query, user, text. Polarity `0` is negative and `4`
//! is positive; the file is Latin-1 encoded.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::TweetNormalizer;
use crate::classification::types::{ClassLabel, Sentiment};
use crate::error::{Result, SentimentError};

const POLARITY_COLUMN: usize = 0;
const TEXT_COLUMN: usize = 5;

/// A raw tweet with its sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    pub text: String,
    pub sentiment: Sentiment,
}

impl LabeledText {
    pub fn new<S: Into<String>>(text: S, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }
}

/// Reader for Sentiment140 CSV files.
#[derive(Debug, Clone, Default)]
pub struct Sentiment140Reader {
    /// Stop after this many labeled rows.
    limit: Option<usize>,
}

impl Sentiment140Reader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of labeled rows to read.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Read a dataset file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<LabeledText>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SentimentError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to open dataset {}: {e}", path.display()),
            ))
        })?;
        info!("Loading dataset from {}", path.display());
        self.read(BufReader::new(file))
    }

    /// Read labeled rows from any CSV source.
    ///
    /// Rows with an unknown polarity are skipped. Rows that are too short or
    /// whose polarity is not a number are logged and skipped.
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<LabeledText>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut samples = Vec::new();
        let mut record = ByteRecord::new();
        let mut row = 0usize;
        let mut malformed = 0usize;
        let mut unlabeled = 0usize;

        loop {
            if self.limit.is_some_and(|limit| samples.len() >= limit) {
                break;
            }

            match csv_reader.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable row {}: {e}", row + 1);
                    malformed += 1;
                    row += 1;
                    continue;
                }
            }
            row += 1;

            match parse_record(&record) {
                Ok(Some(sample)) => samples.push(sample),
                Ok(None) => unlabeled += 1,
                Err(e) => {
                    warn!("Skipping row {row}: {e}");
                    malformed += 1;
                }
            }
        }

        let positives = samples
            .iter()
            .filter(|sample| sample.sentiment == Sentiment::Positive)
            .count();
        info!(
            "Loaded {} tweets ({} positive, {} negative)",
            samples.len(),
            positives,
            samples.len() - positives
        );
        if malformed > 0 || unlabeled > 0 {
            debug!("Skipped {malformed} malformed rows and {unlabeled} rows with other polarity");
        }

        Ok(samples)
    }
}

/// Parse one record; `Ok(None)` for rows whose polarity is neither 0 nor 4.
fn parse_record(record: &ByteRecord) -> Result<Option<LabeledText>> {
    let (Some(polarity), Some(text)) = (record.get(POLARITY_COLUMN), record.get(TEXT_COLUMN))
    else {
        return Err(SentimentError::malformed_input(format!(
            "expected at least {} fields, found {}",
            TEXT_COLUMN + 1,
            record.len()
        )));
    };

    let polarity = decode_latin1(polarity);
    let polarity: u32 = polarity.trim().trim_matches('"').parse().map_err(|_| {
        SentimentError::malformed_input(format!("polarity '{polarity}' is not a number"))
    })?;

    let sentiment = match polarity {
        0 => Sentiment::Negative,
        4 => Sentiment::Positive,
        _ => return Ok(None),
    };

    Ok(Some(LabeledText::new(decode_latin1(text), sentiment)))
}

/// Latin-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}

/// Truncate every class to the size of the smallest one.
///
/// Keeps the first samples of each class and their relative order.
pub fn balance(samples: Vec<LabeledText>) -> Vec<LabeledText> {
    let quota = Sentiment::ALL
        .iter()
        .map(|sentiment| {
            samples
                .iter()
                .filter(|sample| sample.sentiment == *sentiment)
                .count()
        })
        .min()
        .unwrap_or(0);

    let mut taken = [0usize; Sentiment::ALL.len()];
    let balanced: Vec<LabeledText> = samples
        .into_iter()
        .filter(|sample| {
            let slot = &mut taken[sample.sentiment.class() as usize];
            if *slot < quota {
                *slot += 1;
                true
            } else {
                false
            }
        })
        .collect();

    info!("Balanced dataset: {quota} samples per class");
    balanced
}

/// Normalized documents with their class labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub documents: Vec<Vec<String>>,
    pub labels: Vec<ClassLabel>,
}

impl Corpus {
    /// Get the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Split into (train, test) parts at `train_ratio`.
    ///
    /// The split is positional; with a seed the documents are shuffled
    /// deterministically first.
    pub fn split(self, train_ratio: f64, seed: Option<u64>) -> Result<(Corpus, Corpus)> {
        if !(train_ratio > 0.0 && train_ratio <= 1.0) {
            return Err(SentimentError::invalid_config(format!(
                "train_ratio must be in (0, 1], got {train_ratio}"
            )));
        }

        let mut pairs: Vec<(Vec<String>, ClassLabel)> =
            self.documents.into_iter().zip(self.labels).collect();
        if let Some(seed) = seed {
            let mut rng = StdRng::seed_from_u64(seed);
            pairs.shuffle(&mut rng);
        }

        let cut = (pairs.len() as f64 * train_ratio) as usize;
        let test_pairs = pairs.split_off(cut);

        Ok((Corpus::from_iter(pairs), Corpus::from_iter(test_pairs)))
    }
}

impl FromIterator<(Vec<String>, ClassLabel)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (Vec<String>, ClassLabel)>>(iter: I) -> Self {
        let (documents, labels) = iter.into_iter().unzip();
        Self { documents, labels }
    }
}

/// Normalize every sample, dropping those left without tokens.
pub fn preprocess(samples: &[LabeledText], normalizer: &TweetNormalizer) -> Result<Corpus> {
    let mut corpus = Corpus::default();
    for sample in samples {
        let tokens = normalizer.normalize(&sample.text)?;
        if tokens.is_empty() {
            continue;
        }
        corpus.documents.push(tokens);
        corpus.labels.push(sample.sentiment.class());
    }

    info!(
        "Preprocessed {} texts, {} kept after dropping empty documents",
        samples.len(),
        corpus.len()
    );
    Ok(corpus)
}
