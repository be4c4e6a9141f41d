//! Multinomial Naive Bayes classification over normalized token documents.
//!
//! # Architecture
//!
//! - [`vocabulary::Vocabulary`]: feature set built from a training corpus
//! - [`naive_bayes::MultinomialNaiveBayes`]: priors, smoothed conditional
//!   probabilities and prediction
//! - [`scorer`]: log-space normalization into a probability distribution
//! - [`metrics`]: precision/recall/F1 and the confusion matrix
//!
//! # Example
//!
//! ```
//! use tweet_sentiment::classification::naive_bayes::MultinomialNaiveBayes;
//!
//! let documents = vec![vec!["good", "great"], vec!["bad", "bad"]];
//! let labels = vec![1, 0];
//!
//! let mut model = MultinomialNaiveBayes::new();
//! model.fit(&documents, &labels).unwrap();
//!
//! let probabilities = model.predict_proba(&[vec!["good"]]).unwrap();
//! assert!(probabilities[0][&1] > probabilities[0][&0]);
//! ```

pub mod metrics;
pub mod naive_bayes;
pub mod scorer;
pub mod types;
pub mod vocabulary;

pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use naive_bayes::{MultinomialNaiveBayes, NaiveBayesConfig};
pub use types::{ClassLabel, ClassProbabilities, Sentiment};
pub use vocabulary::Vocabulary;
