//! Tweet text normalizer.
//!
//! [`TweetNormalizer`] is the analysis pipeline that turns a raw tweet into
//! the token sequence the classifier is trained on:
//!
//! 1. lowercase
//! 2. drop `@mentions`
//! 3. drop URLs (`http…`, `https…`, `www…`)
//! 4. drop `#hashtags`
//! 5. drop the standalone retweet marker `rt`
//! 6. drop digit runs
//! 7. drop ASCII punctuation
//! 8. collapse whitespace and trim
//!
//! then splits on whitespace and removes stop words, keeping negations.
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::analysis::normalizer::TweetNormalizer;
//!
//! let normalizer = TweetNormalizer::new().unwrap();
//! let tokens = normalizer.normalize("RT @bob I DON'T like Mondays!!! #sad").unwrap();
//! assert_eq!(tokens, vec!["dont", "like", "mondays"]);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::stop::{
    DEFAULT_ENGLISH_STOP_WORDS_SET, DEFAULT_NEGATION_EXCEPTIONS_SET, StopFilter,
};
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{Result, SentimentError};

const MENTION_PATTERN: &str = r"@\w+";
const URL_PATTERN: &str = r"http\S+|www\S+|https\S+";
const HASHTAG_PATTERN: &str = r"#\w+";
const RETWEET_PATTERN: &str = r"\brt\b";
const DIGIT_PATTERN: &str = r"\d+";
const PUNCTUATION_PATTERN: &str = r"[[:punct:]]";
const WHITESPACE_PATTERN: &str = r"\s+";
const TRIM_PATTERN: &str = r"^\s+|\s+$";

/// Persisted state of a [`TweetNormalizer`].
///
/// The effective stop word set is `base_stopwords − retained_negations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// English stop words before exceptions are applied.
    pub base_stopwords: BTreeSet<String>,
    /// Sentiment-bearing words that are never removed.
    pub retained_negations: BTreeSet<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            base_stopwords: DEFAULT_ENGLISH_STOP_WORDS_SET.clone(),
            retained_negations: DEFAULT_NEGATION_EXCEPTIONS_SET.clone(),
        }
    }
}

/// Turns raw tweet text into normalized tokens.
///
/// Serializes as its [`NormalizerConfig`]; the pipeline is rebuilt on load.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "NormalizerConfig", into = "NormalizerConfig")]
pub struct TweetNormalizer {
    config: NormalizerConfig,
    pipeline: PipelineAnalyzer,
}

impl TweetNormalizer {
    /// Create a normalizer with the default stop words and negations.
    pub fn new() -> Result<Self> {
        Self::with_config(NormalizerConfig::default())
    }

    /// Create a normalizer from an explicit configuration.
    pub fn with_config(config: NormalizerConfig) -> Result<Self> {
        let stop_filter =
            StopFilter::with_stop_words(config.base_stopwords.iter().cloned().collect())
                .with_exceptions(config.retained_negations.iter().cloned());

        let mut pipeline = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()));
        for pattern in [
            MENTION_PATTERN,
            URL_PATTERN,
            HASHTAG_PATTERN,
            RETWEET_PATTERN,
            DIGIT_PATTERN,
            PUNCTUATION_PATTERN,
        ] {
            pipeline =
                pipeline.add_char_filter(Arc::new(PatternReplaceCharFilter::remove(pattern)?));
        }
        let pipeline = pipeline
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(WHITESPACE_PATTERN, " ")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::remove(TRIM_PATTERN)?))
            .add_filter(Arc::new(stop_filter))
            .with_name("tweet");

        Ok(Self { config, pipeline })
    }

    /// Normalize `text` into tokens.
    ///
    /// The result may be empty; skipping empty documents is up to the caller.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.pipeline.analyze(text)?.map(|token| token.text).collect())
    }

    /// Return the cleaned text before tokenization and stop word removal.
    pub fn clean(&self, text: &str) -> String {
        self.pipeline.apply_char_filters(text)
    }

    /// Check whether `word` is removed as a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.config.base_stopwords.contains(word) && !self.config.retained_negations.contains(word)
    }

    /// Get the configuration this normalizer was built from.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }
}

impl Analyzer for TweetNormalizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.pipeline.analyze(text)
    }

    fn name(&self) -> &'static str {
        "tweet"
    }
}

impl TryFrom<NormalizerConfig> for TweetNormalizer {
    type Error = SentimentError;

    fn try_from(config: NormalizerConfig) -> Result<Self> {
        Self::with_config(config)
    }
}

impl From<TweetNormalizer> for NormalizerConfig {
    fn from(normalizer: TweetNormalizer) -> Self {
        normalizer.config
    }
}

impl fmt::Debug for TweetNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweetNormalizer")
            .field("base_stopwords", &self.config.base_stopwords.len())
            .field("retained_negations", &self.config.retained_negations.len())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TweetNormalizer {
        TweetNormalizer::new().unwrap()
    }

    #[test]
    fn test_strips_tweet_noise_and_keeps_negation() {
        let tokens = normalizer()
            .normalize("I DON'T like this!!! http://x.co @bob #sad 123")
            .unwrap();

        assert!(tokens.contains(&"dont".to_string()));
        assert!(tokens.contains(&"like".to_string()));
        for unwanted in ["http://x.co", "httpxco", "xco", "@bob", "bob", "#sad", "sad", "123"] {
            assert!(!tokens.contains(&unwanted.to_string()), "{unwanted} leaked into {tokens:?}");
        }
        assert_eq!(tokens, vec!["dont", "like"]);
    }

    #[test]
    fn test_normalize_is_stable() {
        let normalizer = normalizer();
        let text = "RT @user: Not happy with the 2 new updates... www.example.com";
        assert_eq!(normalizer.normalize(text).unwrap(), normalizer.normalize(text).unwrap());
        assert_eq!(normalizer.normalize(text).unwrap(), vec!["not", "happy", "new", "updates"]);
    }

    #[test]
    fn test_empty_and_non_alphabetic_input() {
        let normalizer = normalizer();
        assert!(normalizer.normalize("").unwrap().is_empty());
        assert!(normalizer.normalize("   ").unwrap().is_empty());
        assert!(normalizer.normalize("123 !!! @bob #tag 42").unwrap().is_empty());
        assert!(normalizer.normalize("the and of").unwrap().is_empty());
    }

    #[test]
    fn test_retweet_marker_only_on_word_boundary() {
        let tokens = normalizer().normalize("rt start art rt").unwrap();
        assert_eq!(tokens, vec!["start", "art"]);
    }

    #[test]
    fn test_url_variants_removed() {
        let tokens = normalizer()
            .normalize("see https://a.b/c and www.site.org or http://x now")
            .unwrap();
        assert_eq!(tokens, vec!["see", "now"]);
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(normalizer().clean("  Hello,   WORLD!! 2day \n"), "hello world day");
    }

    #[test]
    fn test_custom_config_subtracts_negations() {
        let config = NormalizerConfig {
            base_stopwords: ["not", "the", "movie"].iter().map(|s| s.to_string()).collect(),
            retained_negations: ["not"].iter().map(|s| s.to_string()).collect(),
        };
        let normalizer = TweetNormalizer::with_config(config).unwrap();

        assert!(normalizer.is_stop_word("movie"));
        assert!(!normalizer.is_stop_word("not"));
        assert_eq!(
            normalizer.normalize("Not the MOVIE I wanted").unwrap(),
            vec!["not", "i", "wanted"]
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let original = normalizer();
        let json = serde_json::to_string(&original).unwrap();
        let restored: TweetNormalizer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.config(), original.config());
        let text = "I can't believe it's not butter!";
        assert_eq!(restored.normalize(text).unwrap(), original.normalize(text).unwrap());
    }
}
