//! Vocabulary construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The set of tokens used as model features.
///
/// Terms are stored in ascending order and mapped to dense indices, which is
/// the column order of the conditional probability table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from tokenized documents.
    ///
    /// Keeps tokens occurring at least `min_count` times across all
    /// documents. `min_count` of 0 or 1 keeps every distinct token.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweet_sentiment::classification::vocabulary::Vocabulary;
    ///
    /// let documents = vec![vec!["good", "movie"], vec!["good", "plot"]];
    /// let vocabulary = Vocabulary::build(&documents, 2);
    /// assert_eq!(vocabulary.terms(), ["good"]);
    /// ```
    pub fn build<D, S>(documents: &[D], min_count: usize) -> Self
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for document in documents {
            for token in document.as_ref() {
                *counts.entry(token.as_ref()).or_insert(0) += 1;
            }
        }

        Self::from_terms(
            counts
                .into_iter()
                .filter(|(_, count)| *count >= min_count)
                .map(|(term, _)| term),
        )
    }

    /// Create a vocabulary from a list of terms. Duplicates are collapsed.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        terms.sort_unstable();
        terms.dedup();

        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        Self { terms, index }
    }

    /// Column index of `term`, if it is part of the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Check if `term` is part of the vocabulary.
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Terms in ascending order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Get the size of the vocabulary.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}
