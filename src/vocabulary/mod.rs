use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;
use crate::pipeline::traits::SimilarityMatcher;

pub mod cache;
pub mod matcher;
pub mod provider;

pub use matcher::{LevenshteinMatcher, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE};

/// Vocabulary words grouped by character count.
///
/// Length `0` is always present and empty. Every other key holds the
/// distinct words of that length in first-seen vocabulary order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LengthIndex {
    by_length: BTreeMap<usize, Vec<String>>,
}

impl Default for LengthIndex {
    fn default() -> Self {
        let mut by_length = BTreeMap::new();
        by_length.insert(0, Vec::new());
        Self { by_length }
    }
}

impl LengthIndex {
    pub fn build(words: &[String]) -> Self {
        let mut index = Self::default();
        for word in words {
            let len = word.chars().count();
            if len == 0 {
                continue;
            }
            let bucket = index.by_length.entry(len).or_default();
            if !bucket.contains(word) {
                bucket.push(word.clone());
            }
        }
        index
    }

    pub fn words_of_length(&self, len: usize) -> Option<&[String]> {
        self.by_length.get(&len).map(Vec::as_slice)
    }

    pub fn contains_length(&self, len: usize) -> bool {
        self.by_length.contains_key(&len)
    }

    pub fn max_length(&self) -> usize {
        self.by_length.keys().next_back().copied().unwrap_or(0)
    }

    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied()
    }

    pub(crate) fn validate(&self) -> Result<(), SimulatorError> {
        match self.by_length.get(&0) {
            Some(zero) if zero.is_empty() => {}
            _ => {
                return Err(SimulatorError::corrupt_index(
                    "length index must map length 0 to an empty set",
                ))
            }
        }
        for (&len, words) in self.by_length.iter().filter(|(len, _)| **len > 0) {
            if words.is_empty() {
                return Err(SimulatorError::corrupt_index(format!(
                    "length index bucket {len} is empty"
                )));
            }
            if let Some(bad) = words.iter().find(|w| w.chars().count() != len) {
                return Err(SimulatorError::corrupt_index(format!(
                    "length index bucket {len} holds `{bad}`"
                )));
            }
        }
        Ok(())
    }
}

/// Close vocabulary matches per word.
///
/// A word with no entry falls back to `UNK`; stored entries are never empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionIndex {
    candidates: BTreeMap<String, Vec<String>>,
}

impl ConfusionIndex {
    /// Matches every word against the whole vocabulary, one task per word.
    pub fn build(words: &[String], matcher: &dyn SimilarityMatcher) -> Self {
        let candidates = words
            .par_iter()
            .filter_map(|word| {
                let matches = matcher.matches(word, words, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE);
                (!matches.is_empty()).then(|| (word.clone(), matches))
            })
            .collect::<Vec<_>>();
        Self::from_entries(candidates)
    }

    /// Empty candidate lists are dropped so absence keeps meaning "no match".
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Self {
            candidates: entries
                .into_iter()
                .filter(|(_, matches)| !matches.is_empty())
                .collect(),
        }
    }

    pub fn candidates(&self, word: &str) -> Option<&[String]> {
        self.candidates.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Read-only indexes the simulator consults, built or loaded once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocabularyIndexes {
    pub confusion: ConfusionIndex,
    pub lengths: LengthIndex,
}

impl VocabularyIndexes {
    pub fn build(words: &[String], matcher: &dyn SimilarityMatcher) -> Self {
        tracing::info!(words = words.len(), "vocabulary: building indexes");
        let lengths = LengthIndex::build(words);
        let confusion = ConfusionIndex::build(words, matcher);
        tracing::info!(
            confusion_entries = confusion.len(),
            max_length = lengths.max_length(),
            "vocabulary: indexes built"
        );
        Self { confusion, lengths }
    }
}
