use rand::RngCore;

use crate::error::SimulatorError;
use crate::vocabulary::VocabularyIndexes;

/// Fuzzy lookup of `query` in `pool`, best match first.
pub trait SimilarityMatcher: Send + Sync {
    fn matches(
        &self,
        query: &str,
        pool: &[String],
        max_results: usize,
        min_score: f64,
    ) -> Vec<String>;
}

pub trait VocabularyProvider: Send + Sync {
    fn list_words(&self) -> Result<Vec<String>, SimulatorError>;
}

pub trait ConfusionResolver: Send + Sync {
    /// Candidate words a recognizer could output instead of `word`. Never empty.
    fn resolve(&self, word: &str, indexes: &VocabularyIndexes) -> Vec<String>;
}

pub trait WordSplitter: Send + Sync {
    /// Two vocabulary words approximating `word`, or `(word, None)` when no
    /// split point works.
    fn split(
        &self,
        word: &str,
        indexes: &VocabularyIndexes,
        rng: &mut dyn RngCore,
    ) -> (String, Option<String>);
}
