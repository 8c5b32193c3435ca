use std::cmp::Ordering;

use strsim::normalized_levenshtein;

use crate::pipeline::traits::SimilarityMatcher;

pub const DEFAULT_MAX_RESULTS: usize = 3;
pub const DEFAULT_MIN_SCORE: f64 = 0.6;

/// Normalized Levenshtein similarity: `1 - distance / max(len)`.
///
/// Results are ordered by score, best first; equal scores keep pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinMatcher;

impl SimilarityMatcher for LevenshteinMatcher {
    fn matches(
        &self,
        query: &str,
        pool: &[String],
        max_results: usize,
        min_score: f64,
    ) -> Vec<String> {
        if max_results == 0 || pool.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &String)> = pool
            .iter()
            .map(|candidate| (normalized_levenshtein(query, candidate), candidate))
            .filter(|(score, _)| *score >= min_score)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(max_results);
        scored.into_iter().map(|(_, word)| word.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn exact_match_ranks_first() {
        let pool = pool(&["meat", "meal", "seal", "deal"]);
        let out = LevenshteinMatcher.matches("meal", &pool, 3, DEFAULT_MIN_SCORE);
        assert_eq!(out[0], "meal");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn ties_keep_pool_order() {
        let pool = pool(&["seal", "deal", "meal"]);
        let out = LevenshteinMatcher.matches("real", &pool, 3, DEFAULT_MIN_SCORE);
        assert_eq!(out, ["seal", "deal", "meal"]);
    }

    #[test]
    fn below_threshold_is_dropped() {
        let pool = pool(&["oat", "meal"]);
        assert!(LevenshteinMatcher
            .matches("xyz", &pool, 3, DEFAULT_MIN_SCORE)
            .is_empty());
    }

    #[test]
    fn empty_pool_or_zero_results() {
        assert!(LevenshteinMatcher.matches("oat", &[], 3, 0.0).is_empty());
        let pool = pool(&["oat"]);
        assert!(LevenshteinMatcher.matches("oat", &pool, 0, 0.0).is_empty());
    }
}
