use rand::Rng;

use crate::types::WordHypothesis;
use crate::vocabulary::ConfusionIndex;

/// Word emitted when a confused word has no close vocabulary match.
pub const UNKNOWN_WORD: &str = "UNK";

pub fn resolve_confusion(word: &str, index: &ConfusionIndex) -> Vec<String> {
    match index.candidates(word) {
        Some(candidates) if !candidates.is_empty() => candidates.to_vec(),
        _ => vec![UNKNOWN_WORD.to_string()],
    }
}

/// Assigns each candidate an independent uniform weight, normalized to sum to 1.
/// Candidate order is kept; weights are not tied to rank.
pub fn weigh_candidates<R: Rng + ?Sized>(words: Vec<String>, rng: &mut R) -> Vec<WordHypothesis> {
    let weights: Vec<f64> = words.iter().map(|_| rng.random::<f64>()).collect();
    let total: f64 = weights.iter().sum();
    let count = words.len() as f64;
    words
        .into_iter()
        .zip(weights)
        .map(|(word, weight)| WordHypothesis {
            word,
            probability: if total > 0.0 { weight / total } else { 1.0 / count },
        })
        .collect()
}
