use rand::Rng;

use crate::pipeline::traits::SimilarityMatcher;
use crate::vocabulary::{LengthIndex, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE};

/// Shortest first half a split may produce.
const MIN_FIRST_LEN: usize = 2;

/// Tries to read `word` as two vocabulary words whose lengths add up to its own.
///
/// The first split point is drawn from `[2, len - 1]`; on failure the point
/// moves right one character at a time. Lengths with no vocabulary bucket are
/// skipped. The first point where both halves have a close match wins and the
/// best match of each half is returned. Returns `(word, None)` when no split
/// point works.
pub fn split_word<R: Rng + ?Sized>(
    word: &str,
    lengths: &LengthIndex,
    matcher: &dyn SimilarityMatcher,
    rng: &mut R,
) -> (String, Option<String>) {
    let chars: Vec<char> = word.chars().collect();
    let total_len = chars.len();
    if total_len <= MIN_FIRST_LEN {
        return (word.to_string(), None);
    }

    let max_first_len = lengths.max_length().min(total_len - 1);
    let mut first_len = rng.random_range(MIN_FIRST_LEN..total_len);
    while first_len <= max_first_len {
        let second_len = total_len - first_len;
        let (Some(first_pool), Some(second_pool)) = (
            lengths.words_of_length(first_len),
            lengths.words_of_length(second_len),
        ) else {
            tracing::debug!(
                word,
                first_len,
                second_len,
                "splitter: no vocabulary words of required length"
            );
            first_len += 1;
            continue;
        };

        let head: String = chars[..first_len].iter().collect();
        let tail: String = chars[first_len..].iter().collect();
        let first = matcher.matches(&head, first_pool, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE);
        let second = matcher.matches(&tail, second_pool, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE);
        if let (Some(first), Some(second)) = (first.into_iter().next(), second.into_iter().next()) {
            tracing::debug!(word, first = first.as_str(), second = second.as_str(), "splitter: split found");
            return (first, Some(second));
        }
        first_len += 1;
    }

    tracing::debug!(word, "splitter: no split point matched, keeping word whole");
    (word.to_string(), None)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::vocabulary::LevenshteinMatcher;

    fn lengths(words: &[&str]) -> LengthIndex {
        LengthIndex::build(&words.iter().map(|w| w.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn oatmeal_splits_into_oat_and_meal() {
        let index = lengths(&["oat", "meal"]);
        let mut split_count = 0;
        for seed in 0..40u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            match split_word("oatmeal", &index, &LevenshteinMatcher, &mut rng) {
                (first, Some(second)) => {
                    assert_eq!((first.as_str(), second.as_str()), ("oat", "meal"));
                    split_count += 1;
                }
                (word, None) => assert_eq!(word, "oatmeal"),
            }
        }
        assert!(split_count > 0, "oatmeal never split across seeds");
    }

    #[test]
    fn halves_always_sum_to_word_length() {
        let index = lengths(&["oat", "meal", "me", "al", "tmeal", "oa", "tuna", "fish"]);
        for seed in 0..40u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            if let (first, Some(second)) = split_word("oatmeal", &index, &LevenshteinMatcher, &mut rng) {
                assert_eq!(first.chars().count() + second.chars().count(), 7);
            }
        }
    }

    #[test]
    fn unmatched_word_is_not_split() {
        let index = lengths(&["oat", "meal", "tuna", "fish"]);
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                split_word("xyzxyz", &index, &LevenshteinMatcher, &mut rng),
                ("xyzxyz".to_string(), None)
            );
        }
    }

    #[test]
    fn short_words_and_empty_vocabulary_are_not_split() {
        let mut rng = StdRng::seed_from_u64(1);
        let index = lengths(&["oat", "meal"]);
        assert_eq!(
            split_word("ab", &index, &LevenshteinMatcher, &mut rng),
            ("ab".to_string(), None)
        );
        assert_eq!(
            split_word("oatmeal", &LengthIndex::default(), &LevenshteinMatcher, &mut rng),
            ("oatmeal".to_string(), None)
        );
    }
}
