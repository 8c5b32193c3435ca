use rand::RngCore;

use crate::pipeline::traits::{ConfusionResolver, SimilarityMatcher, WordSplitter};
use crate::simulation::confusion::resolve_confusion;
use crate::simulation::splitter::split_word;
use crate::vocabulary::{LevenshteinMatcher, VocabularyIndexes};

pub struct IndexedConfusionResolver;

impl ConfusionResolver for IndexedConfusionResolver {
    fn resolve(&self, word: &str, indexes: &VocabularyIndexes) -> Vec<String> {
        resolve_confusion(word, &indexes.confusion)
    }
}

pub struct LengthIndexSplitter {
    matcher: Box<dyn SimilarityMatcher>,
}

impl LengthIndexSplitter {
    pub fn new(matcher: Box<dyn SimilarityMatcher>) -> Self {
        Self { matcher }
    }
}

impl Default for LengthIndexSplitter {
    fn default() -> Self {
        Self::new(Box::new(LevenshteinMatcher))
    }
}

impl WordSplitter for LengthIndexSplitter {
    fn split(
        &self,
        word: &str,
        indexes: &VocabularyIndexes,
        rng: &mut dyn RngCore,
    ) -> (String, Option<String>) {
        split_word(word, &indexes.lengths, self.matcher.as_ref(), rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::simulation::confusion::UNKNOWN_WORD;

    fn indexes() -> VocabularyIndexes {
        let words: Vec<String> = ["oat", "meal", "meat"].iter().map(|w| w.to_string()).collect();
        VocabularyIndexes::build(&words, &LevenshteinMatcher)
    }

    #[test]
    fn indexed_confusion_resolver_resolve() {
        let indexes = indexes();
        let resolver = IndexedConfusionResolver;
        assert_eq!(
            resolver.resolve("meal", &indexes),
            resolve_confusion("meal", &indexes.confusion)
        );
        assert_eq!(resolver.resolve("tuna", &indexes), [UNKNOWN_WORD]);
    }

    #[test]
    fn length_index_splitter_split() {
        let indexes = indexes();
        let splitter = LengthIndexSplitter::default();
        for seed in 0..10u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut expected_rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                splitter.split("oatmeal", &indexes, &mut rng),
                split_word("oatmeal", &indexes.lengths, &LevenshteinMatcher, &mut expected_rng)
            );
        }
    }
}
