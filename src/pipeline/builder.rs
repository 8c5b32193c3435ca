use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimulatorConfig;
use crate::error::SimulatorError;
use crate::pipeline::defaults::{IndexedConfusionResolver, LengthIndexSplitter};
use crate::pipeline::runtime::{AsrSimulator, AsrSimulatorParts};
use crate::pipeline::traits::{ConfusionResolver, SimilarityMatcher, WordSplitter};
use crate::simulation::timing::TimingModel;
use crate::vocabulary::provider::LetterDurations;
use crate::vocabulary::VocabularyIndexes;

pub struct AsrSimulatorBuilder {
    config: SimulatorConfig,
    indexes: Option<Arc<VocabularyIndexes>>,
    letter_durations: Option<LetterDurations>,
    rng: Option<StdRng>,
    matcher: Option<Box<dyn SimilarityMatcher>>,
    confusion_resolver: Option<Box<dyn ConfusionResolver>>,
    word_splitter: Option<Box<dyn WordSplitter>>,
}

impl AsrSimulatorBuilder {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            indexes: None,
            letter_durations: None,
            rng: None,
            matcher: None,
            confusion_resolver: None,
            word_splitter: None,
        }
    }

    /// Shared read-only indexes; without them every confusion is `UNK` and
    /// no word is ever split.
    pub fn with_indexes(mut self, indexes: Arc<VocabularyIndexes>) -> Self {
        self.indexes = Some(indexes);
        self
    }

    pub fn with_letter_durations(mut self, letter_durations: LetterDurations) -> Self {
        self.letter_durations = Some(letter_durations);
        self
    }

    /// Overrides `config.seed`.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Matcher for the default splitter. Ignored when a splitter is supplied.
    pub fn with_matcher(mut self, matcher: Box<dyn SimilarityMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn with_confusion_resolver(mut self, confusion_resolver: Box<dyn ConfusionResolver>) -> Self {
        self.confusion_resolver = Some(confusion_resolver);
        self
    }

    pub fn with_word_splitter(mut self, word_splitter: Box<dyn WordSplitter>) -> Self {
        self.word_splitter = Some(word_splitter);
        self
    }

    pub fn build(self) -> Result<AsrSimulator, SimulatorError> {
        self.config.rates.validate()?;
        let letter_durations = self.letter_durations.ok_or_else(|| {
            SimulatorError::invalid_input("a letter-duration table is required")
        })?;
        let timing = TimingModel::new(&self.config.timing, letter_durations)?;

        let indexes = self.indexes.unwrap_or_else(|| {
            tracing::warn!("simulator: no vocabulary indexes supplied; confusions fall back to UNK");
            Arc::new(VocabularyIndexes::default())
        });
        let rng = match (self.rng, self.config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => StdRng::seed_from_u64(seed),
            (None, None) => StdRng::from_os_rng(),
        };
        let word_splitter = match (self.word_splitter, self.matcher) {
            (Some(splitter), _) => splitter,
            (None, Some(matcher)) => Box::new(LengthIndexSplitter::new(matcher)),
            (None, None) => Box::new(LengthIndexSplitter::default()),
        };

        Ok(AsrSimulator::from_parts(AsrSimulatorParts {
            indexes,
            rates: self.config.rates,
            emit_pauses: self.config.emit_pauses,
            timing,
            rng,
            confusion_resolver: self
                .confusion_resolver
                .unwrap_or_else(|| Box::new(IndexedConfusionResolver)),
            word_splitter,
        }))
    }
}
