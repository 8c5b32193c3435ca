use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::ErrorRates;
use crate::pipeline::traits::{ConfusionResolver, WordSplitter};
use crate::simulation::confusion::weigh_candidates;
use crate::simulation::decision::{decide, WordDecision};
use crate::simulation::timing::{SimulationClock, TimingModel};
use crate::simulation::tokenization::{tokenize_sentence, Token};
use crate::types::{Element, ElementKind, OutputStream};
use crate::vocabulary::VocabularyIndexes;

pub const COMMA_PAUSE_LABEL: &str = "<,>";
pub const SENTENCE_END_PAUSE_LABEL: &str = "<.>";
pub const RANDOM_PAUSE_LABEL: &str = "RandomPause";

/// Turns clean sentences into simulated recognizer output.
///
/// The clock carries over between [`AsrSimulator::convert`] calls, so
/// consecutive sentences read as one continuous recording.
pub struct AsrSimulator {
    indexes: Arc<VocabularyIndexes>,
    rates: ErrorRates,
    emit_pauses: bool,
    timing: TimingModel,
    rng: StdRng,
    confusion_resolver: Box<dyn ConfusionResolver>,
    word_splitter: Box<dyn WordSplitter>,
}

pub(crate) struct AsrSimulatorParts {
    pub indexes: Arc<VocabularyIndexes>,
    pub rates: ErrorRates,
    pub emit_pauses: bool,
    pub timing: TimingModel,
    pub rng: StdRng,
    pub confusion_resolver: Box<dyn ConfusionResolver>,
    pub word_splitter: Box<dyn WordSplitter>,
}

/// Best miss so far: the trigger draw and the token it dropped.
#[derive(Clone, Copy)]
struct MissCandidate {
    trigger: f64,
    token_index: usize,
}

impl AsrSimulator {
    pub(crate) fn from_parts(parts: AsrSimulatorParts) -> Self {
        Self {
            indexes: parts.indexes,
            rates: parts.rates,
            emit_pauses: parts.emit_pauses,
            timing: parts.timing,
            rng: parts.rng,
            confusion_resolver: parts.confusion_resolver,
            word_splitter: parts.word_splitter,
        }
    }

    pub fn convert(&mut self, sentence: &str) -> OutputStream {
        let tokens = tokenize_sentence(sentence);
        let mut stream = OutputStream::new();
        let mut misses = Vec::new();

        for (token_index, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                continue;
            }

            if let Some(trigger) = self.convert_word(token, &mut stream) {
                misses.push(MissCandidate {
                    trigger,
                    token_index,
                });
            }

            if token.has_comma {
                let duration = self.timing.comma_pause(&mut self.rng);
                self.push_pause(&mut stream, ElementKind::CommaPause, COMMA_PAUSE_LABEL, duration);
            }
            if token.has_dot {
                let duration = self.timing.sentence_end_pause(&mut self.rng);
                self.push_pause(
                    &mut stream,
                    ElementKind::SentenceEndPause,
                    SENTENCE_END_PAUSE_LABEL,
                    duration,
                );
            }
            if self.rng.random::<f64>() < self.rates.random_pause {
                let duration = self.timing.random_pause_duration(&mut self.rng);
                self.push_pause(&mut stream, ElementKind::RandomPause, RANDOM_PAUSE_LABEL, duration);
            }
        }

        let has_words = stream.iter().any(|e| !e.kind.is_pause());
        if let Some(best) = select_best_miss(&misses).filter(|_| !has_words) {
            self.recover_best_miss(&tokens[best.token_index], best.trigger, &mut stream);
        }

        tracing::debug!(
            tokens = tokens.len(),
            elements = stream.len(),
            clock = self.timing.clock().now(),
            "simulator: sentence converted"
        );
        stream
    }

    pub fn clock(&self) -> SimulationClock {
        self.timing.clock()
    }

    pub fn reset_clock(&mut self) {
        self.timing.reset_clock();
    }

    pub fn indexes(&self) -> &VocabularyIndexes {
        &self.indexes
    }

    pub fn word_duration(&mut self, word: &str) -> f64 {
        self.timing.word_duration(word, &mut self.rng)
    }

    pub fn split(&mut self, word: &str) -> (String, Option<String>) {
        self.word_splitter.split(word, &self.indexes, &mut self.rng)
    }

    pub fn resolve_confusion(&self, word: &str) -> Vec<String> {
        self.confusion_resolver.resolve(word, &self.indexes)
    }

    /// Applies the decision for one non-empty word. Returns the trigger draw
    /// when the word was dropped.
    fn convert_word(&mut self, token: &Token, stream: &mut OutputStream) -> Option<f64> {
        let word = token.word.as_str();
        match decide(token, &self.rates, &mut self.rng) {
            WordDecision::Miss { trigger } => {
                let duration = self.timing.word_duration(word, &mut self.rng);
                self.timing.advance_missed(duration, &mut self.rng);
                return Some(trigger);
            }
            WordDecision::Split => match self.split(word) {
                (first, Some(second)) => {
                    self.push_word(stream, &first);
                    self.push_word(stream, &second);
                }
                (whole, None) => self.push_word(stream, &whole),
            },
            WordDecision::Confuse => {
                let candidates = self.resolve_confusion(word);
                let duration = self.timing.word_duration(word, &mut self.rng);
                let element = self.render(ElementKind::Confusion, candidates, word, duration);
                stream.push(element);
            }
            WordDecision::SpecialAction => {
                let label = format!("<{}>", word.trim());
                let duration = self.timing.special_action_duration(&mut self.rng);
                let element = self.render(ElementKind::SpecialAction, vec![label], "", duration);
                stream.push(element);
            }
            WordDecision::PassThrough => self.push_word(stream, word),
        }
        None
    }

    /// Replaces whatever pauses were kept with the single recovered word.
    fn recover_best_miss(&mut self, token: &Token, trigger: f64, stream: &mut OutputStream) {
        tracing::debug!(
            word = token.word.as_str(),
            trigger,
            dropped_pauses = stream.len(),
            "simulator: every word was missed, recovering the highest trigger"
        );
        stream.clear();
        self.push_word(stream, &token.word);
    }

    fn push_word(&mut self, stream: &mut OutputStream, word: &str) {
        let duration = self.timing.word_duration(word, &mut self.rng);
        let element = self.render(ElementKind::Word, vec![word.to_string()], word, duration);
        stream.push(element);
    }

    /// The clock always moves; the element is only kept when pauses are emitted.
    fn push_pause(
        &mut self,
        stream: &mut OutputStream,
        kind: ElementKind,
        label: &str,
        duration: f64,
    ) {
        let element = self.render(kind, vec![label.to_string()], "", duration);
        if self.emit_pauses {
            stream.push(element);
        }
    }

    fn render(
        &mut self,
        kind: ElementKind,
        candidates: Vec<String>,
        phoneme: &str,
        duration: f64,
    ) -> Element {
        let hypotheses = weigh_candidates(candidates, &mut self.rng);
        let timestamp = self.timing.advance(duration, &mut self.rng);
        Element {
            kind,
            hypotheses,
            phoneme: phoneme.to_string(),
            timestamp,
            duration,
        }
    }
}

/// The miss with the largest trigger draw; the earliest one wins a tie.
fn select_best_miss(misses: &[MissCandidate]) -> Option<MissCandidate> {
    misses.iter().copied().fold(None, |best, miss| match best {
        Some(best) if best.trigger >= miss.trigger => Some(best),
        _ => Some(miss),
    })
}
