use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Word,
    Confusion,
    SpecialAction,
    CommaPause,
    SentenceEndPause,
    RandomPause,
}

impl ElementKind {
    pub fn is_pause(self) -> bool {
        matches!(
            self,
            ElementKind::CommaPause | ElementKind::SentenceEndPause | ElementKind::RandomPause
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordHypothesis {
    pub word: String,
    pub probability: f64,
}

/// One timestamped unit of simulated recognizer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Weighted hypotheses in candidate order; probabilities sum to 1.
    pub hypotheses: Vec<WordHypothesis>,
    /// Placeholder phoneme string: the source word, or empty for pauses.
    pub phoneme: String,
    /// Clock value in seconds when the element starts, rounded to 2 decimals.
    pub timestamp: f64,
    /// Seconds, rounded to 2 decimals.
    pub duration: f64,
}

impl Element {
    /// First candidate, the one single-hypothesis consumers keep.
    pub fn primary_word(&self) -> &str {
        self.hypotheses
            .first()
            .map(|h| h.word.as_str())
            .unwrap_or_default()
    }

    pub fn probability_mass(&self) -> f64 {
        self.hypotheses.iter().map(|h| h.probability).sum()
    }
}

pub type OutputStream = Vec<Element>;
