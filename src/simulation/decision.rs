use rand::Rng;

use super::tokenization::Token;
use crate::config::ErrorRates;

/// Words this short or shorter are never split.
const MAX_UNSPLITTABLE_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WordDecision {
    /// Dropped word. `trigger` is the draw that fell under the miss rate.
    Miss { trigger: f64 },
    Split,
    Confuse,
    /// Emitted as a `<word>` marker with an empty phoneme, not the cleaned word.
    SpecialAction,
    PassThrough,
}

/// One mutually exclusive branch of the per-word policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRule {
    Miss,
    Extra,
    Confuse,
    SpecialAction,
}

impl DecisionRule {
    /// Evaluation order; the first rule that fires decides the word.
    pub const ORDER: [DecisionRule; 4] = [
        DecisionRule::Miss,
        DecisionRule::Extra,
        DecisionRule::Confuse,
        DecisionRule::SpecialAction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionRule::Miss => "miss",
            DecisionRule::Extra => "extra",
            DecisionRule::Confuse => "confuse",
            DecisionRule::SpecialAction => "special_action",
        }
    }

    /// Probabilistic rules draw exactly once each time they are evaluated.
    pub fn evaluate<R: Rng + ?Sized>(
        self,
        token: &Token,
        rates: &ErrorRates,
        rng: &mut R,
    ) -> Option<WordDecision> {
        match self {
            DecisionRule::Miss => {
                let trigger = rng.random::<f64>();
                (trigger < rates.miss).then_some(WordDecision::Miss { trigger })
            }
            DecisionRule::Extra => {
                let fires = rng.random::<f64>() < rates.extra;
                (fires && token.word.chars().count() > MAX_UNSPLITTABLE_LEN)
                    .then_some(WordDecision::Split)
            }
            DecisionRule::Confuse => {
                (rng.random::<f64>() < rates.confuse).then_some(WordDecision::Confuse)
            }
            DecisionRule::SpecialAction => {
                token.is_special_action.then_some(WordDecision::SpecialAction)
            }
        }
    }
}

pub fn decide<R: Rng + ?Sized>(token: &Token, rates: &ErrorRates, rng: &mut R) -> WordDecision {
    for rule in DecisionRule::ORDER {
        if let Some(decision) = rule.evaluate(token, rates, rng) {
            tracing::debug!(word = token.word.as_str(), rule = rule.as_str(), "decision: rule fired");
            return decision;
        }
    }
    WordDecision::PassThrough
}
