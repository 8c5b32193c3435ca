use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{DistributionParams, TimingParams};
use crate::error::SimulatorError;
use crate::vocabulary::provider::LetterDurations;

const MS_PER_SECOND: f64 = 1000.0;

/// Rounds to the 2-decimal precision every timing value is kept at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A timing distribution ready to draw from.
#[derive(Debug, Clone, Copy)]
pub enum Sampler {
    /// Draws `N(mean, std_dev)` in the caller's units.
    Normal(Normal<f64>),
    /// Draws `s ~ N(log10(mean), log10(std_dev))` and yields `10^s` ms as seconds.
    LogNormal(Normal<f64>),
}

impl Sampler {
    pub fn normal(params: DistributionParams) -> Result<Self, SimulatorError> {
        Normal::new(params.mean, params.std_dev)
            .map(Sampler::Normal)
            .map_err(|e| {
                SimulatorError::invalid_distribution("normal", params.mean, params.std_dev, e)
            })
    }

    pub fn log_normal(params: DistributionParams) -> Result<Self, SimulatorError> {
        if !(params.mean > 0.0) || !(params.std_dev >= 1.0) {
            return Err(SimulatorError::invalid_distribution(
                "log-normal",
                params.mean,
                params.std_dev,
                "needs mean > 0 and std_dev >= 1",
            ));
        }
        Normal::new(params.mean.log10(), params.std_dev.log10())
            .map(Sampler::LogNormal)
            .map_err(|e| {
                SimulatorError::invalid_distribution("log-normal", params.mean, params.std_dev, e)
            })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Normal(normal) => round2(normal.sample(rng)),
            Sampler::LogNormal(normal) => {
                round2(10f64.powf(normal.sample(rng)) / MS_PER_SECOND)
            }
        }
    }
}

/// One draw from `N(mu, sigma)`, rounded to 2 decimals.
pub fn sample_normal<R: Rng + ?Sized>(
    rng: &mut R,
    mu: f64,
    sigma: f64,
) -> Result<f64, SimulatorError> {
    Ok(Sampler::normal(DistributionParams::new(mu, sigma))?.sample(rng))
}

/// One log10-normal draw in milliseconds, returned in seconds rounded to 2 decimals.
pub fn sample_log_normal<R: Rng + ?Sized>(
    rng: &mut R,
    mu: f64,
    sigma: f64,
) -> Result<f64, SimulatorError> {
    Ok(Sampler::log_normal(DistributionParams::new(mu, sigma))?.sample(rng))
}

/// Running time cursor in seconds. Every update is rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    value: f64,
}

impl SimulationClock {
    pub fn now(&self) -> f64 {
        self.value
    }

    pub fn advance(&mut self, seconds: f64) {
        self.value = round2(self.value + seconds);
    }

    pub fn is_at_origin(&self) -> bool {
        self.value == 0.0
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Samples every duration and pause and owns the simulation clock.
#[derive(Debug, Clone)]
pub struct TimingModel {
    inter_word_pause: Sampler,
    comma_pause: Sampler,
    sentence_end_pause: Sampler,
    special_action: Sampler,
    random_pause: Sampler,
    letter_durations: LetterDurations,
    clock: SimulationClock,
}

impl TimingModel {
    pub fn new(
        params: &TimingParams,
        letter_durations: LetterDurations,
    ) -> Result<Self, SimulatorError> {
        Ok(Self {
            inter_word_pause: Sampler::log_normal(params.inter_word_pause)?,
            comma_pause: Sampler::log_normal(params.comma_pause)?,
            sentence_end_pause: Sampler::log_normal(params.sentence_end_pause)?,
            special_action: Sampler::normal(params.special_action)?,
            random_pause: Sampler::normal(params.random_pause)?,
            letter_durations,
            clock: SimulationClock::default(),
        })
    }

    pub fn clock(&self) -> SimulationClock {
        self.clock
    }

    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// Sum of `chars(word)` letter durations drawn with replacement from the table.
    pub fn word_duration<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> f64 {
        let total: f64 = word
            .chars()
            .map(|_| self.letter_durations.sample(rng))
            .sum();
        round2(total)
    }

    pub fn inter_word_pause<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inter_word_pause.sample(rng)
    }

    pub fn comma_pause<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.comma_pause.sample(rng)
    }

    pub fn sentence_end_pause<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sentence_end_pause.sample(rng)
    }

    pub fn special_action_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        non_negative(self.special_action.sample(rng))
    }

    pub fn random_pause_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        non_negative(self.random_pause.sample(rng))
    }

    /// Advances the clock past an element of `duration` plus one inter-word
    /// pause. Returns the element's start timestamp.
    pub fn advance<R: Rng + ?Sized>(&mut self, duration: f64, rng: &mut R) -> f64 {
        let start = self.clock.now();
        let pause = self.inter_word_pause(rng);
        self.clock.advance(duration + pause);
        start
    }

    /// Advances like [`TimingModel::advance`], except that an advance taken
    /// from the origin is undone so a sentence never opens on a dropped word.
    pub fn advance_missed<R: Rng + ?Sized>(&mut self, duration: f64, rng: &mut R) -> f64 {
        let from_origin = self.clock.is_at_origin();
        let start = self.advance(duration, rng);
        if from_origin {
            self.clock.reset();
        }
        start
    }
}

/// Normal draws may go negative; elements never do.
fn non_negative(draw: f64) -> f64 {
    draw.max(0.0)
}
