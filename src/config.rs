use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimulatorError;

/// Mean and standard deviation of one timing event.
///
/// Log-normal events are given in milliseconds and come out in seconds;
/// normal events are drawn as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl DistributionParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// Per-event timing distributions.
///
/// Pauses between words, after commas and at sentence ends are log-normal;
/// special actions and injected noise pauses are normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    pub inter_word_pause: DistributionParams,
    pub comma_pause: DistributionParams,
    pub sentence_end_pause: DistributionParams,
    pub special_action: DistributionParams,
    pub random_pause: DistributionParams,
}

impl TimingParams {
    pub const DEFAULT_INTER_WORD_PAUSE: DistributionParams = DistributionParams::new(78.0, 1.3);
    pub const DEFAULT_COMMA_PAUSE: DistributionParams = DistributionParams::new(426.0, 1.6);
    pub const DEFAULT_SENTENCE_END_PAUSE: DistributionParams =
        DistributionParams::new(1585.0, 1.3);
    pub const DEFAULT_SPECIAL_ACTION: DistributionParams = DistributionParams::new(100.0, 50.0);
    pub const DEFAULT_RANDOM_PAUSE: DistributionParams = DistributionParams::new(1200.0, 1500.0);
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            inter_word_pause: Self::DEFAULT_INTER_WORD_PAUSE,
            comma_pause: Self::DEFAULT_COMMA_PAUSE,
            sentence_end_pause: Self::DEFAULT_SENTENCE_END_PAUSE,
            special_action: Self::DEFAULT_SPECIAL_ACTION,
            random_pause: Self::DEFAULT_RANDOM_PAUSE,
        }
    }
}

/// Probabilities of each simulated recognizer error, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorRates {
    pub miss: f64,
    pub confuse: f64,
    /// Reserved hook; accepted and validated but not consumed by the engine.
    pub confuse_uncertainty: f64,
    pub extra: f64,
    pub random_pause: f64,
}

impl ErrorRates {
    pub fn validate(&self) -> Result<(), SimulatorError> {
        let named = [
            ("miss", self.miss),
            ("confuse", self.confuse),
            ("confuse_uncertainty", self.confuse_uncertainty),
            ("extra", self.extra),
            ("random_pause", self.random_pause),
        ];
        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulatorError::InvalidRate { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub rates: ErrorRates,
    pub timing: TimingParams,
    /// Seed for the simulator's generator; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Keep comma, sentence-end and noise pause elements in the output
    /// stream instead of applying only their clock effect.
    pub emit_pauses: bool,
}

impl SimulatorConfig {
    pub fn load(path: &Path) -> Result<Self, SimulatorError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| SimulatorError::io("read simulator config", e))?;
        serde_json::from_str(&data).map_err(|e| SimulatorError::json("parse simulator config", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulator_config_default() {
        let config = SimulatorConfig::default();
        assert_eq!(config.rates, ErrorRates::default());
        assert_eq!(config.rates.miss, 0.0);
        assert_eq!(config.timing.inter_word_pause.mean, 78.0);
        assert_eq!(config.timing.comma_pause, DistributionParams::new(426.0, 1.6));
        assert_eq!(config.timing.sentence_end_pause.mean, 1585.0);
        assert_eq!(config.timing.special_action.std_dev, 50.0);
        assert_eq!(config.timing.random_pause.std_dev, 1500.0);
        assert!(config.seed.is_none());
        assert!(!config.emit_pauses);
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        let rates = ErrorRates {
            miss: 1.2,
            ..ErrorRates::default()
        };
        assert!(rates.validate().is_err());

        let rates = ErrorRates {
            extra: f64::NAN,
            ..ErrorRates::default()
        };
        assert!(matches!(
            rates.validate(),
            Err(SimulatorError::InvalidRate { name: "extra", .. })
        ));

        let rates = ErrorRates {
            miss: 1.0,
            confuse: 0.0,
            confuse_uncertainty: 0.5,
            extra: 0.25,
            random_pause: 0.1,
        };
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "rates": { "miss": 0.1, "extra": 0.05 },
            "timing": { "comma_pause": { "mean": 400.0, "std_dev": 1.5 } },
            "seed": 7
        }"#;
        let config: SimulatorConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(config.rates.miss, 0.1);
        assert_eq!(config.rates.confuse, 0.0);
        assert_eq!(config.rates.extra, 0.05);
        assert_eq!(config.timing.comma_pause, DistributionParams::new(400.0, 1.5));
        assert_eq!(
            config.timing.inter_word_pause,
            TimingParams::DEFAULT_INTER_WORD_PAUSE
        );
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join("asr_simulator_config_load.json");
        std::fs::write(&path, r#"{"rates": {"confuse": 0.3}, "emit_pauses": true}"#)
            .expect("write config");
        let config = SimulatorConfig::load(&path).expect("load should succeed");
        assert_eq!(config.rates.confuse, 0.3);
        assert!(config.emit_pauses);
        let _ = std::fs::remove_file(&path);

        assert!(SimulatorConfig::load(Path::new("/nonexistent/sim.json")).is_err());
    }
}
