use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::SimulatorError;
use crate::pipeline::traits::VocabularyProvider;

/// Vocabulary held in memory, in caller order.
#[derive(Debug, Clone, Default)]
pub struct StaticVocabulary {
    words: Vec<String>,
}

impl StaticVocabulary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl VocabularyProvider for StaticVocabulary {
    fn list_words(&self) -> Result<Vec<String>, SimulatorError> {
        Ok(self.words.clone())
    }
}

/// Newline-separated word list on disk. Blank lines are skipped.
#[derive(Debug, Clone)]
pub struct WordListFile {
    path: PathBuf,
}

impl WordListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VocabularyProvider for WordListFile {
    fn list_words(&self) -> Result<Vec<String>, SimulatorError> {
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| SimulatorError::io("read word list", e))?;
        Ok(data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Empirical per-letter durations in seconds, sampled with replacement.
#[derive(Debug, Clone)]
pub struct LetterDurations {
    samples: Vec<f64>,
}

impl LetterDurations {
    pub fn new(samples: Vec<f64>) -> Result<Self, SimulatorError> {
        if samples.is_empty() {
            return Err(SimulatorError::invalid_input(
                "letter-duration table must not be empty",
            ));
        }
        if let Some(bad) = samples.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(SimulatorError::invalid_input(format!(
                "letter durations must be finite and non-negative, found {bad}"
            )));
        }
        Ok(Self { samples })
    }

    /// Reads a JSON array of seconds.
    pub fn load(path: &Path) -> Result<Self, SimulatorError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| SimulatorError::io("read letter durations", e))?;
        let samples: Vec<f64> = serde_json::from_str(&data)
            .map_err(|e| SimulatorError::json("parse letter durations", e))?;
        Self::new(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.samples[rng.random_range(0..self.samples.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_file_skips_blank_lines() {
        let path = std::env::temp_dir().join("asr_simulator_word_list.txt");
        std::fs::write(&path, "oat\n\n  meal \nfish\n").expect("write word list");
        let words = WordListFile::new(&path).list_words().unwrap();
        assert_eq!(words, ["oat", "meal", "fish"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn word_list_file_missing_is_io_error() {
        let err = WordListFile::new("/nonexistent/words.txt")
            .list_words()
            .unwrap_err();
        assert!(matches!(err, SimulatorError::Io { .. }));
    }

    #[test]
    fn letter_durations_validate_samples() {
        assert!(LetterDurations::new(Vec::new()).is_err());
        assert!(LetterDurations::new(vec![0.1, -0.2]).is_err());
        assert!(LetterDurations::new(vec![0.1, f64::INFINITY]).is_err());
        assert_eq!(LetterDurations::new(vec![0.1, 0.2]).unwrap().len(), 2);
    }

    #[test]
    fn letter_durations_load_json_array() {
        let path = std::env::temp_dir().join("asr_simulator_letter_durations.json");
        std::fs::write(&path, "[0.05, 0.07, 0.11]").expect("write durations");
        let table = LetterDurations::load(&path).unwrap();
        assert_eq!(table.len(), 3);
        let _ = std::fs::remove_file(&path);

        let bad = std::env::temp_dir().join("asr_simulator_letter_durations_bad.json");
        std::fs::write(&bad, "{\"a\": 1}").expect("write durations");
        assert!(matches!(
            LetterDurations::load(&bad),
            Err(SimulatorError::Json { .. })
        ));
        let _ = std::fs::remove_file(&bad);
    }
}
