use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ConfusionIndex, LengthIndex, VocabularyIndexes};
use crate::error::SimulatorError;
use crate::pipeline::traits::{SimilarityMatcher, VocabularyProvider};

pub const CONFUSION_CACHE_FILE: &str = "confusion_index.json";
pub const LENGTH_CACHE_FILE: &str = "length_index.json";

/// Loads both indexes from `cache_dir`, rebuilding and saving whichever is
/// missing. The vocabulary is only listed when a rebuild is needed.
pub fn load_or_build(
    provider: &dyn VocabularyProvider,
    cache_dir: &Path,
    matcher: &dyn SimilarityMatcher,
) -> Result<VocabularyIndexes, SimulatorError> {
    let confusion_path = cache_dir.join(CONFUSION_CACHE_FILE);
    let length_path = cache_dir.join(LENGTH_CACHE_FILE);

    let mut confusion = load_confusion_index(&confusion_path)?;
    let mut lengths = load_length_index(&length_path)?;
    if confusion.is_some() && lengths.is_some() {
        tracing::info!(cache_dir = %cache_dir.display(), "vocabulary: loaded cached indexes");
    } else {
        let words = provider.list_words()?;
        if lengths.is_none() {
            tracing::info!(path = %length_path.display(), "vocabulary: length index cache missing, rebuilding");
            let built = LengthIndex::build(&words);
            save_length_index(&length_path, &built)?;
            lengths = Some(built);
        }
        if confusion.is_none() {
            tracing::info!(path = %confusion_path.display(), words = words.len(), "vocabulary: confusion index cache missing, rebuilding");
            let built = ConfusionIndex::build(&words, matcher);
            save_confusion_index(&confusion_path, &built)?;
            confusion = Some(built);
        }
    }

    Ok(VocabularyIndexes {
        confusion: confusion.unwrap_or_default(),
        lengths: lengths.unwrap_or_default(),
    })
}

/// `Ok(None)` when the cache file does not exist.
pub fn load_confusion_index(path: &Path) -> Result<Option<ConfusionIndex>, SimulatorError> {
    let raw: Option<ConfusionIndex> = read_json(path, "parse confusion index cache")?;
    // Stored entries are never empty, whatever the file says.
    Ok(raw.map(|index| ConfusionIndex::from_entries(index.candidates)))
}

pub fn save_confusion_index(path: &Path, index: &ConfusionIndex) -> Result<(), SimulatorError> {
    write_json(path, index, "write confusion index cache")
}

/// `Ok(None)` when the cache file does not exist.
pub fn load_length_index(path: &Path) -> Result<Option<LengthIndex>, SimulatorError> {
    let index: Option<LengthIndex> = read_json(path, "parse length index cache")?;
    if let Some(index) = &index {
        index.validate()?;
    }
    Ok(index)
}

pub fn save_length_index(path: &Path, index: &LengthIndex) -> Result<(), SimulatorError> {
    write_json(path, index, "write length index cache")
}

fn read_json<T: DeserializeOwned>(
    path: &Path,
    context: &'static str,
) -> Result<Option<T>, SimulatorError> {
    if !path.is_file() {
        return Ok(None);
    }
    let file = File::open(path).map_err(|e| SimulatorError::io("open index cache", e))?;
    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|e| SimulatorError::json(context, e))
}

fn write_json<T: Serialize>(
    path: &Path,
    value: &T,
    context: &'static str,
) -> Result<(), SimulatorError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SimulatorError::io("create cache directory", e))?;
    }
    let file = File::create(path).map_err(|e| SimulatorError::io("create index cache", e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|e| SimulatorError::json(context, e))?;
    writer
        .flush()
        .map_err(|e| SimulatorError::io("flush index cache", e))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::vocabulary::provider::StaticVocabulary;
    use crate::vocabulary::LevenshteinMatcher;

    struct CountingProvider {
        inner: StaticVocabulary,
        calls: AtomicUsize,
    }

    impl VocabularyProvider for CountingProvider {
        fn list_words(&self) -> Result<Vec<String>, SimulatorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_words()
        }
    }

    fn fresh_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn builds_then_loads_from_cache() {
        let dir = fresh_dir("asr_simulator_cache_roundtrip");
        let provider = CountingProvider {
            inner: StaticVocabulary::new(["oat", "meal", "meat"]),
            calls: AtomicUsize::new(0),
        };

        let built = load_or_build(&provider, &dir, &LevenshteinMatcher).unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(dir.join(CONFUSION_CACHE_FILE).is_file());
        assert!(dir.join(LENGTH_CACHE_FILE).is_file());

        let loaded = load_or_build(&provider, &dir, &LevenshteinMatcher).unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(built, loaded);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let path = Path::new("/nonexistent/asr_simulator/confusion_index.json");
        assert!(load_confusion_index(path).unwrap().is_none());
        assert!(load_length_index(path).unwrap().is_none());
    }

    #[test]
    fn corrupt_cache_is_an_error() {
        let dir = fresh_dir("asr_simulator_cache_corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(LENGTH_CACHE_FILE);
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_length_index(&path),
            Err(SimulatorError::Json { .. })
        ));
        fs::write(&path, r#"{"0": ["x"]}"#).unwrap();
        assert!(matches!(
            load_length_index(&path),
            Err(SimulatorError::CorruptIndex { .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn loaded_confusion_cache_drops_empty_entries() {
        let dir = fresh_dir("asr_simulator_cache_empty_entries");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFUSION_CACHE_FILE);
        fs::write(&path, r#"{"oat": ["oat", "out"], "zzz": []}"#).unwrap();
        let index = load_confusion_index(&path).unwrap().unwrap();
        assert_eq!(index.candidates("oat").unwrap(), ["oat", "out"]);
        assert!(index.candidates("zzz").is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
