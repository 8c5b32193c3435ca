pub mod config;
pub mod error;
pub mod pipeline;
pub mod simulation;
pub mod types;
pub mod vocabulary;

pub use config::{DistributionParams, ErrorRates, SimulatorConfig, TimingParams};
pub use error::SimulatorError;
pub use pipeline::builder::AsrSimulatorBuilder;
pub use pipeline::runtime::AsrSimulator;
pub use pipeline::traits::{ConfusionResolver, SimilarityMatcher, VocabularyProvider, WordSplitter};
pub use simulation::format::{FlatRecord, OutputFormat};
pub use simulation::timing::{SimulationClock, TimingModel};
pub use types::{Element, ElementKind, OutputStream, WordHypothesis};
pub use vocabulary::provider::{LetterDurations, StaticVocabulary, WordListFile};
pub use vocabulary::{ConfusionIndex, LengthIndex, LevenshteinMatcher, VocabularyIndexes};
