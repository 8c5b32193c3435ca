use std::path::PathBuf;
use std::sync::Arc;

use asr_simulator::vocabulary::cache::load_or_build;
use asr_simulator::{
    AsrSimulatorBuilder, LetterDurations, LevenshteinMatcher, OutputFormat, SimulatorConfig,
    StaticVocabulary, VocabularyIndexes, VocabularyProvider, WordListFile,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[path = "asr_simulate/json_stream_formatter.rs"]
mod json_stream_formatter;

const SAMPLE_SENTENCE: &str =
    "Maybe what I think Tastee Wheat tasted like actually tasted like oatmeal or tuna fish";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Lattice,
    Flat,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "asr_simulate")]
#[command(about = "Print a sentence as simulated speech-recognizer output")]
struct Args {
    #[arg(long, env = "ASR_SIM_SENTENCE", default_value = SAMPLE_SENTENCE)]
    sentence: String,
    /// Newline-separated vocabulary. Defaults to the sentence's own words.
    #[arg(long, env = "ASR_SIM_VOCAB")]
    vocab: Option<PathBuf>,
    /// JSON array of per-letter durations in seconds.
    #[arg(long, env = "ASR_SIM_LETTER_DURATIONS")]
    letter_durations: PathBuf,
    /// Directory holding the confusion and length index caches.
    #[arg(long, env = "ASR_SIM_CACHE_DIR")]
    cache_dir: Option<PathBuf>,
    /// JSON simulator config; rate flags below override it.
    #[arg(long, env = "ASR_SIM_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long)]
    p_miss: Option<f64>,
    #[arg(long)]
    p_confuse: Option<f64>,
    #[arg(long)]
    p_confuse_uncertainty: Option<f64>,
    #[arg(long)]
    p_extra: Option<f64>,
    #[arg(long)]
    p_random_pause: Option<f64>,
    #[arg(long, env = "ASR_SIM_SEED")]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Format::Lattice)]
    format: Format,
    #[arg(long, default_value_t = false)]
    emit_pauses: bool,
    /// Also write the stream as JSON to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = build_config(&args)?;

    let provider: Box<dyn VocabularyProvider> = match &args.vocab {
        Some(path) => Box::new(WordListFile::new(path)),
        None => Box::new(StaticVocabulary::new(
            args.sentence
                .split_whitespace()
                .map(asr_simulator::simulation::tokenization::clean_word)
                .filter(|w| !w.is_empty()),
        )),
    };
    let indexes = match &args.cache_dir {
        Some(dir) => load_or_build(provider.as_ref(), dir, &LevenshteinMatcher),
        None => provider
            .list_words()
            .map(|words| VocabularyIndexes::build(&words, &LevenshteinMatcher)),
    }
    .map_err(|err| format!("Failed to prepare vocabulary indexes: {err}"))?;

    let letter_durations = LetterDurations::load(&args.letter_durations)
        .map_err(|err| format!("Failed to load letter durations: {err}"))?;

    let mut simulator = AsrSimulatorBuilder::new(config)
        .with_indexes(Arc::new(indexes))
        .with_letter_durations(letter_durations)
        .build()
        .map_err(|err| format!("Failed to build simulator: {err}"))?;

    let stream = simulator.convert(&args.sentence);

    println!("{}", args.sentence);
    match args.format {
        Format::Lattice => print_lines(OutputFormat::Lattice.render_stream(&stream)),
        Format::Flat => print_lines(OutputFormat::Flat.render_stream(&stream)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&stream)
                .map_err(|err| format!("Failed to serialize stream: {err}"))?;
            println!("{json}");
        }
    }

    if let Some(out) = &args.out {
        json_stream_formatter::write_stream(out, &args.sentence, &stream)?;
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<SimulatorConfig, String> {
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => SimulatorConfig::default(),
    };
    let overrides = [
        (args.p_miss, &mut config.rates.miss),
        (args.p_confuse, &mut config.rates.confuse),
        (args.p_confuse_uncertainty, &mut config.rates.confuse_uncertainty),
        (args.p_extra, &mut config.rates.extra),
        (args.p_random_pause, &mut config.rates.random_pause),
    ];
    for (value, slot) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.emit_pauses |= args.emit_pauses;
    Ok(config)
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
