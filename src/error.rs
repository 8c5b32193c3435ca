use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {family} distribution (mean={mean}, std_dev={std_dev}): {reason}")]
    InvalidDistribution {
        family: &'static str,
        mean: f64,
        std_dev: f64,
        reason: String,
    },
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("corrupt vocabulary index: {message}")]
    CorruptIndex { message: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl SimulatorError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_distribution(
        family: &'static str,
        mean: f64,
        std_dev: f64,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidDistribution {
            family,
            mean,
            std_dev,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn corrupt_index(message: impl Into<String>) -> Self {
        Self::CorruptIndex {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
