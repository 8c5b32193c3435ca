use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::SimulatorError;
use crate::types::Element;

/// Confidence every flat record carries.
pub const FLAT_CONFIDENCE: f64 = 1.0;

/// How an [`Element`] is rendered to a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `{"word":p,...},{"phoneme"},{timestamp,duration}`; keeps every hypothesis.
    #[default]
    Lattice,
    /// `word timestamp duration 1.0`; keeps the first hypothesis only.
    Flat,
}

impl OutputFormat {
    pub fn render(self, element: &Element) -> String {
        match self {
            OutputFormat::Lattice => render_lattice(element),
            OutputFormat::Flat => render_flat(element),
        }
    }

    pub fn render_stream(self, elements: &[Element]) -> Vec<String> {
        elements.iter().map(|e| self.render(e)).collect()
    }
}

impl FromStr for OutputFormat {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lattice" => Ok(OutputFormat::Lattice),
            "flat" => Ok(OutputFormat::Flat),
            other => Err(SimulatorError::invalid_input(format!(
                "unknown output format `{other}`"
            ))),
        }
    }
}

pub fn render_lattice(element: &Element) -> String {
    let mut out = String::from("{");
    for (i, hyp) in element.hypotheses.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "\"{}\":{}", hyp.word, hyp.probability);
    }
    let _ = write!(
        out,
        "}},{{\"{}\"}},{{{:.2},{:.2}}}",
        element.phoneme, element.timestamp, element.duration
    );
    out
}

pub fn render_flat(element: &Element) -> String {
    format!(
        "{} {:.2} {:.2} {:.1}",
        element.primary_word(),
        element.timestamp,
        element.duration,
        FLAT_CONFIDENCE
    )
}

/// A flat line read back into its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    pub word: String,
    pub timestamp: f64,
    pub duration: f64,
    pub confidence: f64,
}

impl FromStr for FlatRecord {
    type Err = SimulatorError;

    /// Numeric fields are taken from the right so words containing blanks survive.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.rsplitn(4, ' ');
        let mut next_number = |name: &str| -> Result<f64, SimulatorError> {
            let field = fields.next().ok_or_else(|| {
                SimulatorError::invalid_input(format!("flat record missing {name}: `{line}`"))
            })?;
            field.parse::<f64>().map_err(|e| {
                SimulatorError::invalid_input(format!("flat record {name} `{field}`: {e}"))
            })
        };
        let confidence = next_number("confidence")?;
        let duration = next_number("duration")?;
        let timestamp = next_number("timestamp")?;
        let word = fields
            .next()
            .ok_or_else(|| SimulatorError::invalid_input(format!("flat record missing word: `{line}`")))?
            .to_string();
        Ok(Self {
            word,
            timestamp,
            duration,
            confidence,
        })
    }
}
