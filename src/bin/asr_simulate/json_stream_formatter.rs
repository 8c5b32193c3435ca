use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use asr_simulator::Element;
use serde::Serialize;

#[derive(Serialize)]
struct StreamReport<'a> {
    sentence: &'a str,
    elements: &'a [Element],
}

pub fn write_stream(path: &Path, sentence: &str, elements: &[Element]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create stream output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create stream file '{}': {err}", path.display()))?;
    let report = StreamReport { sentence, elements };
    serde_json::to_writer_pretty(&mut file, &report).map_err(|err| {
        format!(
            "Failed to serialize stream JSON '{}': {err}",
            path.display()
        )
    })?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize stream file '{}': {err}", path.display()))?;
    Ok(())
}
