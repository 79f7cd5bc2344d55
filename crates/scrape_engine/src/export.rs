use std::path::{Path, PathBuf};

use scrape_core::{export_filename, ScrapeResult};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no result #{number} ({available} available)")]
    NoSuchResult { number: usize, available: usize },
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Pretty-printed JSON document for a single result.
pub fn render_export(result: &ScrapeResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Writes result number `number` (1-based) to `{dir}/result-<number>.json`.
pub fn export_result(
    dir: &Path,
    results: &[ScrapeResult],
    number: usize,
) -> Result<PathBuf, ExportError> {
    let index = number
        .checked_sub(1)
        .filter(|index| *index < results.len())
        .ok_or(ExportError::NoSuchResult {
            number,
            available: results.len(),
        })?;
    let document = render_export(&results[index])?;
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    Ok(writer.write(&export_filename(index), document)?)
}
