//! Loading the measurement CSV with a fallback to the built-in dataset.

use std::path::Path;

use tracing::{info, warn};

use crate::parser::{CsvReading, parse};
use crate::reference::DEFAULT_CSV;

/// Where the readings returned by [`load_csv`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    File,
    Fallback,
}

/// Reads and parses the CSV at `path`.
///
/// A missing or unreadable file, an empty file, or one without a single valid
/// row all fall back to [`DEFAULT_CSV`]. This never returns an error.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_csv(path: &Path) -> (Vec<CsvReading>, Origin) {
    let reason = match std::fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => "file is empty".to_string(),
        Ok(text) => {
            let readings = parse(&text);
            if !readings.is_empty() {
                info!(count = readings.len(), "Loaded CSV readings");
                return (readings, Origin::File);
            }
            "no valid rows".to_string()
        }
        Err(e) => e.to_string(),
    };

    warn!(%reason, "CSV load failed, using built-in default data");
    (parse(DEFAULT_CSV), Origin::Fallback)
}
