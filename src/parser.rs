//! Parser for the `date,time,value` measurement CSV.
//!
//! Parsing never fails. Malformed rows are dropped with a warning and the
//! remaining rows are returned in file order.

use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

/// One PM2.5 measurement from the CSV source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvReading {
    /// `YY.MM.DD`
    pub date: String,
    /// `H.MM`, minute optional
    pub time: String,
    /// µg/m³, always finite and non-negative
    pub value: f64,
}

/// Why a data row was rejected.
#[derive(Debug, Clone, PartialEq)]
enum RowRejection {
    Unreadable,
    TooFewFields(usize),
    MissingField,
    InvalidValue(String),
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::Unreadable => write!(f, "line could not be split into fields"),
            RowRejection::TooFewFields(n) => write!(f, "expected 3 fields, found {n}"),
            RowRejection::MissingField => write!(f, "date, time or value is empty"),
            RowRejection::InvalidValue(v) => write!(f, "invalid concentration '{v}'"),
        }
    }
}

/// A dropped data row and its 1-based line number in the source text.
#[derive(Debug, Clone, PartialEq)]
struct RejectedRow {
    line: usize,
    reason: RowRejection,
}

/// Parses CSV text into readings.
///
/// Lines end at `\n` or `\r\n`; a lone `\r` does not end a line. Blank lines
/// are skipped and the first non-blank line is always treated as the header,
/// whatever it contains. Each data row needs at least three comma-separated
/// fields (date, time, value); extra fields are ignored. Quoting is not
/// supported, so a literal comma always splits a field.
pub fn parse(text: &str) -> Vec<CsvReading> {
    parse_lines(text).0
}

fn parse_lines(text: &str) -> (Vec<CsvReading>, Vec<RejectedRow>) {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if lines.len() <= 1 {
        warn!("CSV has no data rows beyond the header");
        return (Vec::new(), Vec::new());
    }

    debug!(rows = lines.len(), "Parsing CSV rows");

    let mut readings = Vec::new();
    let mut rejected = Vec::new();
    for &(line, raw) in lines.iter().skip(1) {
        let parsed = split_fields(raw)
            .ok_or(RowRejection::Unreadable)
            .and_then(|record| parse_row(&record));
        match parsed {
            Ok(reading) => readings.push(reading),
            Err(reason) => {
                let row = RejectedRow { line, reason };
                warn!(line = row.line, row = raw, reason = %row.reason, "Dropping CSV row");
                rejected.push(row);
            }
        }
    }

    info!(
        valid = readings.len(),
        dropped = rejected.len(),
        "CSV parsed"
    );

    (readings, rejected)
}

/// Splits one line into trimmed fields.
fn split_fields(line: &str) -> Option<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Some(record),
        _ => None,
    }
}

fn parse_row(record: &StringRecord) -> Result<CsvReading, RowRejection> {
    if record.len() < 3 {
        return Err(RowRejection::TooFewFields(record.len()));
    }

    let (date, time, value) = (&record[0], &record[1], &record[2]);
    if date.is_empty() || time.is_empty() || value.is_empty() {
        return Err(RowRejection::MissingField);
    }

    let value = match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => return Err(RowRejection::InvalidValue(value.to_string())),
    };

    Ok(CsvReading {
        date: date.to_string(),
        time: time.to_string(),
        value,
    })
}
