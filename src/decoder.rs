//! CSV decoding into normalized [`Email`] records.
//!
//! The header row is treated as a capability map (header name → column index)
//! rather than a fixed positional layout, so exports with reordered, missing or
//! extra columns still decode. Unknown headers are ignored; known columns that
//! are absent decode to an empty string on every row.

use crate::error::DecodeError;
use crate::logging::OperationTimer;
use crate::metrics::MetricsCollector;
use crate::models::{Column, Email, NO_SUBJECT, UNKNOWN_SENDER};
use crate::utils::{normalize_field, or_default};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Decode CSV text (with a header row) into records.
///
/// Record ids are the zero-based data row index. Fails with
/// [`DecodeError::Empty`] when there are no data rows and with
/// [`DecodeError::MalformedCsv`] when the text cannot be tokenized.
pub fn decode(csv_text: &str) -> Result<Vec<Email>, DecodeError> {
    let metrics = MetricsCollector::default();
    let timer = OperationTimer::new("decode_csv");

    let result = decode_records(csv_text);
    let duration = timer.finish();
    match &result {
        Ok(emails) => {
            metrics.record_decode(emails.len(), duration);
            info!(records = emails.len(), "Decoded CSV");
        }
        Err(err) => {
            metrics.record_decode_failure(match err {
                DecodeError::Empty => "empty",
                DecodeError::MalformedCsv(_) => "malformed",
            });
            warn!(error = %err, "Failed to decode CSV");
        }
    }
    result
}

fn decode_records(csv_text: &str) -> Result<Vec<Email>, DecodeError> {
    let text = csv_text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(csv_text);

    if let Some(line) = unterminated_quote_line(text) {
        return Err(DecodeError::MalformedCsv(format!(
            "unterminated quoted field starting on line {line}"
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?;
    let columns = ColumnMap::from_headers(headers);
    debug!(
        recognised = columns.len(),
        headers = headers.len(),
        "Mapped CSV header"
    );

    let mut emails = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(malformed)?;
        emails.push(columns.build_email(index, &row));
    }

    if emails.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(emails)
}

fn malformed(err: csv::Error) -> DecodeError {
    DecodeError::MalformedCsv(err.to_string())
}

/// Header name → cell index for the recognised columns
#[derive(Debug, Default)]
struct ColumnMap {
    indices: HashMap<Column, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut indices = HashMap::new();
        for (index, name) in headers.iter().enumerate() {
            if let Some(column) = Column::from_name(name) {
                // First occurrence wins for duplicated headers
                indices.entry(column).or_insert(index);
            }
        }
        Self { indices }
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn cell(&self, row: &StringRecord, column: Column) -> String {
        normalize_field(self.indices.get(&column).and_then(|&index| row.get(index)))
    }

    fn build_email(&self, id: usize, row: &StringRecord) -> Email {
        let mut email = Email::new(id);
        for column in Column::ALL {
            *email.field_mut(column) = self.cell(row, column);
        }
        email.de = or_default(std::mem::take(&mut email.de), UNKNOWN_SENDER);
        email.asunto = or_default(std::mem::take(&mut email.asunto), NO_SUBJECT);
        email
    }
}

/// Line on which a quoted field opens without ever closing.
///
/// Mirrors the tokenizer's quoting rule: a field is quoted only when its first
/// character is `"`, and `""` inside a quoted field is an escaped quote.
fn unterminated_quote_line(text: &str) -> Option<usize> {
    let mut line = 1;
    let mut opened_on = 0;
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                opened_on = line;
                at_field_start = false;
            }
            ',' | '\r' => at_field_start = true,
            '\n' => {
                line += 1;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }

    in_quotes.then_some(opened_on)
}
