//! Delimited text decoding.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

const DELIMITER_CANDIDATES: [u8; 4] = [b'\t', b';', b',', b'|'];
const SNIFF_LINES: usize = 10;

/// Decodes file bytes as UTF-8, falling back to Windows-1252.
///
/// A leading byte order mark is dropped.
pub fn decode_text(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!("input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
            decoded.into_owned()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Picks the delimiter whose field count is most consistent over the first
/// lines, weighted by the number of fields. Defaults to a comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    let mut best = b',';
    let mut best_score = 0usize;
    for delimiter in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| field_count(line, delimiter))
            .collect();
        let Some(&target) = counts.first() else {
            break;
        };
        if target <= 1 {
            continue;
        }
        let consistent = counts.iter().filter(|&&count| count == target).count();
        let score = consistent * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }
    best
}

fn field_count(line: &str, delimiter: u8) -> usize {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(std::result::Result::ok)
        .map_or(1, |record| record.len())
}

/// Tokenizes decoded text into raw rows with trimmed cells.
pub fn parse_rows(text: &str, delimiter: u8) -> std::result::Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(rows)
}

pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(bytes);
    let delimiter = sniff_delimiter(&text);
    debug!(delimiter = %char::from(delimiter).escape_default(), "delimiter detected");
    parse_rows(&text, delimiter).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })
}
