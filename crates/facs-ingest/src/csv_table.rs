use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// Unvalidated reagent table: a header row plus data rows of equal width.
///
/// Directly-entered panels use the same shape, so everything downstream of
/// the reader is shared between file input and in-memory input.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a reagent CSV. The first non-blank row is the header; fully blank
/// rows are dropped and short rows are padded to the header width.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    read_table(&mut reader).with_context(|| format!("read csv: {}", path.display()))
}

/// Same as [`read_csv_table`] for any reader, e.g. stdin or a test buffer.
pub fn read_csv_reader<R: io::Read>(input: R) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    read_table(&mut reader)
}

fn read_table<R: io::Read>(reader: &mut csv::Reader<R>) -> Result<RawTable> {
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.context("read record")?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut remaining = raw_rows.into_iter();
    let Some(header_row) = remaining.next() else {
        return Ok(RawTable {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    let mut rows = Vec::new();
    for record in remaining {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(value.to_string());
        }
        rows.push(row);
    }
    Ok(RawTable { headers, rows })
}
