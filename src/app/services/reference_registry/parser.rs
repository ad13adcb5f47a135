//! Lenient CSV parsing for the OurAirports reference table
//!
//! The first non-blank line is the header; every later line becomes a row
//! keyed by header name. Parsing never fails: short rows are padded with
//! empty strings, surplus fields are dropped, and undecodable records are
//! skipped with a warning.

use crate::app::models::ReferenceRecord;
use crate::constants::columns;
use csv::Terminator;
use std::collections::HashMap;
use tracing::warn;

/// One CSV row, field name → raw value
pub type CsvRow = HashMap<String, String>;

/// Parse CSV text into rows keyed by the header line
///
/// Quoted fields may contain the delimiter and line breaks verbatim, and a
/// doubled quote inside a quoted field decodes to a single quote. Lines end at
/// `\n` or `\r\n`; a lone `\r` is field content. Blank lines are ignored.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => strip_carriage_return(&record),
            Err(e) => {
                warn!("Skipping malformed CSV record: {}", e);
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        match &header {
            None => header = Some(record),
            Some(fields) => rows.push(build_row(fields, &record)),
        }
    }

    rows
}

/// Record fields with the `\r` of a `\r\n` line ending removed
fn strip_carriage_return(record: &csv::StringRecord) -> Vec<String> {
    let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
    if let Some(last) = fields.last_mut().filter(|field| field.ends_with('\r')) {
        last.pop();
    }
    fields
}

fn is_blank(record: &[String]) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

fn build_row(header: &[String], record: &[String]) -> CsvRow {
    header
        .iter()
        .enumerate()
        .map(|(idx, key)| (key.clone(), record.get(idx).cloned().unwrap_or_default()))
        .collect()
}

/// Reduce a raw row to a reference record
///
/// Returns `None` when the row has no `ident`. Empty fields become `None`.
pub fn parse_reference_record(row: &CsvRow) -> Option<ReferenceRecord> {
    let icao = row.get(columns::IDENT)?.to_uppercase();
    if icao.is_empty() {
        return None;
    }

    Some(ReferenceRecord {
        icao,
        iata: non_empty_field(row, columns::IATA_CODE),
        name: non_empty_field(row, columns::NAME),
        municipality: non_empty_field(row, columns::MUNICIPALITY),
        iso_country: non_empty_field(row, columns::ISO_COUNTRY),
    })
}

fn non_empty_field(row: &CsvRow, column: &str) -> Option<String> {
    row.get(column)
        .filter(|value| !value.is_empty())
        .cloned()
}
