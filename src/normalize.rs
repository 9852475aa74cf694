use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::catalog::FeedSchema;
use crate::domain::{Provenance, Reading, WaterStatus};
use crate::error::FeedError;

/// Case-insensitive header-name to column-index mapping.
/// Built once per payload; tolerates header reordering.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    indexes: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn build(header_row: &[Value]) -> HeaderMap {
        let mut indexes = HashMap::new();
        for (index, cell) in header_row.iter().enumerate() {
            if let Some(name) = cell_text(cell) {
                // first occurrence wins for duplicated headers
                indexes
                    .entry(name.trim().to_lowercase())
                    .or_insert(index);
            }
        }
        HeaderMap { indexes }
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.indexes.get(name).copied()
    }

    /// Look up a field by its accepted header names, in alias order
    pub fn find(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.index(name))
    }
}

/// Parse the leading numeric prefix of a cell, tolerating trailing units
/// ("30.5 C") and soft-failing to None on empty or non-numeric content.
pub fn parse_numeric_prefix(raw: &str) -> Option<f64> {
    static NUMERIC_PREFIX: OnceLock<Regex> = OnceLock::new();
    let regex = NUMERIC_PREFIX.get_or_init(|| Regex::new(r"^\s*-?\d+(\.\d+)?").unwrap());

    regex
        .find(raw)
        .and_then(|found| found.as_str().trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn row_cell(row: &[Value], index: usize) -> Option<String> {
    row.get(index).and_then(cell_text)
}

/// Convert one raw data row into a typed Reading.
///
/// The date and time cells form the composite identity and are required;
/// a payload whose header row lacks either column is malformed, as is a
/// row missing either cell. Every other field soft-fails to absent.
pub fn normalize(
    headers: &HeaderMap,
    row: &[Value],
    schema: &FeedSchema,
) -> Result<Reading, FeedError> {
    let date_index = headers
        .index("date")
        .ok_or_else(|| FeedError::MalformedPayload("missing 'date' column".to_string()))?;
    let time_index = headers
        .index("time")
        .ok_or_else(|| FeedError::MalformedPayload("missing 'time' column".to_string()))?;

    let date = row_cell(row, date_index)
        .ok_or_else(|| FeedError::MalformedPayload("row has no date cell".to_string()))?;
    let time = row_cell(row, time_index)
        .ok_or_else(|| FeedError::MalformedPayload("row has no time cell".to_string()))?;

    let mut reading = Reading::empty(date, time, Provenance::Live);

    for parameter in schema.numeric_fields {
        let value = headers
            .find(parameter.header_names())
            .and_then(|index| row_cell(row, index))
            .and_then(|text| parse_numeric_prefix(&text));
        reading.set_value(*parameter, value);
    }

    if schema.has_water_status {
        reading.water_status = status_cell(headers, row).and_then(|text| WaterStatus::parse(&text));
    }

    reading.soil = headers.index("soil").and_then(|index| row_cell(row, index));

    Ok(reading)
}

/// A 'status' header wins when present; otherwise the cell after the
/// water column is used (historical sheet layout had no status header).
fn status_cell(headers: &HeaderMap, row: &[Value]) -> Option<String> {
    if let Some(index) = headers.index("status") {
        return row_cell(row, index);
    }
    headers
        .index("water")
        .and_then(|index| row_cell(row, index + 1))
}
