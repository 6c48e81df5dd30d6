//! JSON bar ingestion.
//!
//! Input is a JSON array of objects, one per bar. Field names are matched
//! case-insensitively (`Close`, `CLOSE` and `close` are the same field) and
//! numeric fields may be numbers, numeric strings, or `null` (read as NaN).
//!
//! Ingestion is split in two stages so callers can tell an unreadable
//! document (fatal) from a readable document with bad records.

use serde_json::{Map, Value};

use crate::domain::{validate_sequence, Bar, BarError, BarTime, TimeParseError};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of bars, got {0}")]
    NotAnArray(&'static str),

    #[error("bar {index}: expected an object, got {kind}")]
    NotAnObject { index: usize, kind: &'static str },

    #[error("bar {index}: missing field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("bar {index}: field '{field}' is not numeric: {value}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("bar {index}: {source}")]
    InvalidTime {
        index: usize,
        source: TimeParseError,
    },

    #[error(transparent)]
    Sequence(#[from] BarError),
}

impl DataError {
    /// True when the document itself could not be read as a bar array.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, DataError::Json(_) | DataError::NotAnArray(_))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a JSON document into its array of bar records.
pub fn parse_records(text: &str) -> Result<Vec<Value>, DataError> {
    into_records(serde_json::from_str(text)?)
}

fn into_records(doc: Value) -> Result<Vec<Value>, DataError> {
    match doc {
        Value::Array(records) => Ok(records),
        other => Err(DataError::NotAnArray(kind_of(&other))),
    }
}

/// First value whose key equals `field` ignoring ASCII case.
fn lookup<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    record
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(field))
        .map(|(_, v)| v)
}

fn number(
    record: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<f64, DataError> {
    let value = lookup(record, field).ok_or(DataError::MissingField { index, field })?;
    let invalid = || DataError::InvalidNumber {
        index,
        field,
        value: value.to_string(),
    };
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        Value::Null => Ok(f64::NAN),
        _ => Err(invalid()),
    }
}

fn bar_from_record(index: usize, value: &Value) -> Result<Bar, DataError> {
    let record = value.as_object().ok_or(DataError::NotAnObject {
        index,
        kind: kind_of(value),
    })?;

    let time = match lookup(record, "time") {
        Some(Value::String(s)) => s
            .parse::<BarTime>()
            .map_err(|source| DataError::InvalidTime { index, source })?,
        Some(other) => {
            return Err(DataError::InvalidTime {
                index,
                source: TimeParseError(other.to_string()),
            })
        }
        None => {
            return Err(DataError::MissingField {
                index,
                field: "time",
            })
        }
    };

    Ok(Bar {
        time,
        open: number(record, index, "open")?,
        high: number(record, index, "high")?,
        low: number(record, index, "low")?,
        close: number(record, index, "close")?,
        volume: number(record, index, "volume")?,
    })
}

/// Convert bar records into a validated bar sequence.
pub fn bars_from_records(records: &[Value]) -> Result<Vec<Bar>, DataError> {
    let bars = records
        .iter()
        .enumerate()
        .map(|(i, v)| bar_from_record(i, v))
        .collect::<Result<Vec<_>, _>>()?;
    validate_sequence(&bars)?;

    let insane = bars.iter().filter(|b| !b.is_sane()).count();
    if insane > 0 {
        log::warn!("{insane} of {} bars fail OHLC sanity checks", bars.len());
    }
    Ok(bars)
}

/// Parse and convert in one step.
pub fn bars_from_json(text: &str) -> Result<Vec<Bar>, DataError> {
    bars_from_records(&parse_records(text)?)
}
