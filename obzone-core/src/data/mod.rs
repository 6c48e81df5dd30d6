//! Bar ingestion.

pub mod json;

pub use json::{bars_from_json, bars_from_records, parse_records, DataError};
