//! obzone core: order block zone extraction from OHLCV bar history.
//!
//! This crate contains the whole analysis pipeline:
//! - Domain types (bars, timestamps, swing labels, zones)
//! - JSON ingestion of bar records
//! - Swing detection and order block heuristic traits with default implementations
//! - Scale passes: identification, strength and mitigation
//! - Text and JSON report rendering

pub mod components;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod report;
