//! Analyzer module for reading the modem log.
//!
//! Provides functionality for:
//! - Reading the diagnostic log file line by line
//! - Turning engineering mode cell reports into tower readings

pub mod log_loader;
pub mod log_parser;
pub mod types;

pub use log_loader::LogLoader;
pub use types::{CellKind, FieldLayout, TowerReading};
