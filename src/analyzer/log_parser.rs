//! Parse individual log lines and extract structured `TowerReading` data.
//!
//! Supports the Quectel engineering mode reports:
//! - `+QENG: "servingcell"`: the cell the modem is camped on
//! - `+QENG: "neighbourcell ..."`: intra/inter frequency neighbours
//!
//! Every other line is ignored.

use log::{debug, warn};

use super::types::{CellKind, FieldLayout, ParseError, TowerReading};
use crate::positioning::signal_calculations::{PathLossParameters, estimate_distance};

/// Tag that prefixes every engineering mode report.
const REPORT_TAG: &str = "+QENG:";
const SERVING_MARKER: &str = "servingcell";
const NEIGHBOUR_MARKER: &str = "neighbourcell";
const NEIGHBOUR_ID_PREFIX: &str = "PCI-";

/// Parse a log line into a tower reading.
///
/// # Parameters
///
/// * `line` - A single log line to parse
/// * `layout` - Field positions of the id and signal columns
/// * `params` - Path loss model used for the distance estimate
///
/// # Returns
///
/// `Ok(Some(reading))` for a cell report, `Ok(None)` for unrelated lines and
/// `Err` for a report with a missing identifier. The reading's distance is
/// `None` when the signal field is absent or not numeric.
///
/// # Log Line Formats
///
/// ```text
/// Serving cell:
/// +QENG: "servingcell","NOCONN","LTE","FDD",404,45,1A2B3C4,123,1850,3,5,5,1234,-10,-85,-60,15,30,0,-
///
/// Neighbour cell:
/// +QENG: "neighbourcell intra","LTE",1850,301,-12,-95,-70,0,-,-,-,-,-
/// ```
pub fn parse_line(line: &str, layout: &FieldLayout, params: &PathLossParameters) -> Result<Option<TowerReading>, ParseError> {
    if !line.contains(REPORT_TAG) {
        return Ok(None);
    }

    if line.contains(SERVING_MARKER) {
        let fields = split_fields(line);
        let id = required_field(&fields, layout.serving_id_field, CellKind::Serving)?;
        Ok(Some(build_reading(CellKind::Serving, id.to_string(), &fields, layout.serving_signal_field, params)))
    } else if line.contains(NEIGHBOUR_MARKER) {
        let fields = split_fields(line);
        let pci = required_field(&fields, layout.neighbour_pci_field, CellKind::Neighbour)?;
        let id = format!("{}{}", NEIGHBOUR_ID_PREFIX, pci);
        Ok(Some(build_reading(CellKind::Neighbour, id, &fields, layout.neighbour_signal_field, params)))
    } else {
        Ok(None)
    }
}

/// Parse every line and keep the readings that produced a distance.
///
/// Malformed reports are logged and skipped; readings without a usable
/// signal are dropped. Log order is preserved.
pub fn parse_lines<I, S>(lines: I, layout: &FieldLayout, params: &PathLossParameters) -> Vec<TowerReading>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut readings = Vec::new();
    for (number, line) in lines.into_iter().enumerate() {
        match parse_line(line.as_ref(), layout, params) {
            Ok(Some(reading)) if reading.distance.is_some() => readings.push(reading),
            Ok(Some(reading)) => {
                debug!("Dropping {} {}: no usable signal in {:?}", reading.kind, reading.id, reading.raw_signal);
            }
            Ok(None) => {}
            Err(e) => warn!("Parse fail on line {}: {}", number + 1, e),
        }
    }
    readings
}

/// Split a report on commas, trimming whitespace and removing quotes.
fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().replace('"', "")).collect()
}

fn required_field(fields: &[String], index: usize, kind: CellKind) -> Result<&str, ParseError> {
    match fields.get(index) {
        Some(field) if !field.is_empty() => Ok(field.as_str()),
        _ => Err(ParseError::MissingField {
            kind,
            index,
            found: fields.len(),
        }),
    }
}

fn build_reading(kind: CellKind, id: String, fields: &[String], signal_index: usize, params: &PathLossParameters) -> TowerReading {
    let raw_signal = fields.get(signal_index).cloned().unwrap_or_default();
    let signal_strength = raw_signal.parse::<f64>().ok().filter(|v| v.is_finite());
    let distance = estimate_distance(&raw_signal, params);

    TowerReading {
        kind,
        id,
        raw_signal,
        signal_strength,
        distance,
    }
}
