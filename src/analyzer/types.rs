//! Type definitions specific to the analyzer module.

use serde::Deserialize;
use std::fmt;

/// Which kind of cell report a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// The cell the modem is camped on.
    Serving,
    /// A neighbour cell seen during measurements.
    Neighbour,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad through `Formatter::pad` so width specifiers work in the summary.
        match self {
            CellKind::Serving => f.pad("serving"),
            CellKind::Neighbour => f.pad("neighbour"),
        }
    }
}

/// One tower measurement extracted from a log line.
#[derive(Debug, Clone, PartialEq)]
pub struct TowerReading {
    pub kind: CellKind,
    /// Hex cell id for serving cells, `PCI-<pci>` for neighbours.
    pub id: String,
    /// Signal field exactly as it appeared in the log.
    pub raw_signal: String,
    /// Parsed signal strength in dBm, if the field was numeric.
    pub signal_strength: Option<f64>,
    /// Estimated distance in meters.
    pub distance: Option<f64>,
}

/// Field positions inside a comma separated `+QENG:` report.
///
/// Index 0 is the tag itself together with the report type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FieldLayout {
    pub serving_id_field: usize,
    pub serving_signal_field: usize,
    pub neighbour_pci_field: usize,
    pub neighbour_signal_field: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            serving_id_field: 6,
            serving_signal_field: 14,
            neighbour_pci_field: 3,
            neighbour_signal_field: 5,
        }
    }
}

/// Error type for report lines that could not be turned into a reading.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The identifier field is missing or empty.
    MissingField { kind: CellKind, index: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingField { kind, index, found } => {
                write!(f, "{} report has no field {} ({} fields present)", kind, index, found)
            }
        }
    }
}

impl std::error::Error for ParseError {}
