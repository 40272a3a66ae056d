//! Distance and position estimation.
//!
//! ## Module Organization
//!
//! - `types`: Points and the estimation error type
//! - `signal_calculations`: Path loss model turning signal strength into distance
//! - `geometry`: Schematic tower placement and the centroid estimate

pub mod geometry;
pub mod signal_calculations;
pub mod types;

pub use types::Point;
