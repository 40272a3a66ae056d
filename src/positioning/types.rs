//! Core data structures shared by the positioning steps and the renderer.

use serde::Deserialize;
use std::fmt;

/// Simple 2D point in synthetic plot units (not geographic).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Error type for position estimation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionError {
    /// Fewer than two towers were supplied.
    InsufficientTowers(usize),
    /// Tower position and distance lists differ in length.
    LengthMismatch { positions: usize, distances: usize },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InsufficientTowers(count) => write!(f, "At least 2 towers are required, got {}", count),
            PositionError::LengthMismatch { positions, distances } => {
                write!(f, "Got {} tower positions but {} distances", positions, distances)
            }
        }
    }
}

impl std::error::Error for PositionError {}
