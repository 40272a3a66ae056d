//! Linear processing pipeline: parse → estimate distances → place towers →
//! estimate position.
//!
//! The result is either a scene ready for plotting or a note that there was
//! not enough data to attempt a position estimate.

use log::{info, warn};
use rand::Rng;
use std::fmt::Write;

use crate::analyzer::log_parser::parse_lines;
use crate::analyzer::TowerReading;
use crate::config::Config;
use crate::positioning::geometry::{estimate_position, place_towers};
use crate::positioning::Point;

/// Minimum number of located towers needed for an estimate.
pub const MIN_TOWERS: usize = 2;

/// Message printed instead of a plot when there is not enough data.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough towers for relative positioning.";

/// A tower reading together with its schematic position on the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTower {
    pub reading: TowerReading,
    pub position: Point,
    /// Estimated distance in meters. Unwrapped from `reading.distance` by
    /// `locate`, which only places readings that have one.
    pub distance: f64,
}

/// Everything the renderer needs for one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotScene {
    pub towers: Vec<PlacedTower>,
    pub estimate: Point,
    pub ground_truth: Option<Point>,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Fewer than `MIN_TOWERS` located towers; nothing should be plotted.
    InsufficientData { found: usize },
    Ready(PlotScene),
}

/// Run the pipeline over the log lines.
pub fn run<I, S, R>(lines: I, config: &Config, rng: &mut R) -> Outcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let readings = parse_lines(lines, &config.layout, &config.path_loss);
    info!("Parsed {} located tower readings", readings.len());
    locate(readings, config.tower_radius, config.ground_truth, rng)
}

/// Place the readings and estimate the device position.
pub fn locate<R: Rng + ?Sized>(readings: Vec<TowerReading>, radius: f64, ground_truth: Option<Point>, rng: &mut R) -> Outcome {
    let located: Vec<(TowerReading, f64)> = readings
        .into_iter()
        .filter_map(|reading| reading.distance.map(|distance| (reading, distance)))
        .collect();

    if located.len() < MIN_TOWERS {
        warn!("Only {} located tower(s), need at least {}", located.len(), MIN_TOWERS);
        return Outcome::InsufficientData { found: located.len() };
    }

    let positions = place_towers(located.len(), radius);
    let distances: Vec<f64> = located.iter().map(|(_, distance)| *distance).collect();
    let estimate = match estimate_position(&positions, &distances, rng) {
        Ok(estimate) => estimate,
        Err(e) => {
            warn!("Position estimate failed: {}", e);
            return Outcome::InsufficientData { found: located.len() };
        }
    };
    info!("Estimated device position {}", estimate);

    let towers = located
        .into_iter()
        .zip(positions)
        .map(|((reading, distance), position)| PlacedTower { reading, position, distance })
        .collect();

    Outcome::Ready(PlotScene {
        towers,
        estimate,
        ground_truth,
    })
}

/// Console summary of the located towers and the estimate.
pub fn summary(scene: &PlotScene) -> String {
    let mut out = String::from("Relative Tower Distances:\n");
    for tower in &scene.towers {
        let reading = &tower.reading;
        let _ = writeln!(
            out,
            "{:9} {:10} | RSRP: {:>5} dBm | ~{} m",
            reading.kind, reading.id, reading.raw_signal, tower.distance
        );
    }
    let _ = writeln!(out, "Estimated position: {}", scene.estimate);
    out
}
