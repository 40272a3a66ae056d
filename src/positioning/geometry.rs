//! Schematic tower placement and the centroid position estimate.
//!
//! Towers have no real coordinates: they are spread evenly on a circle so the
//! plot has something to anchor the distance circles to. The device estimate
//! projects each tower's distance along a random bearing and averages the
//! projections.
//!
//! The bearing is unconstrained, so the centroid is not a position fix. Replacing
//! it with a circle intersection or least-squares multilateration solver is the
//! way forward if the estimate has to mean something.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::f64::consts::TAU;

use super::types::{Point, PositionError};

/// Place `count` towers evenly on a circle of `radius` around the origin.
///
/// Tower `i` sits at angle `2π·i/count`, so the first tower is always on the
/// positive X axis.
pub fn place_towers(count: usize, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Project `distance` from `origin` along `bearing` (radians).
pub fn project(origin: &Point, distance: f64, bearing: f64) -> Point {
    Point::new(origin.x + distance * bearing.cos(), origin.y + distance * bearing.sin())
}

/// Estimate the device position as the centroid of one random projection per tower.
///
/// Bearings are drawn uniformly from `[0, 2π)` in tower order, so a seeded RNG
/// makes the estimate reproducible.
///
/// # Returns
///
/// The mean of the projections, or an error when fewer than two towers are
/// given or the slices disagree in length.
pub fn estimate_position<R: Rng + ?Sized>(positions: &[Point], distances: &[f64], rng: &mut R) -> Result<Point, PositionError> {
    if positions.len() != distances.len() {
        return Err(PositionError::LengthMismatch {
            positions: positions.len(),
            distances: distances.len(),
        });
    }
    if positions.len() < 2 {
        return Err(PositionError::InsufficientTowers(positions.len()));
    }

    let bearings = Uniform::new(0.0, TAU);
    let projections: Vec<Point> = positions
        .iter()
        .zip(distances)
        .map(|(position, distance)| project(position, *distance, bearings.sample(&mut *rng)))
        .collect();

    Ok(centroid(&projections))
}

/// Arithmetic mean of the points. Callers guarantee a non-empty slice.
fn centroid(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Euclidean distance between two points.
pub fn euclidean_distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
