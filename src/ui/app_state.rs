//! # Application State
//!
//! `PlotApp` owns the finished `PlotScene` and implements `eframe::App`.
//! Nothing is recomputed after start-up: the scene, its world bounds and the
//! title are fixed, and every frame only repaints them.

use eframe::egui;

use super::map::{WorldBounds, plot_title};
use super::{map, right_panel};
use crate::pipeline::PlotScene;

/// Window title used for the native viewport.
pub const WINDOW_TITLE: &str = "Relative Device Position";

/// State of the plot window.
pub struct PlotApp {
    /// Towers, estimate and optional ground truth.
    pub scene: PlotScene,
    /// Heading shown above the map, including the error when ground truth is known.
    pub title: String,
    /// World area mapped onto the map panel.
    pub bounds: WorldBounds,
    /// Whether tower labels (id and distance) are drawn.
    pub show_labels: bool,
    /// Whether the translucent distance circles are drawn.
    pub show_circles: bool,
}

impl PlotApp {
    pub fn new(scene: PlotScene) -> Self {
        let title = plot_title(&scene);
        let bounds = WorldBounds::for_scene(&scene);
        Self {
            scene,
            title,
            bounds,
            show_labels: true,
            show_circles: true,
        }
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Side panels first so the central map gets the remaining space
        right_panel::render(ctx, self);
        map::render(ctx, self);
    }
}
