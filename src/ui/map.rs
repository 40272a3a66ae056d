//! # Central Map Visualization
//!
//! This module renders the relative position plot:
//! - Grey axis lines through the origin
//! - Towers as blue triangles, each with a translucent circle of its estimated distance
//! - Tower labels with id and distance in whole meters
//! - The estimated device position as a red dot
//! - The ground truth (if known) as a green cross
//! - A small legend in the top-left corner
//!
//! ## Coordinate Mapping
//!
//! `WorldBounds` is a square around everything drawn, so one scale serves both
//! axes and circles stay round. World Y grows upwards, screen Y downwards; the
//! mapping flips it.

use eframe::egui;
use egui::Color32;

use super::PlotApp;
use crate::pipeline::{PlacedTower, PlotScene};
use crate::positioning::Point;
use crate::positioning::geometry::euclidean_distance;

/// Label offset above the tower, in world units.
const LABEL_OFFSET: f64 = 50.0;
/// Extra space around the outermost object, as a fraction of the extent.
const PADDING: f64 = 0.1;

const TOWER_COLOR: Color32 = Color32::from_rgb(40, 120, 255);
const ESTIMATE_COLOR: Color32 = Color32::from_rgb(230, 40, 40);
const TRUTH_COLOR: Color32 = Color32::from_rgb(40, 200, 60);
const AXIS_COLOR: Color32 = Color32::from_rgb(128, 128, 128);

/// Square world-space area shown on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Point,
    pub max: Point,
}

impl WorldBounds {
    /// Bounds covering the origin, all tower circles and labels, the estimate
    /// and the ground truth, squared and padded.
    pub fn for_scene(scene: &PlotScene) -> Self {
        let mut min = Point::default();
        let mut max = Point::default();
        let mut include = |x: f64, y: f64| {
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
        };

        for tower in &scene.towers {
            let p = tower.position;
            include(p.x - tower.distance, p.y - tower.distance);
            include(p.x + tower.distance, p.y + tower.distance);
            include(p.x, p.y + LABEL_OFFSET);
        }
        include(scene.estimate.x, scene.estimate.y);
        if let Some(truth) = scene.ground_truth {
            include(truth.x, truth.y);
        }

        let center = Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
        let mut half = (max.x - min.x).max(max.y - min.y) / 2.0 * (1.0 + PADDING);
        if !(half.is_finite() && half > 0.0) {
            half = 1.0;
        }
        Self {
            min: Point::new(center.x - half, center.y - half),
            max: Point::new(center.x + half, center.y + half),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Map a world point into the screen rectangle.
    pub fn to_screen(&self, p: &Point, rect: egui::Rect) -> egui::Pos2 {
        let tx = ((p.x - self.min.x) / (self.max.x - self.min.x)) as f32;
        let ty = ((self.max.y - p.y) / (self.max.y - self.min.y)) as f32;
        egui::pos2(egui::lerp(rect.left()..=rect.right(), tx), egui::lerp(rect.top()..=rect.bottom(), ty))
    }

    /// Convert a world length into pixels.
    pub fn to_pixels(&self, length: f64, rect: egui::Rect) -> f32 {
        (length / self.width()) as f32 * rect.width()
    }
}

/// Euclidean error between the estimate and the ground truth, if known.
pub fn position_error(scene: &PlotScene) -> Option<f64> {
    scene.ground_truth.map(|truth| euclidean_distance(&scene.estimate, &truth))
}

/// Title shown above the plot.
pub fn plot_title(scene: &PlotScene) -> String {
    match position_error(scene) {
        Some(error) => format!("Relative Device Position (Error ≈ {:.1} m)", error),
        None => "Relative Device Position (no GPS reference)".to_string(),
    }
}

/// Two-line tower label: id, then distance truncated to whole meters.
pub fn tower_label(tower: &PlacedTower) -> String {
    format!("{}\n{}m", tower.reading.id, tower.distance.trunc() as i64)
}

/// Render the central map panel.
///
/// 1. Shows the title as heading
/// 2. Reserves a square drawing area centered in the available space
/// 3. Draws axes, tower circles, towers, labels, estimate, truth and legend, in that order
pub fn render(ctx: &egui::Context, state: &PlotApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(&state.title);
        ui.separator();

        let avail_rect = ui.available_rect_before_wrap();
        let side = avail_rect.width().min(avail_rect.height()).max(1.0);
        let rect = egui::Rect::from_center_size(avail_rect.center(), egui::vec2(side, side));
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        draw_axes(&painter, rect, &state.bounds);
        if state.show_circles {
            draw_distance_circles(&painter, rect, state);
        }
        draw_towers(&painter, rect, state);
        draw_estimate(&painter, rect, state);
        if let Some(truth) = state.scene.ground_truth {
            draw_truth(&painter, rect, &state.bounds, &truth);
        }
        draw_legend(&painter, rect, state.scene.ground_truth.is_some());
    });
}

/// Horizontal and vertical lines through the world origin.
fn draw_axes(painter: &egui::Painter, rect: egui::Rect, bounds: &WorldBounds) {
    let stroke = egui::Stroke::new(0.5, AXIS_COLOR);
    let origin = bounds.to_screen(&Point::default(), rect);
    painter.line_segment([egui::pos2(rect.left(), origin.y), egui::pos2(rect.right(), origin.y)], stroke);
    painter.line_segment([egui::pos2(origin.x, rect.top()), egui::pos2(origin.x, rect.bottom())], stroke);
}

fn draw_distance_circles(painter: &egui::Painter, rect: egui::Rect, state: &PlotApp) {
    let fill = Color32::from_rgba_unmultiplied(40, 120, 255, 25);
    for tower in &state.scene.towers {
        let center = state.bounds.to_screen(&tower.position, rect);
        let radius = state.bounds.to_pixels(tower.distance, rect);
        painter.circle_filled(center, radius, fill);
    }
}

/// Draw tower markers and, when enabled, their labels.
fn draw_towers(painter: &egui::Painter, rect: egui::Rect, state: &PlotApp) {
    for tower in &state.scene.towers {
        let pos = state.bounds.to_screen(&tower.position, rect);
        painter.add(triangle(pos, 7.0, TOWER_COLOR));

        if state.show_labels {
            let label_pos = state.bounds.to_screen(&Point::new(tower.position.x, tower.position.y + LABEL_OFFSET), rect);
            painter.text(label_pos, egui::Align2::CENTER_BOTTOM, tower_label(tower), egui::FontId::proportional(12.0), TOWER_COLOR);
        }
    }
}

fn draw_estimate(painter: &egui::Painter, rect: egui::Rect, state: &PlotApp) {
    let pos = state.bounds.to_screen(&state.scene.estimate, rect);
    painter.circle_filled(pos, 6.0, ESTIMATE_COLOR);
}

fn draw_truth(painter: &egui::Painter, rect: egui::Rect, bounds: &WorldBounds, truth: &Point) {
    let pos = bounds.to_screen(truth, rect);
    cross(painter, pos, 6.0, TRUTH_COLOR);
}

fn draw_legend(painter: &egui::Painter, rect: egui::Rect, with_truth: bool) {
    let font = egui::FontId::proportional(12.0);
    let text_color = Color32::from_gray(220);
    let mut y = rect.top() + 14.0;
    let marker_x = rect.left() + 16.0;
    let text_x = rect.left() + 30.0;

    painter.add(triangle(egui::pos2(marker_x, y), 6.0, TOWER_COLOR));
    painter.text(egui::pos2(text_x, y), egui::Align2::LEFT_CENTER, "Tower", font.clone(), text_color);
    y += 18.0;

    painter.circle_filled(egui::pos2(marker_x, y), 5.0, ESTIMATE_COLOR);
    painter.text(egui::pos2(text_x, y), egui::Align2::LEFT_CENTER, "Estimated Device", font.clone(), text_color);

    if with_truth {
        y += 18.0;
        cross(painter, egui::pos2(marker_x, y), 5.0, TRUTH_COLOR);
        painter.text(egui::pos2(text_x, y), egui::Align2::LEFT_CENTER, "GPS Truth", font, text_color);
    }
}

/// Upward pointing filled triangle centered on `pos`.
fn triangle(pos: egui::Pos2, size: f32, color: Color32) -> egui::Shape {
    let points = vec![
        egui::pos2(pos.x, pos.y - size),
        egui::pos2(pos.x + size, pos.y + size * 0.8),
        egui::pos2(pos.x - size, pos.y + size * 0.8),
    ];
    egui::Shape::convex_polygon(points, color, egui::Stroke::NONE)
}

fn cross(painter: &egui::Painter, pos: egui::Pos2, size: f32, color: Color32) {
    let stroke = egui::Stroke::new(2.0, color);
    painter.line_segment([egui::pos2(pos.x - size, pos.y - size), egui::pos2(pos.x + size, pos.y + size)], stroke);
    painter.line_segment([egui::pos2(pos.x - size, pos.y + size), egui::pos2(pos.x + size, pos.y - size)], stroke);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{CellKind, TowerReading};

    fn tower(id: &str, position: Point, distance: f64) -> PlacedTower {
        PlacedTower {
            reading: TowerReading {
                kind: CellKind::Serving,
                id: id.to_string(),
                raw_signal: "-85".to_string(),
                signal_strength: Some(-85.0),
                distance: Some(distance),
            },
            position,
            distance,
        }
    }

    fn inside(bounds: &WorldBounds, p: &Point) -> bool {
        p.x >= bounds.min.x && p.x <= bounds.max.x && p.y >= bounds.min.y && p.y <= bounds.max.y
    }

    fn scene(ground_truth: Option<Point>) -> PlotScene {
        PlotScene {
            towers: vec![tower("1A2B3C4", Point::new(500.0, 0.0), 538.8), tower("PCI-301", Point::new(-500.0, 0.0), 1200.0)],
            estimate: Point::new(30.0, 40.0),
            ground_truth,
        }
    }

    #[test]
    fn title_without_ground_truth() {
        let scene = scene(None);
        assert_eq!(position_error(&scene), None);
        assert_eq!(plot_title(&scene), "Relative Device Position (no GPS reference)");
    }

    #[test]
    fn title_reports_error_to_ground_truth() {
        let scene = scene(Some(Point::new(0.0, 0.0)));
        assert_eq!(position_error(&scene), Some(50.0));
        assert_eq!(plot_title(&scene), "Relative Device Position (Error ≈ 50.0 m)");
    }

    #[test]
    fn label_truncates_distance() {
        assert_eq!(tower_label(&tower("PCI-7", Point::default(), 538.8)), "PCI-7\n538m");
    }

    #[test]
    fn bounds_cover_every_circle_and_are_square() {
        let scene = scene(Some(Point::new(900.0, 900.0)));
        let bounds = WorldBounds::for_scene(&scene);
        assert!((bounds.width() - (bounds.max.y - bounds.min.y)).abs() < 1e-9);
        for t in &scene.towers {
            assert!(inside(&bounds, &Point::new(t.position.x - t.distance, t.position.y)));
            assert!(inside(&bounds, &Point::new(t.position.x + t.distance, t.position.y)));
            assert!(inside(&bounds, &Point::new(t.position.x, t.position.y - t.distance)));
            assert!(inside(&bounds, &Point::new(t.position.x, t.position.y + t.distance)));
        }
        assert!(inside(&bounds, &scene.estimate));
        assert!(inside(&bounds, &Point::new(900.0, 900.0)));
    }

    #[test]
    fn empty_scene_has_non_degenerate_bounds() {
        let scene = PlotScene {
            towers: Vec::new(),
            estimate: Point::default(),
            ground_truth: None,
        };
        let bounds = WorldBounds::for_scene(&scene);
        assert!(bounds.width() > 0.0);
    }

    #[test]
    fn bounds_stay_finite_for_located_towers() {
        let bounds = WorldBounds::for_scene(&scene(None));
        assert!(bounds.min.x.is_finite() && bounds.min.y.is_finite());
        assert!(bounds.max.x.is_finite() && bounds.max.y.is_finite());
    }

    #[test]
    fn screen_mapping_flips_y_axis() {
        let bounds = WorldBounds {
            min: Point::new(-100.0, -100.0),
            max: Point::new(100.0, 100.0),
        };
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 200.0));
        assert_eq!(bounds.to_screen(&Point::new(0.0, 0.0), rect), egui::pos2(100.0, 100.0));
        assert_eq!(bounds.to_screen(&Point::new(-100.0, 100.0), rect), egui::pos2(0.0, 0.0));
        assert_eq!(bounds.to_screen(&Point::new(100.0, -100.0), rect), egui::pos2(200.0, 200.0));
        assert_eq!(bounds.to_pixels(50.0, rect), 50.0);
    }
}
