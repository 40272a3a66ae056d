//! # Tower Panel
//!
//! Right side panel listing every located tower and the estimate, plus
//! toggles for labels and distance circles.
//!
//! The tower table uses `egui_extras::TableBuilder`; serving cells are shown
//! in yellow, neighbours in light green.

use eframe::egui;
use egui::Color32;

use crate::analyzer::CellKind;
use crate::ui::PlotApp;

/// Render the right tower panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state (display toggles)
pub fn render(ctx: &egui::Context, state: &mut PlotApp) {
    egui::SidePanel::right("towers_right").exact_width(360.0).show(ctx, |ui| {
        ui.heading("Towers");
        ui.separator();

        ui.label(format!("Located towers: {}", state.scene.towers.len()));
        ui.label(format!("Estimated position: {}", state.scene.estimate));
        if let Some(truth) = state.scene.ground_truth {
            ui.label(format!("GPS truth: {}", truth));
        }
        ui.horizontal(|ui| {
            ui.checkbox(&mut state.show_labels, "Show labels");
            ui.checkbox(&mut state.show_circles, "Show distance circles");
        });
        ui.separator();

        render_tower_table(ui, state);
    });
}

/// Striped table with one row per tower, in log order.
fn render_tower_table(ui: &mut egui::Ui, state: &PlotApp) {
    use egui_extras::{Column, TableBuilder};

    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(80.0).at_least(60.0)) // Kind
        .column(Column::remainder()) // Id
        .column(Column::initial(60.0).at_least(40.0)) // RSRP
        .column(Column::initial(80.0).at_least(50.0)) // Distance
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong("Type");
            });
            header.col(|ui| {
                ui.strong("Id");
            });
            header.col(|ui| {
                ui.strong("RSRP");
            });
            header.col(|ui| {
                ui.strong("Distance");
            });
        })
        .body(|body| {
            let towers = &state.scene.towers;
            body.rows(row_height, towers.len(), |mut row| {
                let tower = &towers[row.index()];
                let color = match tower.reading.kind {
                    CellKind::Serving => Color32::YELLOW,
                    CellKind::Neighbour => Color32::LIGHT_GREEN,
                };
                row.col(|ui| {
                    ui.colored_label(color, tower.reading.kind.to_string());
                });
                row.col(|ui| {
                    ui.label(&tower.reading.id);
                });
                row.col(|ui| {
                    match tower.reading.signal_strength {
                        Some(dbm) => ui.label(format!("{} dBm", dbm)),
                        None => ui.label(&tower.reading.raw_signal),
                    };
                });
                row.col(|ui| {
                    ui.label(format!("{:.2} m", tower.distance));
                });
            });
        });
}
