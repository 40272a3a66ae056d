// UI module for the relative position plot
//
// This module organizes the window into separate components:
// - `app_state`: Window state and the eframe update loop
// - `map`: Central plot with towers, distance circles and the estimate
// - `right_panel`: Tower table and display toggles

pub mod app_state;
pub mod map;
pub mod right_panel;

pub use app_state::PlotApp;
