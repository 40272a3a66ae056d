use anyhow::{Result, anyhow};
use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

use crate::analyzer::LogLoader;
use crate::config::{CONFIG_FILE, Config};
use crate::pipeline::{INSUFFICIENT_DATA_MESSAGE, Outcome};
use crate::ui::PlotApp;
use crate::ui::app_state::WINDOW_TITLE;

mod analyzer;
mod config;
mod pipeline;
mod positioning;
mod ui;

fn main() -> Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("cell_position_plot"), LevelFilter::Debug)
        .init();

    let config = Config::load(Path::new(CONFIG_FILE))?;
    info!("Reading {}", config.log_file.display());
    let lines = LogLoader::open(&config.log_file)?.lines();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let scene = match pipeline::run(&lines, &config, &mut rng) {
        Outcome::Ready(scene) => scene,
        Outcome::InsufficientData { .. } => {
            println!("{}", INSUFFICIENT_DATA_MESSAGE);
            return Ok(());
        }
    };

    println!("{}", pipeline::summary(&scene));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]).with_title(WINDOW_TITLE),
        ..Default::default()
    };
    eframe::run_native(WINDOW_TITLE, native_options, Box::new(move |_cc| Ok(Box::new(PlotApp::new(scene)))))
        .map_err(|e| anyhow!("Failed to open plot window: {}", e))
}
