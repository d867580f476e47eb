mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod selector;
mod state;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use app::DashboardApp;
use config::{AppConfig, DEFAULT_CONFIG_PATH};
use dashboard::Dashboard;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = match AppConfig::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("Config load error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let mode = match config.initial_mode() {
        Ok(mode) => mode,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Without data there is nothing to serve, so refuse to open the window.
    let dashboard = match Dashboard::open(&config.data_source) {
        Ok(d) => d,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    let state = AppState::new(dashboard, mode);
    let result = eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI error: {e}");
            ExitCode::FAILURE
        }
    }
}
