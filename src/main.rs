//! Application entry point — Symptom → Disease Predictor.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Write a default `settings.toml` on first run, then load [`AppConfig`].
//! 3. Create the [`tokio`] runtime.
//! 4. Build the memoized [`ModelCache`] and spawn the prediction pipeline;
//!    the pipeline loads the model before serving its first command.
//! 5. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use symptom_predictor::{
    app::PredictorApp,
    config::{AppConfig, UiConfig},
    pipeline::{PipelineCommand, PipelineEvent, PredictionPipeline},
    predict::ModelCache,
};
use tokio::sync::mpsc;

fn native_options(ui: &UiConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_title("Symptom-to-Disease Predictor")
        .with_inner_size([ui.window_width, ui.window_height])
        .with_min_inner_size([380.0, 360.0]);

    if ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Symptom predictor starting up");

    // 2. Configuration
    if AppConfig::is_first_run() {
        if let Err(e) = AppConfig::default().save() {
            log::warn!("Could not write default settings ({e:#})");
        }
    }
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Model cache + pipeline task
    let model = Arc::new(ModelCache::new(config.model.clone()));
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(8);
    let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>(16);
    rt.spawn(PredictionPipeline::new(model).run(command_rx, event_tx));

    // 5. UI
    let options = native_options(&config.ui);
    let app = PredictorApp::new(command_tx, event_rx, config);

    eframe::run_native(
        "Symptom-to-Disease Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
