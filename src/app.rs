//! Symptom predictor window — egui/eframe application.
//!
//! # Architecture
//!
//! [`PredictorApp`] is the top-level [`eframe::App`]. It owns the UI state and
//! two channel endpoints:
//!
//! * `command_tx` — sends [`PipelineCommand`] to the pipeline task.
//! * `event_rx`   — receives [`PipelineEvent`] from the pipeline task.
//!
//! # Layout
//!
//! | Section | Content |
//! |---------|---------|
//! | Header | title, description, model status |
//! | Input | multi-line symptom box, known-diseases hint, "Predict Disease" button |
//! | Output | prediction, warning, or error with collapsible trace |

use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::config::AppConfig;
use crate::pipeline::{PipelineCommand, PipelineEvent, PredictionOutcome, PredictionResult};
use crate::predict::LoadFailure;
use crate::translation;

const TITLE: &str = "Symptom → Disease Predictor (LLM powered)";
const DESCRIPTION: &str = "Enter the patient's symptoms in English. The AI will predict the most \
                           likely disease and translate it into Thonglish.";
const PLACEHOLDER: &str = "Example: fever, sore throat, fatigue...";

const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 170, 60);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 100, 100);
const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);

// ---------------------------------------------------------------------------
// UI-side state
// ---------------------------------------------------------------------------

/// Model initialisation as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    /// The pipeline task has not reported yet.
    Loading,
    Ready { model: String },
    Failed(LoadFailure),
}

/// What the output section currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Empty,
    Prediction(PredictionResult),
    Warning(&'static str),
    Error { message: String, trace: String },
}

// ---------------------------------------------------------------------------
// PredictorApp
// ---------------------------------------------------------------------------

/// eframe application — the single-window symptom predictor.
pub struct PredictorApp {
    /// Text typed into the symptom box.
    pub symptoms: String,
    pub model_state: ModelState,
    /// A request is in flight; the button is disabled until its outcome arrives.
    pub busy: bool,
    pub output: Output,

    command_tx: mpsc::Sender<PipelineCommand>,
    event_rx: mpsc::Receiver<PipelineEvent>,

    /// Application configuration (read-only after startup).
    pub config: AppConfig,
}

impl PredictorApp {
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        event_rx: mpsc::Receiver<PipelineEvent>,
        config: AppConfig,
    ) -> Self {
        Self {
            symptoms: String::new(),
            model_state: ModelState::Loading,
            busy: false,
            output: Output::Empty,
            command_tx,
            event_rx,
            config,
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Send the current symptom text to the pipeline.
    ///
    /// Ignored while a request is already in flight.
    pub fn submit(&mut self) {
        if self.busy {
            return;
        }
        let command = PipelineCommand::Predict {
            symptoms: self.symptoms.clone(),
        };
        match self.command_tx.try_send(command) {
            Ok(()) => {
                self.busy = true;
                self.output = Output::Empty;
            }
            Err(err) => {
                log::error!("could not reach prediction pipeline: {err}");
                self.output = Output::Error {
                    message: "The prediction service is not running.".into(),
                    trace: err.to_string(),
                };
            }
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending pipeline events (non-blocking).
    pub fn poll_events(&mut self) {
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.busy {
                        log::error!("prediction pipeline stopped with a request in flight");
                        self.busy = false;
                        self.output = Output::Error {
                            message: "The prediction service stopped unexpectedly.".into(),
                            trace: "pipeline event channel disconnected".into(),
                        };
                    }
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::ModelReady { model } => {
                self.model_state = ModelState::Ready { model };
            }
            PipelineEvent::ModelFailed(failure) => {
                self.model_state = ModelState::Failed(failure);
            }
            PipelineEvent::Outcome(outcome) => {
                self.busy = false;
                self.output = Self::output_for(outcome);
            }
        }
    }

    fn output_for(outcome: PredictionOutcome) -> Output {
        if let Some(warning) = outcome.warning() {
            return Output::Warning(warning);
        }
        match outcome {
            PredictionOutcome::Success(result) => Output::Prediction(result),
            PredictionOutcome::InferenceFailed { message, trace } => Output::Error {
                message: format!("Something went wrong during prediction: {message}"),
                trace,
            },
            PredictionOutcome::EmptyInput | PredictionOutcome::ModelUnavailable => Output::Empty,
        }
    }

    /// Disease names with a Thonglish translation, sorted for display.
    pub fn known_diseases() -> Vec<&'static str> {
        let mut names: Vec<_> = translation::entries().map(|e| e.key).collect();
        names.sort_unstable();
        names
    }

    // ── Section renderers ────────────────────────────────────────────────

    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.heading(TITLE);
        ui.add_space(4.0);
        ui.label(DESCRIPTION);
        ui.add_space(6.0);

        match &self.model_state {
            ModelState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Loading {}...", self.config.model.model));
                });
            }
            ModelState::Ready { model } => {
                ui.label(
                    egui::RichText::new(format!("Model ready: {model}"))
                        .color(egui::Color32::from_rgb(140, 140, 140))
                        .size(11.0),
                );
            }
            ModelState::Failed(failure) => {
                ui.colored_label(ERROR_COLOR, "Failed to load the prediction model.");
                draw_trace(ui, "model-load-error", &failure.message, &failure.trace);
            }
        }
    }

    fn draw_input(&mut self, ui: &mut egui::Ui) {
        ui.label("Enter symptoms (English):");
        ui.add(
            egui::TextEdit::multiline(&mut self.symptoms)
                .hint_text(PLACEHOLDER)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        egui::CollapsingHeader::new("Known diseases")
            .id_salt("known-diseases")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(Self::known_diseases().join(", "))
                        .color(egui::Color32::from_rgb(140, 140, 140))
                        .size(11.0),
                );
            });
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let button = egui::Button::new("Predict Disease");
            if ui.add_enabled(!self.busy, button).clicked() {
                self.submit();
            }
            if self.busy {
                ui.spinner();
                ui.label("Predicting...");
            }
        });
    }

    fn draw_output(&self, ui: &mut egui::Ui) {
        match &self.output {
            Output::Empty => {}
            Output::Prediction(result) => {
                ui.colored_label(SUCCESS_COLOR, "Predicted Disease:");
                egui::Grid::new("prediction-grid")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("English");
                        ui.monospace(result.english_display());
                        ui.end_row();
                        ui.strong("Thonglish");
                        ui.monospace(result.thonglish.as_str());
                        ui.end_row();
                    });
                if !translation::contains(&result.english) {
                    ui.colored_label(WARNING_COLOR, "No Thonglish entry for this disease.");
                }
            }
            Output::Warning(text) => {
                ui.colored_label(WARNING_COLOR, *text);
            }
            Output::Error { message, trace } => {
                draw_trace(ui, "prediction-error", message, trace);
            }
        }
    }
}

/// Error message followed by a collapsible, preformatted trace.
fn draw_trace(ui: &mut egui::Ui, id: &str, message: &str, trace: &str) {
    ui.colored_label(ERROR_COLOR, message);
    egui::CollapsingHeader::new("Details")
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt(id)
                .max_height(160.0)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(trace).monospace().size(11.0));
                });
        });
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for PredictorApp {
    /// Called every frame by eframe. Polls the event channel, then renders.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        // Keep polling while waiting on the pipeline task.
        if self.busy || self.model_state == ModelState::Loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            ui.separator();
            self.draw_input(ui);
            ui.separator();
            self.draw_output(ui);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (
        PredictorApp,
        mpsc::Receiver<PipelineCommand>,
        mpsc::Sender<PipelineEvent>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(4);
        let (event_tx, event_rx) = mpsc::channel(4);
        (
            PredictorApp::new(command_tx, event_rx, AppConfig::default()),
            command_rx,
            event_tx,
        )
    }

    #[test]
    fn starts_loading_and_idle() {
        let (app, _rx, _tx) = app();
        assert_eq!(app.model_state, ModelState::Loading);
        assert!(!app.busy);
        assert_eq!(app.output, Output::Empty);
    }

    #[test]
    fn submit_sends_text_and_marks_busy() {
        let (mut app, mut rx, _tx) = app();
        app.symptoms = "fever, cough".into();

        app.submit();

        assert!(app.busy);
        match rx.try_recv() {
            Ok(PipelineCommand::Predict { symptoms }) => assert_eq!(symptoms, "fever, cough"),
            other => panic!("expected Predict, got {other:?}"),
        }
    }

    #[test]
    fn second_submit_while_busy_is_ignored() {
        let (mut app, mut rx, _tx) = app();
        app.submit();
        app.submit();

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn submit_with_pipeline_gone_shows_error() {
        let (mut app, rx, _tx) = app();
        drop(rx);

        app.submit();

        assert!(!app.busy);
        assert!(matches!(app.output, Output::Error { .. }));
    }

    #[test]
    fn model_events_update_status() {
        let (mut app, _rx, tx) = app();
        tx.try_send(PipelineEvent::ModelReady {
            model: "google/flan-t5-base".into(),
        })
        .unwrap();
        app.poll_events();
        assert_eq!(
            app.model_state,
            ModelState::Ready {
                model: "google/flan-t5-base".into()
            }
        );

        let failure = LoadFailure {
            message: "offline".into(),
            trace: "offline".into(),
        };
        tx.try_send(PipelineEvent::ModelFailed(failure.clone())).unwrap();
        app.poll_events();
        assert_eq!(app.model_state, ModelState::Failed(failure));
    }

    #[test]
    fn outcomes_map_to_output_and_clear_busy() {
        let (mut app, _rx, tx) = app();

        app.busy = true;
        let result = PredictionResult::new("cold", "kulir");
        tx.try_send(PipelineEvent::Outcome(PredictionOutcome::Success(result.clone())))
            .unwrap();
        app.poll_events();
        assert!(!app.busy);
        assert_eq!(app.output, Output::Prediction(result));

        tx.try_send(PipelineEvent::Outcome(PredictionOutcome::EmptyInput))
            .unwrap();
        app.poll_events();
        assert_eq!(app.output, Output::Warning("Please enter some symptoms first."));

        tx.try_send(PipelineEvent::Outcome(PredictionOutcome::ModelUnavailable))
            .unwrap();
        app.poll_events();
        assert_eq!(
            app.output,
            Output::Warning("Model not available. Please try again later.")
        );

        tx.try_send(PipelineEvent::Outcome(PredictionOutcome::InferenceFailed {
            message: "model generation failed".into(),
            trace: "model generation failed\n\nCaused by:\n    model request timed out".into(),
        }))
        .unwrap();
        app.poll_events();
        match &app.output {
            Output::Error { message, trace } => {
                assert!(message.starts_with("Something went wrong during prediction"));
                assert!(trace.contains("timed out"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_exit_mid_request_clears_busy() {
        let (mut app, _rx, tx) = app();
        app.symptoms = "fever".into();
        app.submit();
        assert!(app.busy);

        drop(tx);
        app.poll_events();

        assert!(!app.busy);
        match &app.output {
            Output::Error { message, .. } => assert!(message.contains("stopped")),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_exit_while_idle_keeps_output() {
        let (mut app, _rx, tx) = app();
        drop(tx);

        app.poll_events();

        assert!(!app.busy);
        assert_eq!(app.output, Output::Empty);
    }

    #[test]
    fn known_diseases_lists_every_translated_name() {
        let names = PredictorApp::known_diseases();

        assert_eq!(names.len(), translation::entries().count());
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert!(names.contains(&"cold"));
        assert!(names.iter().all(|n| translation::contains(n)));
    }
}
