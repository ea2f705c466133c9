//! Prediction pipeline — symptoms → prompt → model → label → Thonglish.
//!
//! [`PredictionPipeline::predict`] runs one request to completion and
//! returns a [`PredictionOutcome`]. [`PredictionPipeline::run`] wraps it in
//! the command loop the UI talks to.
//!
//! # Pipeline flow
//!
//! ```text
//! PipelineCommand::Predict { symptoms }
//!   ├─ model Unavailable      → ModelUnavailable   (no generation)
//!   ├─ symptoms blank         → EmptyInput         (no generation)
//!   └─ build_prompt → generate → extract_prediction → translate
//!         ├─ Ok  → Success(PredictionResult)
//!         └─ Err → InferenceFailed { message, trace }
//! ```
//!
//! Commands are handled strictly one at a time.

use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::mpsc;

use crate::predict::{
    build_prompt, extract_prediction, DiseasePredictor, LoadFailure, ModelCache, ModelStatus,
};
use crate::translation::translate;

use super::outcome::{PredictionOutcome, PredictionResult};

// ---------------------------------------------------------------------------
// Channel messages
// ---------------------------------------------------------------------------

/// Commands sent from the UI to the pipeline task.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Predict a disease for the given symptom text.
    Predict { symptoms: String },
}

/// Events sent from the pipeline task back to the UI.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// Model initialisation succeeded.
    ModelReady { model: String },
    /// Model initialisation failed; every later request is short-circuited.
    ModelFailed(LoadFailure),
    /// A prediction request finished.
    Outcome(PredictionOutcome),
}

// ---------------------------------------------------------------------------
// PredictionPipeline
// ---------------------------------------------------------------------------

/// Runs prediction requests against the memoized model.
pub struct PredictionPipeline {
    model: Arc<ModelCache>,
    max_new_tokens: u32,
}

impl PredictionPipeline {
    /// Create a pipeline over `model`; the token budget comes from the
    /// cache's config.
    pub fn new(model: Arc<ModelCache>) -> Self {
        let max_new_tokens = model.config().max_new_tokens;
        Self {
            model,
            max_new_tokens,
        }
    }

    /// Run one prediction to completion.
    ///
    /// Never panics; every failure is folded into the returned outcome.
    pub async fn predict(&self, symptoms: &str) -> PredictionOutcome {
        let predictor = match self.model.status().await {
            ModelStatus::Ready(predictor) => Arc::clone(predictor),
            ModelStatus::Unavailable(_) => {
                log::warn!("prediction skipped: model not available");
                return PredictionOutcome::ModelUnavailable;
            }
        };

        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            log::warn!("prediction skipped: no symptoms entered");
            return PredictionOutcome::EmptyInput;
        }

        log::debug!("predicting for symptoms: {symptoms:?}");
        match self.infer(predictor.as_ref(), symptoms).await {
            Ok(result) => {
                log::info!(
                    "predicted {:?} → {:?}",
                    result.english,
                    result.thonglish
                );
                PredictionOutcome::Success(result)
            }
            Err(err) => {
                log::error!("prediction failed: {err:#}");
                PredictionOutcome::InferenceFailed {
                    message: err.to_string(),
                    trace: format!("{err:?}"),
                }
            }
        }
    }

    async fn infer(
        &self,
        predictor: &dyn DiseasePredictor,
        symptoms: &str,
    ) -> anyhow::Result<PredictionResult> {
        let prompt = build_prompt(symptoms);

        let generated = predictor
            .generate(&prompt, self.max_new_tokens)
            .await
            .context("model generation failed")?;

        let english = extract_prediction(&generated);
        if english.is_empty() {
            bail!("model returned an empty prediction");
        }

        let thonglish = translate(&english);
        Ok(PredictionResult::new(english, thonglish))
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Load the model, report its status, then serve commands until
    /// `commands` closes or the UI drops its receiver.
    pub async fn run(
        self,
        mut commands: mpsc::Receiver<PipelineCommand>,
        events: mpsc::Sender<PipelineEvent>,
    ) {
        let status_event = match self.model.status().await {
            ModelStatus::Ready(_) => PipelineEvent::ModelReady {
                model: self.model.config().model.clone(),
            },
            ModelStatus::Unavailable(failure) => PipelineEvent::ModelFailed(failure.clone()),
        };
        if events.send(status_event).await.is_err() {
            return;
        }

        while let Some(command) = commands.recv().await {
            match command {
                PipelineCommand::Predict { symptoms } => {
                    let outcome = self.predict(&symptoms).await;
                    if events.send(PipelineEvent::Outcome(outcome)).await.is_err() {
                        break;
                    }
                }
            }
        }

        log::info!("pipeline: command channel closed, shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
