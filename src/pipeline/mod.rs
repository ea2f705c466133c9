//! Prediction pipeline and the command loop behind the UI.
//!
//! # Architecture
//!
//! ```text
//! PredictorApp (egui)                       PredictionPipeline::run()  ← tokio task
//!   │  PipelineCommand::Predict ──mpsc──▶      │
//!   │                                          ├─ ModelCache::status()  (once)
//!   │  ◀──mpsc── PipelineEvent::ModelReady     │
//!   │            / ModelFailed                 │
//!   │                                          └─ predict(symptoms)
//!   │  ◀──mpsc── PipelineEvent::Outcome             prompt → generate → filter → translate
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use symptom_predictor::config::AppConfig;
//! use symptom_predictor::pipeline::{PredictionOutcome, PredictionPipeline};
//! use symptom_predictor::predict::ModelCache;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let pipeline = PredictionPipeline::new(Arc::new(ModelCache::new(config.model)));
//!
//!     match pipeline.predict("fever, chills, sweating").await {
//!         PredictionOutcome::Success(r) => println!("{} / {}", r.english_display(), r.thonglish),
//!         other => println!("{other:?}"),
//!     }
//! }
//! ```

pub mod outcome;
pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use outcome::{title_case, PredictionOutcome, PredictionResult};
pub use runner::{PipelineCommand, PipelineEvent, PredictionPipeline};
