//! Disease prediction: prompt, model access, output clean-up.
//!
//! This module provides:
//! * [`build_prompt`] — the instruction prompt sent to the model.
//! * [`DiseasePredictor`] — async trait implemented by all model backends.
//! * [`ApiPredictor`] — Hugging Face / Ollama / OpenAI-compatible HTTP backend.
//! * [`ModelCache`] — memoized, one-shot model initialisation.
//! * [`extract_prediction`] — repetition filter over raw generated text.
//! * [`PredictorError`] — error variants for model operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use symptom_predictor::config::AppConfig;
//! use symptom_predictor::predict::{build_prompt, extract_prediction, ModelCache, ModelStatus};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let cache = ModelCache::new(config.model.clone());
//!
//!     if let ModelStatus::Ready(predictor) = cache.status().await {
//!         let prompt = build_prompt("fever, cough, body ache");
//!         let raw = predictor.generate(&prompt, config.model.max_new_tokens).await.unwrap();
//!         println!("{}", extract_prediction(&raw));
//!     }
//! }
//! ```

pub mod loader;
pub mod postprocess;
pub mod predictor;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use loader::{LoadFailure, ModelCache, ModelStatus, PredictorFactory};
pub use postprocess::{extract_prediction, REPETITION_THRESHOLD};
pub use predictor::{ApiPredictor, DiseasePredictor, PredictorError};
pub use prompt::{build_prompt, PROMPT_PREFIX};
