//! Symptom → disease predictor with Thonglish output.
//!
//! Free-text symptoms are turned into a prompt for a hosted seq2seq model
//! (`google/flan-t5-base` by default). The generated text is filtered for
//! degenerate repetition and the resulting English disease name is mapped
//! to its Thonglish transliteration.
//!
//! * [`config`] — TOML settings.
//! * [`predict`] — prompt, model backends, memoized loading, output filter.
//! * [`translation`] — fixed English → Thonglish table.
//! * [`pipeline`] — request orchestration and outcomes.
//! * [`app`] — egui window.

pub mod app;
pub mod config;
pub mod pipeline;
pub mod predict;
pub mod translation;
