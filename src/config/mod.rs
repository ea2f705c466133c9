//! Configuration module for the symptom predictor.
//!
//! Provides `AppConfig` (top-level settings), `ModelConfig` / `UiConfig`
//! sub-configs, `AppPaths` for the cross-platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ModelConfig, ModelProvider, UiConfig, API_TOKEN_ENV};
