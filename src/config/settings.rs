//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every section is `#[serde(default)]`, so a hand-edited file only needs the
//! keys it wants to change.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable consulted when `model.api_key` is left empty.
pub const API_TOKEN_ENV: &str = "HF_API_TOKEN";

// ---------------------------------------------------------------------------
// ModelProvider
// ---------------------------------------------------------------------------

/// Selects which hosted backend runs the text-generation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelProvider {
    /// Hugging Face inference API (`/models/{model}`, text2text-generation).
    HuggingFace,
    /// Ollama running locally (`/api/generate`).
    Ollama,
    /// Any OpenAI-compatible REST API (`/v1/chat/completions`).
    OpenAiCompatible,
    /// Prediction disabled; the model is always reported unavailable.
    Disabled,
}

impl Default for ModelProvider {
    fn default() -> Self {
        Self::HuggingFace
    }
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// Settings for the disease-prediction model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Which backend to use.
    pub provider: ModelProvider,
    /// Base URL of the inference endpoint.
    ///
    /// - Hugging Face: `https://api-inference.huggingface.co`
    /// - Ollama: `http://localhost:11434`
    pub base_url: String,
    /// API token. `None` falls back to the `HF_API_TOKEN` environment
    /// variable; local providers need neither.
    pub api_key: Option<String>,
    /// Model identifier (e.g. `"google/flan-t5-base"`).
    pub model: String,
    /// Token budget for one generated continuation.
    pub max_new_tokens: u32,
    /// Maximum seconds to wait for a single HTTP call.
    pub timeout_secs: u64,
    /// Check that the model endpoint answers before accepting requests.
    ///
    /// For Hugging Face this is `GET {base_url}/models/{model}`. If the
    /// deployment does not serve that route (some gateways and mirrors only
    /// accept POST), every request reports the model as unavailable; set
    /// this to `false` to skip the check and rely on the first generation.
    pub probe_on_load: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            base_url: "https://api-inference.huggingface.co".into(),
            api_key: None,
            model: "google/flan-t5-base".into(),
            max_new_tokens: 50,
            timeout_secs: 60,
            probe_on_load: true,
        }
    }
}

impl ModelConfig {
    /// Fill an unset/empty `api_key` from `env_value`.
    ///
    /// A key written in `settings.toml` always wins over the environment.
    pub fn apply_token_fallback(&mut self, env_value: Option<String>) {
        let has_key = self.api_key.as_deref().is_some_and(|k| !k.is_empty());
        if !has_key {
            if let Some(token) = env_value.filter(|t| !t.trim().is_empty()) {
                self.api_key = Some(token.trim().to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window settings for the interactive shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
    pub always_on_top: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 560.0,
            window_height: 520.0,
            always_on_top: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use symptom_predictor::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("model: {}", config.model.model);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prediction model settings.
    pub model: ModelConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`,
    /// then apply the `HF_API_TOKEN` fallback.
    ///
    /// Returns defaults when the file does not exist yet.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&AppPaths::new().settings_file)?;
        config
            .model
            .apply_token_fallback(std::env::var(API_TOKEN_ENV).ok());
        Ok(config)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
