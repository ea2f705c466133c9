//! Core `DiseasePredictor` trait and the HTTP-backed `ApiPredictor`.
//!
//! `ApiPredictor` talks to one of three hosted text-generation APIs:
//!
//! | Provider | Generate | Probe |
//! |----------|----------|-------|
//! | Hugging Face | `POST /models/{model}` | `GET /models/{model}` |
//! | Ollama | `POST /api/generate` | `GET /api/tags` |
//! | OpenAI-compatible | `POST /v1/chat/completions` | `GET /v1/models` |
//!
//! All connection details come from [`ModelConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{ModelConfig, ModelProvider};

// ---------------------------------------------------------------------------
// PredictorError
// ---------------------------------------------------------------------------

/// Errors that can occur while building or calling a predictor.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// The provider is set to `Disabled` in the configuration.
    #[error("prediction model is disabled in the configuration")]
    Disabled,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("model request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("failed to parse model response: {0}")]
    Parse(String),

    /// The model produced no usable text.
    #[error("model returned an empty generation")]
    EmptyResponse,
}

impl From<reqwest::Error> for PredictorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PredictorError::Timeout
        } else {
            PredictorError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// DiseasePredictor trait
// ---------------------------------------------------------------------------

/// Opaque text-generation capability used by the prediction pipeline.
///
/// Implementors must be `Send + Sync` so they can be shared behind an
/// `Arc<dyn DiseasePredictor>`.
#[async_trait]
pub trait DiseasePredictor: Send + Sync {
    /// Generate one continuation of `prompt`, using at most
    /// `max_new_tokens` new tokens.
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, PredictorError>;

    /// Cheap reachability check run once when the model is loaded.
    async fn probe(&self) -> Result<(), PredictorError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ApiPredictor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    HuggingFace,
    Ollama,
    OpenAiCompatible,
}

/// Calls a hosted text-generation endpoint over HTTP.
pub struct ApiPredictor {
    client: reqwest::Client,
    backend: Backend,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ApiPredictor {
    /// Build an `ApiPredictor` from the model section of the config.
    ///
    /// # Errors
    ///
    /// - [`PredictorError::Disabled`] when `provider = Disabled`.
    /// - [`PredictorError::Request`] when the HTTP client cannot be built.
    pub fn from_config(config: &ModelConfig) -> Result<Self, PredictorError> {
        let backend = match config.provider {
            ModelProvider::HuggingFace => Backend::HuggingFace,
            ModelProvider::Ollama => Backend::Ollama,
            ModelProvider::OpenAiCompatible => Backend::OpenAiCompatible,
            ModelProvider::Disabled => return Err(PredictorError::Disabled),
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            backend,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    fn generate_url(&self) -> String {
        match self.backend {
            Backend::HuggingFace => format!("{}/models/{}", self.base_url, self.model),
            Backend::Ollama => format!("{}/api/generate", self.base_url),
            Backend::OpenAiCompatible => format!("{}/v1/chat/completions", self.base_url),
        }
    }

    /// Hugging Face answers `GET /models/{model}` with the model's status;
    /// deployments without that route need `probe_on_load = false`.
    fn probe_url(&self) -> String {
        match self.backend {
            Backend::HuggingFace => format!("{}/models/{}", self.base_url, self.model),
            Backend::Ollama => format!("{}/api/tags", self.base_url),
            Backend::OpenAiCompatible => format!("{}/v1/models", self.base_url),
        }
    }

    fn request_body(&self, prompt: &str, max_new_tokens: u32) -> Value {
        match self.backend {
            Backend::HuggingFace => json!({
                "inputs": prompt,
                "parameters": { "max_new_tokens": max_new_tokens },
                "options": { "wait_for_model": true }
            }),
            Backend::Ollama => json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": { "num_predict": max_new_tokens }
            }),
            Backend::OpenAiCompatible => json!({
                "model": self.model,
                "messages": [ { "role": "user", "content": prompt } ],
                "stream": false,
                "max_tokens": max_new_tokens
            }),
        }
    }

    /// Attach `Authorization: Bearer …` only when a key is configured.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.api_key.as_deref() {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PredictorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PredictorError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

#[async_trait]
impl DiseasePredictor for ApiPredictor {
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, PredictorError> {
        let req = self
            .client
            .post(self.generate_url())
            .json(&self.request_body(prompt, max_new_tokens));

        let response = Self::check_status(self.authorize(req).send().await?).await?;
        let json: Value = response
            .json()
            .await
            .map_err(|e| PredictorError::Parse(e.to_string()))?;

        let text = match self.backend {
            Backend::HuggingFace => parse_hugging_face(&json)?,
            Backend::Ollama => parse_ollama(&json)?,
            Backend::OpenAiCompatible => parse_chat_completion(&json)?,
        };

        if text.trim().is_empty() {
            return Err(PredictorError::EmptyResponse);
        }
        Ok(text)
    }

    async fn probe(&self) -> Result<(), PredictorError> {
        let req = self.client.get(self.probe_url());
        Self::check_status(self.authorize(req).send().await?).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// `[{"generated_text": "..."}]`, or the bare object some deployments send.
fn parse_hugging_face(json: &Value) -> Result<String, PredictorError> {
    let first = match json {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| PredictorError::Parse("empty result array".into()))?,
        other => other,
    };
    first["generated_text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PredictorError::Parse("missing `generated_text`".into()))
}

fn parse_ollama(json: &Value) -> Result<String, PredictorError> {
    json["response"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PredictorError::Parse("missing `response`".into()))
}

fn parse_chat_completion(json: &Value) -> Result<String, PredictorError> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PredictorError::Parse("missing `choices[0].message.content`".into()))
}

/// Pull a readable message out of an error body (`{"error": "..."}` or
/// `{"error": {"message": "..."}}`), else return the body itself.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v["error"]
            .as_str()
            .or_else(|| v["error"]["message"].as_str())
            .map(str::to_string)
    });
    from_json.unwrap_or_else(|| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: ModelProvider, api_key: Option<&str>) -> ModelConfig {
        ModelConfig {
            provider,
            base_url: "http://localhost:8080/".into(),
            api_key: api_key.map(str::to_string),
            ..ModelConfig::default()
        }
    }

    #[test]
    fn disabled_provider_is_rejected() {
        let err = ApiPredictor::from_config(&config(ModelProvider::Disabled, None))
            .err()
            .expect("disabled must not build");
        assert!(matches!(err, PredictorError::Disabled));
    }

    #[test]
    fn urls_follow_provider() {
        let hf = ApiPredictor::from_config(&config(ModelProvider::HuggingFace, None)).unwrap();
        assert_eq!(hf.generate_url(), "http://localhost:8080/models/google/flan-t5-base");
        assert_eq!(hf.probe_url(), "http://localhost:8080/models/google/flan-t5-base");

        let ollama = ApiPredictor::from_config(&config(ModelProvider::Ollama, None)).unwrap();
        assert_eq!(ollama.generate_url(), "http://localhost:8080/api/generate");
        assert_eq!(ollama.probe_url(), "http://localhost:8080/api/tags");

        let openai =
            ApiPredictor::from_config(&config(ModelProvider::OpenAiCompatible, None)).unwrap();
        assert_eq!(openai.generate_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(openai.probe_url(), "http://localhost:8080/v1/models");
    }

    #[test]
    fn empty_api_key_is_dropped() {
        let p = ApiPredictor::from_config(&config(ModelProvider::HuggingFace, Some(""))).unwrap();
        assert!(p.api_key.is_none());
        let p = ApiPredictor::from_config(&config(ModelProvider::HuggingFace, Some("hf_x"))).unwrap();
        assert_eq!(p.api_key.as_deref(), Some("hf_x"));
    }

    #[test]
    fn hugging_face_body_carries_token_budget() {
        let p = ApiPredictor::from_config(&config(ModelProvider::HuggingFace, None)).unwrap();
        let body = p.request_body("Predict", 50);
        assert_eq!(body["inputs"], "Predict");
        assert_eq!(body["parameters"]["max_new_tokens"], 50);
    }

    #[test]
    fn ollama_and_chat_bodies_name_the_model() {
        let p = ApiPredictor::from_config(&config(ModelProvider::Ollama, None)).unwrap();
        let body = p.request_body("Predict", 12);
        assert_eq!(body["model"], "google/flan-t5-base");
        assert_eq!(body["options"]["num_predict"], 12);

        let p = ApiPredictor::from_config(&config(ModelProvider::OpenAiCompatible, None)).unwrap();
        let body = p.request_body("Predict", 12);
        assert_eq!(body["messages"][0]["content"], "Predict");
        assert_eq!(body["max_tokens"], 12);
    }

    #[test]
    fn parses_hugging_face_array_and_object() {
        let arr = json!([{ "generated_text": "cold" }]);
        assert_eq!(parse_hugging_face(&arr).unwrap(), "cold");

        let obj = json!({ "generated_text": "flu" });
        assert_eq!(parse_hugging_face(&obj).unwrap(), "flu");

        assert!(matches!(
            parse_hugging_face(&json!([])),
            Err(PredictorError::Parse(_))
        ));
        assert!(matches!(
            parse_hugging_face(&json!({ "text": "x" })),
            Err(PredictorError::Parse(_))
        ));
    }

    #[test]
    fn parses_ollama_and_chat() {
        assert_eq!(parse_ollama(&json!({ "response": "malaria" })).unwrap(), "malaria");
        assert!(parse_ollama(&json!({})).is_err());

        let chat = json!({ "choices": [ { "message": { "content": "dengue" } } ] });
        assert_eq!(parse_chat_completion(&chat).unwrap(), "dengue");
        assert!(parse_chat_completion(&json!({ "choices": [] })).is_err());
    }

    #[test]
    fn error_message_prefers_json_error_field() {
        assert_eq!(error_message(r#"{"error":"Model is loading"}"#), "Model is loading");
        assert_eq!(
            error_message(r#"{"error":{"message":"bad key"}}"#),
            "bad key"
        );
        assert_eq!(error_message(" gateway down \n"), "gateway down");
    }

    #[test]
    fn predictor_is_object_safe() {
        let p = ApiPredictor::from_config(&config(ModelProvider::HuggingFace, None)).unwrap();
        let boxed: Box<dyn DiseasePredictor> = Box::new(p);
        drop(boxed);
    }
}
