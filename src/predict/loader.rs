//! One-shot, memoized model initialisation.
//!
//! [`ModelCache`] builds the predictor from [`ModelConfig`] the first time
//! [`status`](ModelCache::status) is awaited, optionally probes the endpoint,
//! and stores the outcome. Success and failure are both cached; a failed
//! load is never retried for the lifetime of the process.

use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::OnceCell;

use crate::config::ModelConfig;
use crate::predict::predictor::{ApiPredictor, DiseasePredictor, PredictorError};

/// Builds a predictor from config. Swappable so tests can count calls or
/// inject doubles.
pub type PredictorFactory =
    Box<dyn Fn(&ModelConfig) -> Result<Arc<dyn DiseasePredictor>, PredictorError> + Send + Sync>;

// ---------------------------------------------------------------------------
// LoadFailure / ModelStatus
// ---------------------------------------------------------------------------

/// Why the model could not be initialised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// One-line summary for the UI.
    pub message: String,
    /// Full cause chain, shown as preformatted text.
    pub trace: String,
}

impl LoadFailure {
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            trace: format!("{err:?}"),
        }
    }
}

/// Cached result of model initialisation.
#[derive(Clone)]
pub enum ModelStatus {
    Ready(Arc<dyn DiseasePredictor>),
    Unavailable(LoadFailure),
}

impl ModelStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }
}

impl fmt::Debug for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelStatus::Ready(_) => f.write_str("Ready(..)"),
            ModelStatus::Unavailable(failure) => {
                f.debug_tuple("Unavailable").field(failure).finish()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ModelCache
// ---------------------------------------------------------------------------

/// Process-wide holder of the loaded predictor.
///
/// Share it behind an `Arc`; concurrent first callers wait on the same
/// initialisation.
pub struct ModelCache {
    config: ModelConfig,
    factory: PredictorFactory,
    cell: OnceCell<ModelStatus>,
}

impl ModelCache {
    /// Cache that builds an [`ApiPredictor`] from `config`.
    pub fn new(config: ModelConfig) -> Self {
        Self::with_factory(
            config,
            Box::new(|cfg: &ModelConfig| {
                ApiPredictor::from_config(cfg).map(|p| Arc::new(p) as Arc<dyn DiseasePredictor>)
            }),
        )
    }

    /// Cache with a custom predictor factory.
    pub fn with_factory(config: ModelConfig, factory: PredictorFactory) -> Self {
        Self {
            config,
            factory,
            cell: OnceCell::new(),
        }
    }

    /// Cache that is already initialised with `status`; nothing is built.
    pub fn preloaded(config: ModelConfig, status: ModelStatus) -> Self {
        Self {
            config,
            factory: Box::new(
                |_: &ModelConfig| -> Result<Arc<dyn DiseasePredictor>, PredictorError> {
                    Err(PredictorError::Disabled)
                },
            ),
            cell: OnceCell::new_with(Some(status)),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Load on first call, then return the memoized status.
    pub async fn status(&self) -> &ModelStatus {
        self.cell.get_or_init(|| self.load()).await
    }

    /// The status if loading has already finished.
    pub fn get(&self) -> Option<&ModelStatus> {
        self.cell.get()
    }

    async fn load(&self) -> ModelStatus {
        log::info!(
            "loading model {} via {:?} at {}",
            self.config.model,
            self.config.provider,
            self.config.base_url
        );
        match self.try_load().await {
            Ok(predictor) => {
                log::info!("model {} ready", self.config.model);
                ModelStatus::Ready(predictor)
            }
            Err(err) => {
                log::error!("failed to load model: {err:#}");
                ModelStatus::Unavailable(LoadFailure::from_error(&err))
            }
        }
    }

    async fn try_load(&self) -> anyhow::Result<Arc<dyn DiseasePredictor>> {
        let predictor = (self.factory)(&self.config)
            .with_context(|| format!("failed to initialise model `{}`", self.config.model))?;

        if self.config.probe_on_load {
            predictor.probe().await.with_context(|| {
                format!(
                    "model `{}` is not reachable at {}",
                    self.config.model, self.config.base_url
                )
            })?;
        }

        Ok(predictor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
