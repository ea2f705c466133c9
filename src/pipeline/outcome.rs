//! Result types returned by the prediction pipeline.
//!
//! [`PredictionOutcome`] is a tagged union covering every way a request can
//! end, so callers branch on a value instead of catching errors.

// ---------------------------------------------------------------------------
// PredictionResult
// ---------------------------------------------------------------------------

/// A successful prediction, created once per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    /// Post-processed English label (lowercase).
    pub english: String,
    /// Thonglish transliteration, or the fallback phrase.
    pub thonglish: String,
}

impl PredictionResult {
    pub fn new(english: impl Into<String>, thonglish: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            thonglish: thonglish.into(),
        }
    }

    /// English label in title case, for display.
    ///
    /// ```
    /// use symptom_predictor::pipeline::PredictionResult;
    ///
    /// let r = PredictionResult::new("covid-19", "korona");
    /// assert_eq!(r.english_display(), "Covid-19");
    /// ```
    pub fn english_display(&self) -> String {
        title_case(&self.english)
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

// ---------------------------------------------------------------------------
// PredictionOutcome
// ---------------------------------------------------------------------------

/// How a single prediction request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionOutcome {
    /// Model answered; label extracted and translated.
    Success(PredictionResult),
    /// Symptom text was empty or whitespace only. Shown as a warning.
    EmptyInput,
    /// The model failed to initialise. Shown as a warning.
    ModelUnavailable,
    /// Generation or post-processing failed for this request.
    InferenceFailed {
        /// One-line summary.
        message: String,
        /// Full cause chain.
        trace: String,
    },
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }

    /// Warning text for the outcomes that are warnings rather than errors.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            PredictionOutcome::EmptyInput => Some("Please enter some symptoms first."),
            PredictionOutcome::ModelUnavailable => {
                Some("Model not available. Please try again later.")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
