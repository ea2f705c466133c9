//! Prompt construction for disease prediction.
//!
//! The model receives a single instruction-style line with the user's
//! symptom text appended verbatim. The same prompt is used for every
//! backend; chat-style backends send it as the only user message.

// ---------------------------------------------------------------------------
// Prompt prefix
// ---------------------------------------------------------------------------

/// Literal instruction that precedes the symptom text.
pub const PROMPT_PREFIX: &str = "Predict the disease based on these symptoms: ";

/// Build the prediction prompt for `symptoms`.
///
/// `symptoms` is embedded unmodified. Callers reject empty input before
/// reaching this point.
///
/// ```
/// use symptom_predictor::predict::build_prompt;
///
/// assert_eq!(
///     build_prompt("fever, cough"),
///     "Predict the disease based on these symptoms: fever, cough"
/// );
/// ```
pub fn build_prompt(symptoms: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_PREFIX.len() + symptoms.len());
    prompt.push_str(PROMPT_PREFIX);
    prompt.push_str(symptoms);
    prompt
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
