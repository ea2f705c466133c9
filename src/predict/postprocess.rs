//! Post-processing of raw model output into a single disease label.
//!
//! Small seq2seq models often collapse into repeating one word for short
//! classification prompts ("cold cold cold cold"). When the first token
//! shows up more than [`REPETITION_THRESHOLD`] times, only that token is
//! kept; otherwise the whole normalized output is the label.

/// The first token must occur strictly more often than this to be treated
/// as degenerate repetition.
pub const REPETITION_THRESHOLD: usize = 2;

/// Normalize `generated_text` and extract the predicted label.
///
/// 1. trim + lowercase
/// 2. split on whitespace
/// 3. first token count > [`REPETITION_THRESHOLD`] → first token
/// 4. otherwise → the whole normalized string
///
/// Empty input yields an empty string.
///
/// ```
/// use symptom_predictor::predict::extract_prediction;
///
/// assert_eq!(extract_prediction("Cold cold COLD cold"), "cold");
/// assert_eq!(extract_prediction(" Migraine headache "), "migraine headache");
/// ```
pub fn extract_prediction(generated_text: &str) -> String {
    let normalized = generated_text.trim().to_lowercase();

    let mut tokens = normalized.split_whitespace();
    let Some(first) = tokens.next() else {
        return normalized;
    };

    let occurrences = 1 + tokens.filter(|t| *t == first).count();
    if occurrences > REPETITION_THRESHOLD {
        first.to_string()
    } else {
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_first_token_collapses() {
        assert_eq!(extract_prediction("cold cold cold cold"), "cold");
    }

    #[test]
    fn exactly_three_occurrences_collapses() {
        assert_eq!(extract_prediction("flu and flu or flu"), "flu");
    }

    #[test]
    fn two_occurrences_keeps_full_text() {
        assert_eq!(extract_prediction("flu or flu"), "flu or flu");
    }

    #[test]
    fn distinct_tokens_keep_full_text() {
        assert_eq!(
            extract_prediction("migraine headache pain"),
            "migraine headache pain"
        );
    }

    #[test]
    fn normalizes_case_and_outer_whitespace() {
        assert_eq!(extract_prediction("  Dengue Fever \n"), "dengue fever");
        assert_eq!(extract_prediction("MALARIA Malaria malaria"), "malaria");
    }

    #[test]
    fn inner_whitespace_survives_when_not_collapsed() {
        assert_eq!(extract_prediction("rheumatoid   arthritis"), "rheumatoid   arthritis");
    }

    #[test]
    fn only_the_first_token_is_counted() {
        // "pain" repeats but is not the first token.
        assert_eq!(
            extract_prediction("migraine pain pain pain"),
            "migraine pain pain pain"
        );
    }

    #[test]
    fn punctuation_is_part_of_the_token() {
        // "cold," and "cold" are different tokens.
        assert_eq!(extract_prediction("cold, cold cold"), "cold, cold cold");
    }

    #[test]
    fn single_token_is_returned_whole() {
        assert_eq!(extract_prediction("Asthma"), "asthma");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(extract_prediction(""), "");
        assert_eq!(extract_prediction("   \t"), "");
    }
}
