//! Fixed English → Thonglish disease table.
//!
//! Keys are canonical disease names in lowercase English. The table is a
//! `static` slice; [`translate`] looks entries up through a `HashMap` built
//! on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Returned by [`translate`] for any label that is not an exact key.
/// Reads "no medical explanation available".
pub const FALLBACK_THONGLISH: &str = "maruthuva vilakkam kedaiyadhu";

/// One row of the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Canonical disease name, lowercase English.
    pub key: &'static str,
    /// Thonglish transliteration.
    pub value: &'static str,
}

const fn entry(key: &'static str, value: &'static str) -> TranslationEntry {
    TranslationEntry { key, value }
}

/// All known diseases.
pub const THONGLISH_TABLE: &[TranslationEntry] = &[
    entry("flu", "flu"),
    entry("cold", "kulir"),
    entry("pneumonia", "nimoniyaa"),
    entry("malaria", "maleriya"),
    entry("dengue", "dengu"),
    entry("typhoid", "taifoidu"),
    entry("covid-19", "korona"),
    entry("diabetes", "neerizhivu"),
    entry("asthma", "asthuma"),
    entry("tuberculosis", "kaasanoy"),
    entry("migraine", "thalai vali"),
    entry("rheumatoid arthritis", "rheumatoid arthritis"),
    entry("chickenpox", "chikkan paks"),
    entry("measles", "saruma nooy"),
    entry("jaundice", "manjal kaamalai"),
    entry("anemia", "iratha sogai"),
];

static INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| THONGLISH_TABLE.iter().map(|e| (e.key, e.value)).collect());

/// Map a disease label to its Thonglish form.
///
/// Exact match only: no trimming, case folding, plural or synonym handling.
///
/// ```
/// use symptom_predictor::translation::{translate, FALLBACK_THONGLISH};
///
/// assert_eq!(translate("cold"), "kulir");
/// assert_eq!(translate("colds"), FALLBACK_THONGLISH);
/// ```
pub fn translate(label: &str) -> &'static str {
    INDEX.get(label).copied().unwrap_or(FALLBACK_THONGLISH)
}

/// Returns `true` when `label` is an exact key of the table.
pub fn contains(label: &str) -> bool {
    INDEX.contains_key(label)
}

/// Iterate the table in declaration order.
pub fn entries() -> impl Iterator<Item = &'static TranslationEntry> {
    THONGLISH_TABLE.iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_key_maps_to_its_value() {
        for e in THONGLISH_TABLE {
            assert_eq!(translate(e.key), e.value, "key {:?}", e.key);
            // repeated lookups are stable
            assert_eq!(translate(e.key), e.value);
        }
    }

    #[test]
    fn keys_are_unique_and_lowercase() {
        let keys: HashSet<_> = THONGLISH_TABLE.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), THONGLISH_TABLE.len());
        for key in keys {
            assert_eq!(key, key.to_lowercase());
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(translate("cold"), "kulir");
        assert_eq!(translate("covid-19"), "korona");
        assert_eq!(translate("migraine"), "thalai vali");
        assert_eq!(translate("anemia"), "iratha sogai");
        assert_eq!(translate("rheumatoid arthritis"), "rheumatoid arthritis");
    }

    #[test]
    fn unknown_label_returns_fallback() {
        assert_eq!(translate("migraine headache pain"), FALLBACK_THONGLISH);
        assert_eq!(translate("gout"), FALLBACK_THONGLISH);
        assert_eq!(translate(""), FALLBACK_THONGLISH);
    }

    #[test]
    fn no_normalization_is_applied() {
        assert_eq!(translate("Cold"), FALLBACK_THONGLISH);
        assert_eq!(translate(" cold"), FALLBACK_THONGLISH);
        assert_eq!(translate("colds"), FALLBACK_THONGLISH);
        assert_eq!(translate("arthritis"), FALLBACK_THONGLISH);
    }

    #[test]
    fn contains_and_entries_agree() {
        assert_eq!(entries().count(), 16);
        assert!(entries().all(|e| contains(e.key)));
        assert!(!contains("influenza"));
    }
}
