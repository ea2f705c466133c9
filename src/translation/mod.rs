//! Thonglish translation of predicted disease names.
//!
//! Thonglish renders Tamil disease terms in Latin script. The table is fixed
//! at compile time and never mutated.

pub mod table;

pub use table::{
    contains, entries, translate, TranslationEntry, FALLBACK_THONGLISH, THONGLISH_TABLE,
};
