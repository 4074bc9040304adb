//! Pluggable text translation behind the translate action

use crate::types::Language;

/// Turns session input text into output text
///
/// The state machine only depends on this trait, so a real translation
/// backend can replace [`PassThroughTranslator`] without touching session
/// transitions.
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`
    fn translate(&self, text: &str, target: Language) -> String;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Translator that returns its input unchanged
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThroughTranslator;

impl Translator for PassThroughTranslator {
    fn translate(&self, text: &str, _target: Language) -> String {
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "pass_through"
    }
}
