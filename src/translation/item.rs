/*!
 * Single-text translation, the innermost fallback level.
 *
 * A failed call keeps the original text for that position; the failure is
 * recorded in the outcome but never propagated.
 */

use log::debug;

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

use super::throttle::{Pause, Throttle};

/// What happened to one text
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Empty text, returned as-is without a backend call
    Skipped(String),
    /// The backend translated the text
    Translated(String),
    /// The call failed and the original text is kept
    KeptOriginal {
        /// The untranslated text
        original: String,
        /// Why the call failed
        cause: ProviderError,
    },
}

impl ItemOutcome {
    /// Whether a backend call was made for this text
    pub fn issued_call(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }

    /// The text to place at this position
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Skipped(text) | Self::Translated(text) => Some(text),
            Self::KeptOriginal { original, .. } => Some(original),
        }
    }
}

/// Translates texts one call at a time
#[derive(Debug, Clone, Copy)]
pub struct ItemTranslator<'a> {
    backend: &'a dyn TranslationBackend,
    throttle: &'a dyn Throttle,
}

impl<'a> ItemTranslator<'a> {
    /// Create an item translator over a backend and throttle
    pub fn new(backend: &'a dyn TranslationBackend, throttle: &'a dyn Throttle) -> Self {
        Self { backend, throttle }
    }

    /// Translate one text, keeping it unchanged when the call fails
    pub async fn translate(&self, text: &str, target: &str) -> ItemOutcome {
        if text.is_empty() {
            return ItemOutcome::Skipped(String::new());
        }

        match self.backend.translate_one(text, target).await {
            Ok(translated) => ItemOutcome::Translated(translated),
            Err(cause) => {
                debug!("Keeping original text after failed item translation: {}", cause);
                ItemOutcome::KeptOriginal {
                    original: text.to_string(),
                    cause,
                }
            }
        }
    }

    /// Translate texts sequentially, pausing after every issued call but the last
    pub async fn translate_all(&self, texts: &[String], target: &str) -> Vec<ItemOutcome> {
        let mut outcomes = Vec::with_capacity(texts.len());

        for (idx, text) in texts.iter().enumerate() {
            let outcome = self.translate(text, target).await;
            let is_final = idx + 1 == texts.len();

            if outcome.issued_call() && !is_final {
                self.throttle.pause(Pause::BetweenItems).await;
            }
            outcomes.push(outcome);
        }

        outcomes
    }
}
