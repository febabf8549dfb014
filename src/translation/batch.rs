/*!
 * Batch translation processing.
 *
 * This module submits one batch per backend call and, when that call fails,
 * retries the batch's texts individually. A batch failure never escapes this
 * module; it only lowers the granularity of the calls.
 */

use log::{debug, warn};

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

use super::chunker::Batch;
use super::item::{ItemOutcome, ItemTranslator};
use super::throttle::{Pause, Throttle};

/// What happened to one batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The single batch call succeeded
    Translated(Vec<Option<String>>),
    /// The batch call failed and every text was retried on its own
    Degraded {
        /// Why the batch call failed
        cause: ProviderError,
        /// Per-text outcomes, in batch order
        items: Vec<ItemOutcome>,
    },
}

impl BatchOutcome {
    /// Number of positions covered by the outcome
    pub fn len(&self) -> usize {
        match self {
            Self::Translated(values) => values.len(),
            Self::Degraded { items, .. } => items.len(),
        }
    }

    /// Whether the outcome covers no positions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values to place at the batch's positions, in order
    pub fn into_values(self) -> Vec<Option<String>> {
        match self {
            Self::Translated(values) => values,
            Self::Degraded { items, .. } => items.into_iter().map(ItemOutcome::into_value).collect(),
        }
    }
}

/// Batch translator with per-item recovery
#[derive(Debug, Clone, Copy)]
pub struct BatchTranslator<'a> {
    /// The backend receiving the calls
    backend: &'a dyn TranslationBackend,

    /// Pacing between batches
    throttle: &'a dyn Throttle,

    /// Fallback for failed batches
    items: ItemTranslator<'a>,
}

impl<'a> BatchTranslator<'a> {
    /// Create a new batch translator
    pub fn new(backend: &'a dyn TranslationBackend, throttle: &'a dyn Throttle) -> Self {
        Self {
            backend,
            throttle,
            items: ItemTranslator::new(backend, throttle),
        }
    }

    /// Translate a batch, falling back to single items if the batch call fails
    pub async fn translate(&self, batch: &Batch<'_>, target: &str) -> BatchOutcome {
        match self.translate_whole(batch, target).await {
            Ok(values) => {
                debug!("Batch {} translated in one call ({} texts)", batch.index + 1, batch.len());
                if !batch.is_last {
                    self.throttle.pause(Pause::BetweenBatches).await;
                }
                BatchOutcome::Translated(values)
            }
            Err(cause) => {
                warn!(
                    "Batch {} translation failed, retrying {} individual entries: {}",
                    batch.index + 1,
                    batch.len(),
                    cause
                );
                let items = self.items.translate_all(batch.texts, target).await;
                BatchOutcome::Degraded { cause, items }
            }
        }
    }

    /// Submit the whole batch in one call and check the answer lines up
    async fn translate_whole(
        &self,
        batch: &Batch<'_>,
        target: &str,
    ) -> Result<Vec<Option<String>>, ProviderError> {
        let values = self.backend.translate_batch(batch.texts, target).await?;

        if values.len() != batch.len() {
            return Err(ProviderError::CountMismatch {
                expected: batch.len(),
                actual: values.len(),
            });
        }

        Ok(values)
    }
}
