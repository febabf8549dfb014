/*!
 * Translation backends.
 *
 * This module contains the client implementations the pipeline can forward
 * texts to:
 * - Google: Google Translate, keyless public endpoint or Cloud Translation v2
 * - Mock: scripted backend for tests, benchmarks and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// Implementations must preserve order and count on success. Failures are
/// reported through `ProviderError` and handled by the pipeline's fallback
/// levels, so implementations should not retry or swallow errors themselves.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Short identifier used in log messages
    fn name(&self) -> &str;

    /// Pre-flight check run once per job, before the first batch
    ///
    /// # Arguments
    /// * `target` - Normalized target language code
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the job can be attempted at all
    async fn prepare(&self, target: &str) -> Result<(), ProviderError>;

    /// Translate several texts in one call
    ///
    /// # Arguments
    /// * `texts` - The texts to translate, in order
    /// * `target` - Normalized target language code
    ///
    /// # Returns
    /// * `Result<Vec<Option<String>>, ProviderError>` - One value per input;
    ///   `None` where the backend produced something other than a string
    async fn translate_batch(
        &self,
        texts: &[String],
        target: &str,
    ) -> Result<Vec<Option<String>>, ProviderError>;

    /// Translate a single text
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target` - Normalized target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate_one(&self, text: &str, target: &str) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
