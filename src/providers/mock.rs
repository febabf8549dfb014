/*!
 * Mock backend implementation for testing.
 *
 * This module provides a scripted backend that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::batch_failing()` - Batch calls fail, single-item calls succeed
 * - `MockProvider::intermittent(n)` - Every Nth call fails with an API error
 * - `MockProvider::failing()` - Every call fails with an API error
 * - `MockProvider::unreachable()` - Every call fails with a connection error
 * - `MockProvider::mismatched()` - Batch answers are one value short
 * - `MockProvider::non_string_at(p)` - Batch answers hold no string at position `p`
 * - `MockProvider::slow(ms)` - Succeeds after a fixed delay per call
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Batch calls fail, single-item calls succeed
    BatchFailing,
    /// Fails every Nth backend call, counting batch and item calls together
    Intermittent { fail_every: usize },
    /// Always fails with an API error
    Failing,
    /// Always fails as if the host could not be reached
    Unreachable,
    /// Batch calls answer with one value too few
    Mismatched,
    /// Batch calls answer with a non-string value at this position
    NonStringAt { position: usize },
    /// Simulates slow responses
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Fixed translations, looked up before the generated default
    dictionary: Arc<HashMap<String, String>>,
    /// Texts whose single-item translation always fails
    failing_texts: Arc<HashSet<String>>,
    /// Target codes rejected by `prepare`
    unsupported_languages: Arc<HashSet<String>>,
    /// Total backend calls, used for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Number of `translate_batch` calls
    batch_calls: Arc<AtomicUsize>,
    /// Number of `prepare` calls
    prepare_calls: Arc<AtomicUsize>,
    /// Every text passed to `translate_one`, in call order
    item_requests: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            dictionary: Arc::new(HashMap::new()),
            failing_texts: Arc::new(HashSet::new()),
            unsupported_languages: Arc::new(HashSet::new()),
            request_count: Arc::new(AtomicUsize::new(0)),
            batch_calls: Arc::new(AtomicUsize::new(0)),
            prepare_calls: Arc::new(AtomicUsize::new(0)),
            item_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock whose batch calls fail but single items succeed
    pub fn batch_failing() -> Self {
        Self::new(MockBehavior::BatchFailing)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that behaves like an unreachable host
    pub fn unreachable() -> Self {
        Self::new(MockBehavior::Unreachable)
    }

    /// Create a mock whose batch answers have the wrong length
    pub fn mismatched() -> Self {
        Self::new(MockBehavior::Mismatched)
    }

    /// Create a mock that returns a non-string value at `position` of every batch
    pub fn non_string_at(position: usize) -> Self {
        Self::new(MockBehavior::NonStringAt { position })
    }

    /// Create a mock that answers every call after `delay_ms` milliseconds
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set fixed translations for specific texts
    pub fn with_dictionary(mut self, entries: &[(&str, &str)]) -> Self {
        self.dictionary = Arc::new(
            entries
                .iter()
                .map(|(source, translated)| (source.to_string(), translated.to_string()))
                .collect(),
        );
        self
    }

    /// Make single-item translation fail for these texts
    pub fn with_failing_texts(mut self, texts: &[&str]) -> Self {
        self.failing_texts = Arc::new(texts.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Make `prepare` reject these target codes
    pub fn with_unsupported_languages(mut self, codes: &[&str]) -> Self {
        self.unsupported_languages = Arc::new(codes.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Total number of translate calls received (batch and item)
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Number of batch calls received
    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Number of single-item calls received
    pub fn item_calls(&self) -> usize {
        self.item_requests.lock().len()
    }

    /// Number of pre-flight checks received
    pub fn prepare_calls(&self) -> usize {
        self.prepare_calls.load(Ordering::SeqCst)
    }

    /// Texts passed to single-item calls, in order
    pub fn item_requests(&self) -> Vec<String> {
        self.item_requests.lock().clone()
    }

    /// Translation the mock produces for `text`
    pub fn translation_for(&self, text: &str, target: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.dictionary.get(text) {
            Some(translated) => translated.clone(),
            None => format!("[{}] {}", target, text),
        }
    }

    /// Count a call and decide whether the behavior makes it fail
    fn check_call(&self) -> Result<(), ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Intermittent { fail_every } if count % fail_every == fail_every - 1 => {
                Err(ProviderError::ApiError {
                    message: format!("Simulated intermittent failure (request #{})", count + 1),
                    status_code: 503,
                })
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
            MockBehavior::Unreachable => Err(ProviderError::ConnectionError(
                "Simulated connection refused".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn simulate_latency(&self) {
        if let MockBehavior::Slow { delay_ms } = self.behavior {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            dictionary: Arc::clone(&self.dictionary),
            failing_texts: Arc::clone(&self.failing_texts),
            unsupported_languages: Arc::clone(&self.unsupported_languages),
            request_count: Arc::clone(&self.request_count),
            batch_calls: Arc::clone(&self.batch_calls),
            prepare_calls: Arc::clone(&self.prepare_calls),
            item_requests: Arc::clone(&self.item_requests),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn prepare(&self, target: &str) -> Result<(), ProviderError> {
        self.prepare_calls.fetch_add(1, Ordering::SeqCst);

        if self.unsupported_languages.contains(target) {
            return Err(ProviderError::UnsupportedLanguage(target.to_string()));
        }
        Ok(())
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target: &str,
    ) -> Result<Vec<Option<String>>, ProviderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_call()?;
        self.simulate_latency().await;

        let mut translations: Vec<Option<String>> = texts
            .iter()
            .map(|text| Some(self.translation_for(text, target)))
            .collect();

        match self.behavior {
            MockBehavior::BatchFailing => Err(ProviderError::ApiError {
                message: "Simulated batch endpoint failure".to_string(),
                status_code: 502,
            }),
            MockBehavior::Mismatched => {
                translations.pop();
                Ok(translations)
            }
            MockBehavior::NonStringAt { position } => {
                if let Some(slot) = translations.get_mut(position) {
                    *slot = None;
                }
                Ok(translations)
            }
            _ => Ok(translations),
        }
    }

    async fn translate_one(&self, text: &str, target: &str) -> Result<String, ProviderError> {
        self.item_requests.lock().push(text.to_string());
        self.check_call()?;
        self.simulate_latency().await;

        if self.failing_texts.contains(text) {
            return Err(ProviderError::ApiError {
                message: format!("Simulated failure for '{}'", text),
                status_code: 500,
            });
        }

        Ok(self.translation_for(text, target))
    }
}
