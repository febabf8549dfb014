/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which drives a job
 * through the pipeline: short-circuit checks, pre-flight, chunking, batch
 * translation with per-item recovery and output normalization. Whatever
 * happens below it, the service answers with one translation per input text.
 */

use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::google::{GoogleMode, GoogleTranslate};
use crate::providers::mock::MockProvider;
use crate::providers::TranslationBackend;

use super::batch::{BatchOutcome, BatchTranslator};
use super::chunker::{self, DEFAULT_BATCH_SIZE};
use super::item::ItemOutcome;
use super::job::{DegradationLevel, JobReport, ShortCircuit, TranslationJob, TranslationResult};
use super::normalizer;
use super::throttle::{IntervalThrottle, Throttle};

/// Pipeline settings that do not belong to a backend
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOptions {
    /// Maximum number of texts per batch call
    pub batch_size: usize,

    /// Language the client texts are already in
    pub passthrough_language: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            passthrough_language: language_utils::DEFAULT_TARGET.to_string(),
        }
    }
}

impl From<&TranslationConfig> for ServiceOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            passthrough_language: language_utils::normalize_target(Some(&config.passthrough_language)),
        }
    }
}

/// Translation service for ordered text batches
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// The backend all calls go to
    backend: Arc<dyn TranslationBackend>,

    /// Pacing between calls
    throttle: Arc<dyn Throttle>,

    /// Pipeline settings
    options: ServiceOptions,
}

impl TranslationService {
    /// Create a service over an existing backend and throttle
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        throttle: Arc<dyn Throttle>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            backend,
            throttle,
            options,
        }
    }

    /// Create a service from configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let backend: Arc<dyn TranslationBackend> = match config.provider {
            ConfigTranslationProvider::Google => Arc::new(GoogleTranslate::new(
                GoogleMode::Public,
                config.endpoint.clone(),
                config.source_language.clone(),
                config.timeout(),
            )),
            ConfigTranslationProvider::GoogleCloud => Arc::new(GoogleTranslate::new(
                GoogleMode::Cloud {
                    api_key: config.api_key.clone(),
                },
                config.endpoint.clone(),
                config.source_language.clone(),
                config.timeout(),
            )),
            ConfigTranslationProvider::Mock => Arc::new(MockProvider::working()),
        };

        let throttle = Arc::new(IntervalThrottle::new(config.batch_delay(), config.item_delay()));

        Ok(Self::new(backend, throttle, ServiceOptions::from(config)))
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Pipeline settings in use
    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// Translate a job; never fails
    pub async fn translate(&self, job: TranslationJob) -> TranslationResult {
        self.translate_with_report(job).await.0
    }

    /// Translate a job and return the counters gathered along the way
    pub async fn translate_with_report(&self, job: TranslationJob) -> (TranslationResult, JobReport) {
        let target = language_utils::normalize_target(job.target.as_deref());
        let originals = normalizer::normalize_inputs(job.texts);
        let mut report = JobReport::new(self.backend.name(), &target, originals.len());

        if originals.is_empty() {
            report.short_circuit = Some(ShortCircuit::EmptyInput);
            debug!("{}", report.summary());
            return (TranslationResult::completed(Vec::new()), report);
        }

        if language_utils::is_passthrough(&target, &self.options.passthrough_language) {
            report.short_circuit = Some(ShortCircuit::SameLanguage);
            debug!("{}", report.summary());
            return (TranslationResult::completed(originals), report);
        }

        let result = match self.run(&originals, &target, &mut report).await {
            Ok(translations) => TranslationResult::completed(translations),
            Err(e) => {
                report.reach(DegradationLevel::Job);
                error!("Translation job into '{}' failed, returning original texts: {}", target, e);
                TranslationResult::fallback(originals, e.user_message())
            }
        };

        info!("{}", report.summary());
        (result, report)
    }

    /// Submit every batch and assemble the normalized output
    async fn run(
        &self,
        originals: &[String],
        target: &str,
        report: &mut JobReport,
    ) -> Result<Vec<String>, TranslationError> {
        self.backend.prepare(target).await?;

        let translator = BatchTranslator::new(self.backend.as_ref(), self.throttle.as_ref());
        let mut values: Vec<Option<String>> = Vec::with_capacity(originals.len());
        let mut last_cause = None;

        for batch in chunker::chunk(originals, self.options.batch_size) {
            report.batches += 1;
            let outcome = translator.translate(&batch, target).await;
            if let BatchOutcome::Degraded { cause, .. } = &outcome {
                last_cause = Some(cause.clone());
            }
            record_outcome(report, &outcome);
            values.extend(outcome.into_values());
        }

        if report.backend_unreachable() {
            let cause = last_cause.map(|c| c.to_string()).unwrap_or_default();
            return Err(TranslationError::ServiceUnavailable(cause));
        }

        if values.len() != originals.len() {
            return Err(TranslationError::LengthMismatch {
                expected: originals.len(),
                actual: values.len(),
            });
        }

        Ok(normalizer::finalize(values, originals))
    }
}

/// Fold one batch outcome into the job counters
fn record_outcome(report: &mut JobReport, outcome: &BatchOutcome) {
    match outcome {
        BatchOutcome::Translated(_) => report.calls_succeeded += 1,
        BatchOutcome::Degraded { cause, items } => {
            report.degraded_batches += 1;
            report.reach(DegradationLevel::Batch);
            count_failure(report, cause.is_unreachable());

            for item in items {
                match item {
                    ItemOutcome::Skipped(_) => {}
                    ItemOutcome::Translated(_) => {
                        report.items_retried += 1;
                        report.calls_succeeded += 1;
                    }
                    ItemOutcome::KeptOriginal { cause, .. } => {
                        report.items_retried += 1;
                        report.items_kept_original += 1;
                        report.reach(DegradationLevel::Item);
                        count_failure(report, cause.is_unreachable());
                    }
                }
            }
        }
    }
}

fn count_failure(report: &mut JobReport, unreachable: bool) {
    if unreachable {
        report.calls_unreachable += 1;
    } else {
        report.calls_failed += 1;
    }
}
