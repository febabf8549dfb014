/*!
 * Request and response types of a translation job.
 */

use serde::{Deserialize, Serialize};

/// One translation request: ordered texts and a target language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationJob {
    /// Texts to translate; `null` elements are treated as empty strings
    pub texts: Vec<Option<String>>,

    /// Target language code; `null` or missing means `en`
    #[serde(default)]
    pub target: Option<String>,
}

impl TranslationJob {
    /// Create a job from plain strings
    pub fn new<I, S>(texts: I, target: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(|t| Some(t.into())).collect(),
            target: Some(target.into()),
        }
    }

    /// Number of texts in the job
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the job has no texts
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Result returned to the caller; always as long as the job's texts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// One entry per input text, in input order
    pub translations: Vec<String>,

    /// False only when the whole job fell back to the original texts
    pub success: bool,

    /// Diagnostic for the caller when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    /// A completed job
    pub fn completed(translations: Vec<String>) -> Self {
        Self {
            translations,
            success: true,
            error: None,
        }
    }

    /// A job that fell back to its original texts
    pub fn fallback(originals: Vec<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            translations: originals,
            success: false,
            error: Some(diagnostic.into()),
        }
    }
}

/// Most severe fallback a job went through, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationLevel {
    /// Every batch went through in one call
    None,
    /// At least one batch was retried item by item
    Batch,
    /// At least one text was kept untranslated after its own call failed
    Item,
    /// The whole job returned its original texts
    Job,
}

/// How a job was short-circuited, if it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortCircuit {
    /// The job had no texts
    EmptyInput,
    /// The target is the language the texts are already in
    SameLanguage,
}

/// Per-job counters, used for logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Backend that served the job
    pub backend: String,
    /// Normalized target language
    pub target: String,
    /// Number of input texts
    pub texts: usize,
    /// Set when no backend call was made
    pub short_circuit: Option<ShortCircuit>,
    /// Batches dispatched
    pub batches: usize,
    /// Batches whose single call failed
    pub degraded_batches: usize,
    /// Single-item calls issued in degraded mode
    pub items_retried: usize,
    /// Texts returned untranslated after their single-item call failed
    pub items_kept_original: usize,
    /// Backend calls that succeeded
    pub calls_succeeded: usize,
    /// Backend calls that failed because the backend was unreachable
    pub calls_unreachable: usize,
    /// Backend calls that failed for any other reason
    pub calls_failed: usize,
    /// Most severe fallback reached
    pub level: DegradationLevel,
}

impl JobReport {
    /// Create an empty report for a job
    pub fn new(backend: impl Into<String>, target: impl Into<String>, texts: usize) -> Self {
        Self {
            backend: backend.into(),
            target: target.into(),
            texts,
            short_circuit: None,
            batches: 0,
            degraded_batches: 0,
            items_retried: 0,
            items_kept_original: 0,
            calls_succeeded: 0,
            calls_unreachable: 0,
            calls_failed: 0,
            level: DegradationLevel::None,
        }
    }

    /// Raise the recorded level if `level` is more severe
    pub fn reach(&mut self, level: DegradationLevel) {
        self.level = self.level.max(level);
    }

    /// Whether calls were made and every one of them failed to reach the backend
    pub fn backend_unreachable(&self) -> bool {
        self.calls_unreachable > 0 && self.calls_succeeded == 0 && self.calls_failed == 0
    }

    /// One-line summary for the logs
    pub fn summary(&self) -> String {
        match self.short_circuit {
            Some(ShortCircuit::EmptyInput) => "Nothing to translate".to_string(),
            Some(ShortCircuit::SameLanguage) => {
                format!("{} texts already in '{}', returned unchanged", self.texts, self.target)
            }
            None => format!(
                "{} texts into '{}' via {}: {} batches ({} degraded), {} items retried, {} kept original, level {:?}",
                self.texts,
                self.target,
                self.backend,
                self.batches,
                self.degraded_batches,
                self.items_retried,
                self.items_kept_original,
                self.level
            ),
        }
    }
}
