/*!
 * Batch translation pipeline.
 *
 * This module turns an ordered list of texts into an equally long, equally
 * ordered list of translations. It is split into several submodules:
 *
 * - `core`: the service that drives a job end to end
 * - `chunker`: splitting the input into fixed-size batches
 * - `batch`: one call per batch, with per-item recovery
 * - `item`: one call per text, keeping the original on failure
 * - `throttle`: pauses between outgoing calls
 * - `normalizer`: input cleanup and entity decoding of the output
 * - `job`: request, result and report types
 */

// Re-export main types for easier usage
pub use self::batch::{BatchOutcome, BatchTranslator};
pub use self::core::{ServiceOptions, TranslationService};
pub use self::item::{ItemOutcome, ItemTranslator};
pub use self::job::{DegradationLevel, JobReport, ShortCircuit, TranslationJob, TranslationResult};
pub use self::throttle::{Clock, IntervalThrottle, ManualClock, Pause, RecordingThrottle, Throttle, TokioClock};

// Submodules
pub mod batch;
pub mod chunker;
pub mod core;
pub mod item;
pub mod job;
pub mod normalizer;
pub mod throttle;
