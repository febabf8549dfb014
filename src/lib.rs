/*!
 * # tuberlate - batch text translation with graceful degradation
 *
 * A Rust library that translates ordered lists of texts through an external
 * translation backend without ever losing a position.
 *
 * ## Features
 *
 * - Fixed-size batching with one backend call per batch
 * - Per-item recovery when a batch call fails
 * - Original text kept for any item that still fails
 * - Whole-job fallback with a diagnostic when the backend is unreachable
 * - Throttled, strictly sequential calls per job
 * - Google Translate backend (public endpoint or Cloud Translation v2)
 * - Bounded per-session conversation history
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The batch translation pipeline:
 *   - `translation::core`: Job orchestration
 *   - `translation::batch`: Batch calls with per-item recovery
 *   - `translation::item`: Single-text calls
 *   - `translation::chunker`: Batch splitting
 *   - `translation::throttle`: Pacing between calls
 *   - `translation::normalizer`: Input cleanup and entity decoding
 * - `app_controller`: Main application controller
 * - `language_utils`: Language code utilities
 * - `providers`: Translation backends:
 *   - `providers::google`: Google Translate client
 *   - `providers::mock`: Scripted backend for tests
 * - `session`: Conversation history store
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, normalize_target};
pub use providers::TranslationBackend;
pub use session::ConversationStore;
pub use translation::{TranslationJob, TranslationResult, TranslationService};
