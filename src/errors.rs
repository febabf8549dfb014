/*!
 * Error types for the tuberlate pipeline.
 *
 * This module contains custom error types for the different layers of the
 * application, using the thiserror crate for ergonomic error definitions:
 * - `ProviderError`: a single backend call failed
 * - `TranslationError`: a whole job had to fall back to the original texts
 * - `AppError`: configuration and CLI failures
 */

use thiserror::Error;

/// Errors that can occur when calling a translation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The backend answered with a different number of items than it was sent
    #[error("Expected {expected} translations, got {actual}")]
    CountMismatch {
        /// Number of texts submitted
        expected: usize,
        /// Number of values returned
        actual: usize,
    },

    /// The backend does not translate into this language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

impl ProviderError {
    /// Whether this failure means the backend could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::ConnectionError(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Job-level failures: the whole input is returned untranslated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// The backend rejected the target language before any batch was sent
    #[error("Unsupported target language '{0}'")]
    UnsupportedLanguage(String),

    /// The backend could not be reached
    #[error("Translation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other backend failure during pre-flight
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// The assembled output does not line up with the input
    #[error("Assembled {actual} translations for {expected} texts")]
    LengthMismatch {
        /// Number of input texts
        expected: usize,
        /// Number of assembled translations
        actual: usize,
    },
}

impl TranslationError {
    /// Diagnostic shown to the caller alongside the original texts
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedLanguage(code) => {
                format!("Unsupported target language '{}'. Showing original text.", code)
            }
            Self::ServiceUnavailable(_) => {
                "Translation service temporarily unavailable. Showing original text.".to_string()
            }
            Self::Provider(_) | Self::LengthMismatch { .. } => {
                "Translation failed. Showing original text.".to_string()
            }
        }
    }
}

impl From<ProviderError> for TranslationError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::UnsupportedLanguage(code) => Self::UnsupportedLanguage(code),
            e if e.is_unreachable() => Self::ServiceUnavailable(e.to_string()),
            e => Self::Provider(e),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
