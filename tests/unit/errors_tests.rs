/*!
 * Tests for error types and conversions
 */

use tuberlate::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_countMismatch_shouldDisplayBothCounts() {
    let display = ProviderError::CountMismatch { expected: 25, actual: 24 }.to_string();
    assert!(display.contains("25"));
    assert!(display.contains("24"));
}

#[test]
fn test_providerError_isUnreachable_shouldOnlyMatchConnectivityFailures() {
    assert!(ProviderError::ConnectionError("refused".to_string()).is_unreachable());
    assert!(ProviderError::Timeout("30s".to_string()).is_unreachable());
    assert!(!ProviderError::RateLimitExceeded("slow down".to_string()).is_unreachable());
    assert!(!ProviderError::ApiError { status_code: 503, message: String::new() }.is_unreachable());
}

#[test]
fn test_translationError_fromProviderError_shouldClassifyCause() {
    assert_eq!(
        TranslationError::from(ProviderError::UnsupportedLanguage("xx".to_string())),
        TranslationError::UnsupportedLanguage("xx".to_string())
    );
    assert!(matches!(
        TranslationError::from(ProviderError::ConnectionError("dns".to_string())),
        TranslationError::ServiceUnavailable(_)
    ));
    assert!(matches!(
        TranslationError::from(ProviderError::AuthenticationError("bad key".to_string())),
        TranslationError::Provider(ProviderError::AuthenticationError(_))
    ));
}

#[test]
fn test_translationError_userMessage_shouldDistinguishUnavailableService() {
    assert_eq!(
        TranslationError::ServiceUnavailable("refused".to_string()).user_message(),
        "Translation service temporarily unavailable. Showing original text."
    );
    assert_eq!(
        TranslationError::UnsupportedLanguage("xx".to_string()).user_message(),
        "Unsupported target language 'xx'. Showing original text."
    );
    assert_eq!(
        TranslationError::LengthMismatch { expected: 2, actual: 1 }.user_message(),
        "Translation failed. Showing original text."
    );
}

#[test]
fn test_appError_fromProviderError_shouldWrap() {
    let error: AppError = ProviderError::ParseError("bad json".to_string()).into();
    assert!(matches!(error, AppError::Provider(_)));
    assert!(error.to_string().contains("bad json"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}
