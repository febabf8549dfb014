/*!
 * Tests for language utility functions
 */

use tuberlate::language_utils::{
    get_language_name, is_passthrough, normalize_target, validate_target_language, DEFAULT_TARGET,
};

/// Test normalization of incoming target codes
#[test]
fn test_normalizeTarget_withVariousInputs_shouldNormalizeCorrectly() {
    assert_eq!(normalize_target(Some("FR")), "fr");
    assert_eq!(normalize_target(Some(" es ")), "es");
    assert_eq!(normalize_target(Some("")), DEFAULT_TARGET);
    assert_eq!(normalize_target(None), DEFAULT_TARGET);
}

/// Test the same-language check used for short-circuiting
#[test]
fn test_isPassthrough_withAnyCasing_shouldMatch() {
    assert!(is_passthrough("en", "en"));
    assert!(is_passthrough("EN", "en"));
    assert!(is_passthrough("En", " en "));
    assert!(!is_passthrough("en-gb", "en"));
    assert!(!is_passthrough("fr", "en"));
}

/// Test validation of target codes against the backend's language list
#[test]
fn test_validateTargetLanguage_withValidAndInvalidCodes_shouldValidateCorrectly() {
    assert!(validate_target_language("fr").is_ok());
    assert!(validate_target_language("DE").is_ok());
    assert!(validate_target_language("zh-CN").is_ok());
    assert!(validate_target_language("iw").is_ok());

    assert!(validate_target_language("xyz").is_err());
    assert!(validate_target_language("").is_err());
    assert!(validate_target_language("123").is_err());
}

/// Test language names for log messages
#[test]
fn test_getLanguageName_shouldFallBackToCode() {
    assert_eq!(get_language_name("fr"), "French");
    assert_eq!(get_language_name("zh-tw"), "Chinese");
    assert_eq!(get_language_name("kri"), "kri");
}
