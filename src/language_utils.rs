//! Language utilities for target language handling
//!
//! Target codes arrive from the client in whatever casing it used and may be
//! missing entirely. These helpers normalize them and decide whether the
//! translation backend understands a code.

use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Language assumed when a job does not name a target
pub const DEFAULT_TARGET: &str = "en";

/// Codes Google Translate accepts that are not plain ISO 639-1 codes
static GOOGLE_EXTRA_CODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "zh-cn", "zh-tw", "iw", "jw", "fil", "haw", "hmn", "ceb", "mni-mtei", "gom", "doi",
        "kri", "lus", "ilo", "bho", "mai", "nso", "ckb", "pt-br", "pt-pt",
    ]
    .into_iter()
    .collect()
});

/// Normalize a target code: trimmed, lower-cased, `en` when absent or blank
pub fn normalize_target(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_lowercase(),
        _ => DEFAULT_TARGET.to_string(),
    }
}

/// Check whether translating into `target` is a no-op for texts written in `passthrough`
pub fn is_passthrough(target: &str, passthrough: &str) -> bool {
    target.trim().eq_ignore_ascii_case(passthrough.trim())
}

/// Validate that Google Translate can translate into this code
pub fn validate_target_language(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    if GOOGLE_EXTRA_CODES.contains(normalized_code.as_str()) {
        return Ok(());
    }

    Err(anyhow!("Invalid target language code: {}", code))
}

/// Get the English language name for a code, falling back to the code itself
pub fn get_language_name(code: &str) -> String {
    let normalized_code = code.trim().to_lowercase();
    let primary = normalized_code.split('-').next().unwrap_or_default();

    Language::from_639_1(primary)
        .map(|lang| lang.to_name().to_string())
        .unwrap_or(normalized_code)
}
