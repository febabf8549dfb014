/*!
 * Common test utilities for the tuberlate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use tuberlate::providers::TranslationBackend;
use tuberlate::translation::{RecordingThrottle, ServiceOptions, TranslationService};


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Owned strings from literals
pub fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|t| t.to_string()).collect()
}

/// A service over `backend` with the default options and a recording throttle
pub fn service_with<B>(backend: B) -> (TranslationService, Arc<RecordingThrottle>)
where
    B: TranslationBackend + 'static,
{
    service_with_batch_size(backend, ServiceOptions::default().batch_size)
}

/// A service over `backend` with a custom batch size and a recording throttle
pub fn service_with_batch_size<B>(backend: B, batch_size: usize) -> (TranslationService, Arc<RecordingThrottle>)
where
    B: TranslationBackend + 'static,
{
    let throttle = Arc::new(RecordingThrottle::new());
    let options = ServiceOptions {
        batch_size,
        ..ServiceOptions::default()
    };
    let service = TranslationService::new(Arc::new(backend), throttle.clone(), options);
    (service, throttle)
}

/// Route library logs through the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
