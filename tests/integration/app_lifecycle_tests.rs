/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use tuberlate::app_config::{Config, TranslationProvider};
use tuberlate::app_controller::Controller;
use tuberlate::providers::mock::MockProvider;
use tuberlate::translation::TranslationResult;

use crate::common;

fn mock_config() -> Config {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.batch_delay_ms = 0;
    config.translation.item_delay_ms = 0;
    config
}

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().translation.provider, TranslationProvider::Google);
    Ok(())
}

/// Test a full run from a job file on disk
#[tokio::test]
async fn test_controller_run_withJobFile_shouldPrintResultJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let job_path = common::create_test_file(
        temp_dir.path(),
        "job.json",
        r#"{"texts": ["Hello", null, "World"], "target": "FR"}"#,
    )?;

    let controller = Controller::with_config(mock_config())?;
    let output = controller.run(Some(job_path.as_path()), None).await?;

    let result: TranslationResult = serde_json::from_str(&output)?;
    assert!(result.success);
    assert_eq!(result.translations, vec!["[fr] Hello", "", "[fr] World"]);
    assert!(!output.contains("\"error\""));
    Ok(())
}

/// Test that the CLI target overrides the job's target
#[tokio::test]
async fn test_controller_run_withTargetOverride_shouldUseOverride() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let job_path = common::create_test_file(temp_dir.path(), "job.json", r#"{"texts": ["Hi"], "target": "fr"}"#)?;

    let controller = Controller::with_config(mock_config())?;
    let output = controller.run(Some(job_path.as_path()), Some("en")).await?;

    let result: TranslationResult = serde_json::from_str(&output)?;
    assert_eq!(result.translations, vec!["Hi"]);
    Ok(())
}

/// Test that a job-level fallback is still printed, with its diagnostic
#[tokio::test]
async fn test_controller_run_withUnreachableBackend_shouldPrintFallbackJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let job_path = common::create_test_file(temp_dir.path(), "job.json", r#"{"texts": ["Hi", ""], "target": "fr"}"#)?;

    let backend = MockProvider::unreachable();
    let (service, _) = common::service_with(backend.clone());
    let controller = Controller::with_service(mock_config(), service);
    let output = controller.run(Some(job_path.as_path()), None).await?;

    let result: TranslationResult = serde_json::from_str(&output)?;
    assert!(!result.success);
    assert_eq!(result.translations, vec!["Hi", ""]);
    assert_eq!(
        result.error.as_deref(),
        Some("Translation service temporarily unavailable. Showing original text.")
    );
    assert_eq!(backend.prepare_calls(), 1);
    assert_eq!(controller.config().translation.provider, TranslationProvider::Mock);
    Ok(())
}

/// Test that a malformed job is an error rather than a degraded result
#[tokio::test]
async fn test_controller_run_withMalformedJob_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let job_path = common::create_test_file(temp_dir.path(), "job.json", r#"{"texts": "not a list"}"#)?;

    let controller = Controller::with_config(mock_config())?;
    assert!(controller.run(Some(job_path.as_path()), None).await.is_err());
    assert!(controller.run(Some(temp_dir.path().join("missing.json").as_path()), None).await.is_err());
    Ok(())
}

/// Test the config file round trip the binary performs on startup
#[test]
fn test_config_firstStartup_shouldCreateFileUsableByController() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&config_path)?;
    config.validate()?;
    assert!(config_path.exists());

    let controller = Controller::with_config(config)?;
    assert_eq!(controller.config(), &Config::load_or_create(&config_path)?);
    Ok(())
}

/// Test a run driven from synchronous code
#[test]
fn test_controller_translateJob_fromBlockingContext_shouldComplete() -> Result<()> {
    let controller = Controller::with_config(mock_config())?;
    let job = Controller::parse_job(r#"{"texts": ["a", ""], "target": "es"}"#)?;

    let result = tokio_test::block_on(controller.translate_job(job));

    assert!(result.success);
    assert_eq!(result.translations, vec!["[es] a", ""]);
    Ok(())
}

/// Test job parsing directly
#[test]
fn test_controller_parseJob_withMissingTarget_shouldLeaveTargetEmpty() -> Result<()> {
    let job = Controller::parse_job(r#"{"texts": ["a"]}"#)?;
    assert_eq!(job.target, None);
    assert_eq!(job.len(), 1);
    Ok(())
}
