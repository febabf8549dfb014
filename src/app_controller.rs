use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::Path;

use crate::app_config::Config;
use crate::translation::{TranslationJob, TranslationResult, TranslationService};

// @module: Application controller for translation jobs

/// Main application controller: reads jobs, runs them, renders results
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Pipeline built from the configuration
    service: TranslationService,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::from_config(&config.translation)
            .context("Failed to create translation service")?;

        info!(
            "Using {} ({} texts per batch)",
            config.translation.provider.display_name(),
            service.options().batch_size
        );

        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an already-built service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// The configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a job from a JSON file, or from stdin when no path is given
    pub fn read_job(&self, input: Option<&Path>) -> Result<TranslationJob> {
        let content = match input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job file: {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read job from stdin")?;
                buffer
            }
        };

        Self::parse_job(&content)
    }

    /// Parse a job from its JSON form
    pub fn parse_job(content: &str) -> Result<TranslationJob> {
        serde_json::from_str(content).context("Failed to parse translation job")
    }

    /// Run one job through the pipeline
    pub async fn translate_job(&self, job: TranslationJob) -> TranslationResult {
        debug!("Translating {} texts", job.len());
        self.service.translate(job).await
    }

    /// Run the main workflow: read the job, apply the target override, translate
    ///
    /// Returns the result as pretty-printed JSON.
    pub async fn run(&self, input: Option<&Path>, target: Option<&str>) -> Result<String> {
        let mut job = self.read_job(input)?;
        if let Some(target) = target {
            job.target = Some(target.to_string());
        }

        let result = self.translate_job(job).await;
        serde_json::to_string_pretty(&result).context("Failed to serialize translation result")
    }
}
