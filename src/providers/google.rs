use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::validate_target_language;
use crate::providers::TranslationBackend;

/// Keyless endpoint used by the Google Translate web widgets
pub const PUBLIC_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Cloud Translation v2 endpoint
pub const CLOUD_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Which Google API the client talks to
#[derive(Debug, Clone, PartialEq)]
pub enum GoogleMode {
    /// Keyless endpoint, one text per request
    Public,
    /// Cloud Translation v2, whole batches per request
    Cloud {
        /// API key sent as the `key` query parameter
        api_key: String,
    },
}

/// Google Translate client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client, shared by every job
    client: Client,
    /// API flavour
    mode: GoogleMode,
    /// Base URL of the API
    endpoint: String,
    /// Source language sent with every request (`auto` to detect)
    source_language: String,
}

/// Cloud Translation v2 request body
#[derive(Debug, Serialize)]
struct CloudRequest<'a> {
    /// Texts to translate
    q: &'a [String],
    /// Target language
    target: &'a str,
    /// Source language, omitted to let Google detect it
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    /// Input format
    format: &'static str,
}

/// Cloud Translation v2 response body
#[derive(Debug, Deserialize)]
struct CloudResponse {
    data: CloudData,
}

#[derive(Debug, Deserialize)]
struct CloudData {
    translations: Vec<CloudTranslation>,
}

#[derive(Debug, Deserialize)]
struct CloudTranslation {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl GoogleTranslate {
    /// Create a new Google client
    ///
    /// An empty `endpoint` selects the default endpoint for the mode.
    pub fn new(
        mode: GoogleMode,
        endpoint: impl Into<String>,
        source_language: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            match mode {
                GoogleMode::Public => PUBLIC_ENDPOINT.to_string(),
                GoogleMode::Cloud { .. } => CLOUD_ENDPOINT.to_string(),
            }
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        Self {
            client: Client::builder()
                .timeout(timeout)
                .pool_idle_timeout(Duration::from_secs(90))
                .user_agent("Mozilla/5.0 (compatible; tuberlate)")
                .build()
                .unwrap_or_default(),
            mode,
            endpoint,
            source_language: source_language.into(),
        }
    }

    /// The API flavour this client uses
    pub fn mode(&self) -> &GoogleMode {
        &self.mode
    }

    /// Build the keyless request URL for one text
    pub fn public_url(&self, text: &str, target: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }

    /// Translate one text through the keyless endpoint
    async fn translate_public(&self, text: &str, target: &str) -> Result<String, ProviderError> {
        let url = self.public_url(text, target)?;
        let response = self.client.get(url).send().await?;
        let body = Self::read_body(response).await?;
        parse_public_response(&body)
    }

    /// Translate a whole batch through Cloud Translation v2
    async fn translate_cloud(
        &self,
        api_key: &str,
        texts: &[String],
        target: &str,
    ) -> Result<Vec<Option<String>>, ProviderError> {
        let url = Url::parse_with_params(&self.endpoint, &[("key", api_key)])
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))?;

        let source = match self.source_language.as_str() {
            "" | "auto" => None,
            source => Some(source),
        };
        let request = CloudRequest {
            q: texts,
            target,
            source,
            format: "text",
        };

        let response = self.client.post(url).json(&request).send().await?;
        let body = Self::read_body(response).await?;
        parse_cloud_response(&body)
    }

    /// Read the response body, mapping non-success statuses to errors
    async fn read_body(response: reqwest::Response) -> Result<String, ProviderError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        error!("Google Translate API error ({}): {}", status, truncate(&body, 200));
        Err(status_error(status, &body))
    }
}

/// Map a non-success HTTP status to the matching provider error
pub fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = truncate(body, 200);
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    }
}

/// Extract `data.translations[].translatedText` from a Cloud Translation v2 body
///
/// A null `translatedText` yields `None` at that position.
pub fn parse_cloud_response(body: &str) -> Result<Vec<Option<String>>, ProviderError> {
    let parsed: CloudResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Unexpected Cloud Translation response: {}", e)))?;

    Ok(parsed
        .data
        .translations
        .into_iter()
        .map(|t| t.translated_text)
        .collect())
}

/// The only value of a single-text Cloud answer
fn single_value(translations: Vec<Option<String>>) -> Result<String, ProviderError> {
    if translations.len() != 1 {
        return Err(ProviderError::CountMismatch {
            expected: 1,
            actual: translations.len(),
        });
    }
    translations
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| ProviderError::ParseError("Translation was null".to_string()))
}

/// Extract the translation from a keyless endpoint response
///
/// The body is a nested array whose first element lists sentence nodes; the
/// translated text is the concatenation of the first string of every node.
pub fn parse_public_response(body: &str) -> Result<String, ProviderError> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Response is not JSON: {}", e)))?;

    let sentences = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProviderError::ParseError("Missing sentence list".to_string()))?;

    let mut translated = String::new();
    for sentence in sentences {
        if let Some(segment) = sentence.get(0).and_then(|s| s.as_str()) {
            translated.push_str(segment);
        }
    }

    if translated.is_empty() {
        return Err(ProviderError::ParseError("Response contained no translated text".to_string()));
    }

    Ok(translated)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    fn name(&self) -> &str {
        match self.mode {
            GoogleMode::Public => "google",
            GoogleMode::Cloud { .. } => "google_cloud",
        }
    }

    async fn prepare(&self, target: &str) -> Result<(), ProviderError> {
        if let GoogleMode::Cloud { api_key } = &self.mode {
            if api_key.trim().is_empty() {
                return Err(ProviderError::AuthenticationError(
                    "Cloud Translation requires an API key".to_string(),
                ));
            }
        }

        validate_target_language(target)
            .map_err(|_| ProviderError::UnsupportedLanguage(target.to_string()))
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        target: &str,
    ) -> Result<Vec<Option<String>>, ProviderError> {
        let translations = match &self.mode {
            GoogleMode::Cloud { api_key } => self.translate_cloud(api_key, texts, target).await?,
            GoogleMode::Public => {
                // The keyless endpoint has no batch form; any failure fails the batch.
                // The pipeline then retries every text of the batch on its own, so texts
                // translated here before the failure are requested twice.
                let mut translations = Vec::with_capacity(texts.len());
                for text in texts {
                    if text.is_empty() {
                        translations.push(Some(String::new()));
                        continue;
                    }
                    translations.push(Some(self.translate_public(text, target).await?));
                }
                translations
            }
        };

        if translations.len() != texts.len() {
            return Err(ProviderError::CountMismatch {
                expected: texts.len(),
                actual: translations.len(),
            });
        }

        debug!("{} translated batch of {} into {}", self.name(), texts.len(), target);
        Ok(translations)
    }

    async fn translate_one(&self, text: &str, target: &str) -> Result<String, ProviderError> {
        match &self.mode {
            GoogleMode::Public => self.translate_public(text, target).await,
            GoogleMode::Cloud { api_key } => {
                let texts = [text.to_string()];
                single_value(self.translate_cloud(api_key, &texts, target).await?)
            }
        }
    }
}
