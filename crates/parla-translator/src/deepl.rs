use std::time::Duration;

use async_trait::async_trait;
use parla_types::TranslationRequest;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Source code meaning "let the provider detect it"
const AUTO: &str = "AUTO";

#[derive(Clone)]
pub struct DeeplTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeeplTranslator {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }
}

#[async_trait]
impl Translator for DeeplTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let params = form_params(request);
        tracing::debug!(
            "DeepL request: {} chars, {} -> {}",
            request.text.chars().count(),
            request.source.as_deref().unwrap_or("detect"),
            request.target
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let (text, detected_source) = parse_translation(&body)?;

        Ok(Translation {
            text,
            detected_source,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
        }
    }
}

/// Form fields of a `/v2/translate` call; `source_lang` is omitted for detection
fn form_params(request: &TranslationRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("text", request.text.clone()),
        ("target_lang", request.target.to_uppercase()),
    ];

    if let Some(source) = request.source.as_deref() {
        let source = source.to_uppercase();
        if source != AUTO {
            params.push(("source_lang", source));
        }
    }

    params
}

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeeplErrorBody {
    message: Option<String>,
}

fn parse_translation(body: &str) -> Result<(String, Option<String>), TranslateError> {
    let response: DeeplResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

    let first = response
        .translations
        .into_iter()
        .next()
        .ok_or_else(|| TranslateError::MalformedResponse("No translation in response".to_string()))?;

    let detected = first
        .detected_source_language
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty());

    Ok((first.text, detected))
}

fn status_error(status: StatusCode, body: &str) -> TranslateError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => TranslateError::RateLimitExceeded,
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => TranslateError::AuthenticationError,
        _ => {
            let message = serde_json::from_str::<DeeplErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "no message".to_string());
            TranslateError::ApiError(format!("HTTP {}: {}", status, message))
        }
    }
}
