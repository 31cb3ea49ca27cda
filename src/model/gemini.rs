//! Gemini implementation of the correction model
//!
//! API documentation: <https://ai.google.dev/api/generate-content>

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use crate::{
    model::{CorrectionModel, CorrectionResponse, SYSTEM_INSTRUCTIONS},
    protocol::ModelError,
};

const PROVIDER: &str = "Gemini";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini model client using reqwest
///
/// Requests structured JSON output matching [`CorrectionResponse`]. The API
/// key is sent as given and only checked by the provider on first use.
#[derive(Clone, Debug)]
pub struct GeminiModel {
    client: reqwest::Client,
    base_url: Url,
    model_name: String,
    api_key: String,
}

impl GeminiModel {
    /// Create a client for `model_name` against the public Gemini endpoint
    pub fn new(model_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: default_base_url(),
            model_name: model_name.into(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different API base
    ///
    /// The base is treated as a directory whether or not it ends in `/`.
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    fn endpoint(&self) -> Result<Url, ModelError> {
        self.base_url
            .join(&format!("models/{}:generateContent", self.model_name))
            .map_err(|err| ModelError::Transport(format!("Invalid model endpoint: {}", err)))
    }

    /// Build the `generateContent` request body for `text`
    fn build_payload(text: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{"text": SYSTEM_INSTRUCTIONS}]
            },
            "contents": [{
                "role": "user",
                "parts": [{"text": text}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "correctedText": {"type": "STRING"},
                        "explanation": {"type": "STRING"}
                    },
                    "required": ["correctedText", "explanation"]
                }
            }
        })
    }

    /// Pull the structured answer out of a `generateContent` response
    fn parse_response(body: &Value) -> Result<CorrectionResponse, ModelError> {
        if let Some(error) = body.get("error") {
            return Err(provider_error(format!("API error: {}", error)));
        }

        let candidate = body
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|candidates| candidates.first())
            .ok_or_else(|| provider_error("Missing or empty 'candidates' in response"))?;

        let text = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
            .and_then(|parts| parts.iter().find_map(|part| part.get("text")?.as_str()))
            .ok_or_else(|| provider_error("Missing text part in first candidate"))?;

        Ok(serde_json::from_str(text)?)
    }
}

/// The public Gemini API base
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default Gemini base URL is valid")
}

fn provider_error(message: impl Into<String>) -> ModelError {
    ModelError::Provider {
        provider: PROVIDER.to_string(),
        message: message.into(),
    }
}

#[async_trait]
impl CorrectionModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn correct(&self, text: &str) -> Result<CorrectionResponse, ModelError> {
        let response = self
            .client
            .post(self.endpoint()?)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_payload(text))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(provider_error(format!("HTTP {}: {}", status, body)));
        }

        let body: Value = response.json().await?;
        Self::parse_response(&body)
    }
}
