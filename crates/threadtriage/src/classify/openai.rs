use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value, json};

use super::{ExtractionRequest, ExtractionService};

/// Blocking chat-completions client. The reply's
/// `choices[0].message.content` is expected to itself be a JSON object.
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl ExtractionService for OpenAiClient {
    fn extract(&self, request: &ExtractionRequest) -> Result<Value> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_payload},
            ],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .context("failed to send chat completion request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            bail!("chat completion endpoint returned {status}: {body}");
        }

        let reply = response
            .json::<Value>()
            .context("chat completion response must be valid JSON")?;
        Ok(extract_reply_content(&reply))
    }
}

/// Unwraps the structured extraction from a chat-completions reply. Missing
/// choices, empty content, and non-JSON content all read as an empty object,
/// which the retry loop counts as a failed attempt.
#[must_use]
pub fn extract_reply_content(reply: &Value) -> Value {
    let content = reply
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or("");
    if content.is_empty() {
        return Value::Object(Map::new());
    }

    serde_json::from_str(content).unwrap_or_else(|_| Value::Object(Map::new()))
}
