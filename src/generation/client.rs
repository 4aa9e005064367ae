use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::types::{extract_error_message, ChatRequest, ChatResponse};
use super::{CompletionBackend, GenerationError};
use crate::config::AppConfig;

const COMPLETIONS_PATH: &str = "/chat/completions";

/// 托管推理接口客户端。由 [`AppConfig`] 构造，生命周期跟随会话。
#[derive(Debug, Clone)]
pub struct HfClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl HfClient {
    pub fn new(config: &AppConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GenerationError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: format!("{}{COMPLETIONS_PATH}", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionBackend for HfClient {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;
        let body = ChatRequest::single_user(&self.model, prompt, max_tokens);

        log::debug!("[generation] POST {} model={}", self.endpoint, self.model);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::Request(format!("failed to read response body: {e}"))
            }
        })?;

        if !status.is_success() {
            log::warn!("[generation] endpoint returned HTTP {}", status.as_u16());
            return Err(http_error(status, &text));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| GenerationError::Decode(e.to_string()))?;
        parsed.into_text().ok_or(GenerationError::EmptyResponse)
    }
}

fn http_error(status: StatusCode, body: &str) -> GenerationError {
    let detail = extract_error_message(body);
    let message = match status.as_u16() {
        401 => "Invalid or expired API key (401)".to_string(),
        403 => "Access to this model is forbidden (403)".to_string(),
        404 => "Model or endpoint not found (404)".to_string(),
        429 => "Rate limited (429), try again later".to_string(),
        _ => status.canonical_reason().unwrap_or("").to_string(),
    };
    let message = match detail {
        Some(detail) if message.is_empty() => detail,
        Some(detail) => format!("{message}: {detail}"),
        None => message,
    };
    GenerationError::Http {
        status: status.as_u16(),
        message,
    }
}
