//! 内容生成：把格式化后的提示词发给托管的 chat-completion 接口。

mod client;
mod types;

pub use client::HfClient;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::prompt::PromptRequest;

// ---------------------------------------------------------------------------
// 错误类型
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum GenerationError {
    /// 未配置 API key，未发出任何请求
    MissingApiKey,
    Timeout,
    /// 连接失败、TLS 等传输层错误
    Request(String),
    /// 服务端返回非 2xx
    Http { status: u16, message: String },
    /// 响应中没有任何文本
    EmptyResponse,
    /// 响应体不是预期的 JSON
    Decode(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingApiKey => {
                f.write_str("No API key configured (set DOCAGENT_API_KEY or HF_TOKEN)")
            }
            GenerationError::Timeout => f.write_str("The request timed out, try again later"),
            GenerationError::Request(msg) => write!(f, "Request failed: {msg}"),
            GenerationError::Http { status, message } => write!(f, "HTTP {status}: {message}"),
            GenerationError::EmptyResponse => f.write_str("The model returned no content"),
            GenerationError::Decode(msg) => write!(f, "Could not decode response: {msg}"),
        }
    }
}

impl std::error::Error for GenerationError {}

// ---------------------------------------------------------------------------
// 后端抽象
// ---------------------------------------------------------------------------

/// 发出一次补全请求，阻塞直到返回文本或错误
pub trait CompletionBackend {
    fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;
}

/// 格式化提示词并调用一次后端；不重试
pub fn generate<B: CompletionBackend + ?Sized>(
    backend: &B,
    request: &PromptRequest,
    max_tokens: u32,
) -> Result<String, GenerationError> {
    let formatted = request.format();
    log::info!(
        "[generation] tone={} prompt_chars={} max_tokens={max_tokens}",
        request.tone(),
        request.prompt().chars().count()
    );
    let text = backend.complete(&formatted, max_tokens)?;
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}
