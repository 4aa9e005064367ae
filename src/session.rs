//! 当前会话持有的内容：由生成或上传文件产生，直到保存或被新内容替换。
//! 操作失败时保留原有内容不变。

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_TOKENS;
use crate::documents::{read_document, write_document, DocError, DocFormat};
use crate::generation::{generate, CompletionBackend, GenerationError};
use crate::prompt::{PromptError, PromptForm, PromptRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "camelCase")]
pub enum ContentOrigin {
    Generated,
    File(PathBuf),
}

/// 不可变的文本内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    text: String,
    origin: ContentOrigin,
}

impl Content {
    pub fn generated(text: String) -> Self {
        Self { text, origin: ContentOrigin::Generated }
    }

    pub fn from_file(text: String, path: &Path) -> Self {
        Self { text, origin: ContentOrigin::File(path.to_path_buf()) }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &ContentOrigin {
        &self.origin
    }
}

// ---------------------------------------------------------------------------
// 错误类型
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "error")]
pub enum SessionError {
    Prompt(PromptError),
    Generation(GenerationError),
    Document(DocError),
    /// 尚未生成或上传任何内容
    NoContent,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Prompt(e) => e.fmt(f),
            SessionError::Generation(e) => write!(f, "Error generating content: {e}"),
            SessionError::Document(e) => e.fmt(f),
            SessionError::NoContent => f.write_str("No content to save."),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Prompt(e) => Some(e),
            SessionError::Generation(e) => Some(e),
            SessionError::Document(e) => Some(e),
            SessionError::NoContent => None,
        }
    }
}

impl From<PromptError> for SessionError {
    fn from(e: PromptError) -> Self {
        SessionError::Prompt(e)
    }
}

impl From<GenerationError> for SessionError {
    fn from(e: GenerationError) -> Self {
        SessionError::Generation(e)
    }
}

impl From<DocError> for SessionError {
    fn from(e: DocError) -> Self {
        SessionError::Document(e)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session<B> {
    backend: B,
    max_tokens: u32,
    content: Option<Content>,
}

impl<B: CompletionBackend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_tokens: DEFAULT_MAX_TOKENS,
            content: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// 替换持有的内容（例如桌面端在后台线程生成后写回）
    pub fn replace(&mut self, content: Content) -> &Content {
        self.content.insert(content)
    }

    pub fn generate(&mut self, request: &PromptRequest) -> Result<&Content, SessionError> {
        let text = generate(&self.backend, request, self.max_tokens)?;
        log::info!("[session] generated {} chars", text.chars().count());
        Ok(self.replace(Content::generated(text)))
    }

    /// 校验表单后生成；校验失败时不会调用后端
    pub fn generate_form(&mut self, form: &PromptForm) -> Result<&Content, SessionError> {
        let request = form.validate()?;
        self.generate(&request)
    }

    /// 校验表单并取出一次生成所需的全部状态，之后可在锁外执行。
    /// 校验失败时不会调用后端
    pub fn prepare_generation(&self, form: &PromptForm) -> Result<PendingGeneration<B>, SessionError>
    where
        B: Clone,
    {
        Ok(PendingGeneration {
            backend: self.backend.clone(),
            request: form.validate()?,
            max_tokens: self.max_tokens,
        })
    }

    /// 上传文件：读取文本并替换持有的内容
    pub fn upload(&mut self, path: &Path) -> Result<&Content, SessionError> {
        let text = read_document(path)?;
        log::info!("[session] loaded {} chars from {}", text.chars().count(), path.display());
        Ok(self.replace(Content::from_file(text, path)))
    }

    /// 按目标扩展名保存持有的内容
    pub fn save(&self, path: &Path) -> Result<PathBuf, SessionError> {
        let content = self.content.as_ref().ok_or(SessionError::NoContent)?;
        let format = DocFormat::from_path(path)?;
        Ok(write_document(content.text(), path, format)?)
    }

    /// 生成并保存；目标格式在调用接口之前校验
    pub fn generate_and_save(
        &mut self,
        request: &PromptRequest,
        path: &Path,
    ) -> Result<PathBuf, SessionError> {
        DocFormat::from_path(path)?;
        self.generate(request)?;
        self.save(path)
    }
}

/// 已校验、尚未发送的生成请求，持有后端副本
pub struct PendingGeneration<B> {
    backend: B,
    request: PromptRequest,
    max_tokens: u32,
}

impl<B: CompletionBackend> PendingGeneration<B> {
    /// 阻塞直到拿到结果；得到的内容需要交给 [`Session::replace`] 才会生效
    pub fn run(self) -> Result<Content, SessionError> {
        let text = generate(&self.backend, &self.request, self.max_tokens)?;
        log::info!("[session] generated {} chars", text.chars().count());
        Ok(Content::generated(text))
    }
}
