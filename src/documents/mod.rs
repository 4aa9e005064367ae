//! 文档读写与格式转换：TXT / DOCX / PDF 三种格式之间的纯文本互通。

mod convert;
mod pdf;
mod reader;
mod writer;

#[cfg(test)]
mod tests_convert;
#[cfg(test)]
mod tests_read_write;

pub use convert::*;
pub use reader::*;
pub use writer::*;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 错误类型
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum DocError {
    /// 源文件不存在
    NotFound(String),
    /// 权限不足或类型不符（如目标路径是目录）
    NotAllowed(String),
    /// 扩展名不是 txt / docx / pdf
    UnsupportedFileType(String),
    /// 不支持的转换方向，例如 TXT → PDF
    UnsupportedConversion { from: String, to: String },
    /// DOCX 结构解析或打包失败
    Docx(String),
    /// PDF 文本提取或生成失败
    Pdf(String),
    /// 其它 I/O 错误
    Io(String),
}

impl From<std::io::Error> for DocError {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match e.kind() {
            ErrorKind::NotFound => DocError::NotFound(e.to_string()),
            ErrorKind::PermissionDenied => DocError::NotAllowed(e.to_string()),
            _ => DocError::Io(e.to_string()),
        }
    }
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::NotFound(msg) => write!(f, "File not found: {msg}"),
            DocError::NotAllowed(msg) => write!(f, "Access denied: {msg}"),
            DocError::UnsupportedFileType(ext) => {
                if ext.is_empty() {
                    write!(f, "Unsupported file type (no extension)")
                } else {
                    write!(f, "Unsupported file type: .{ext}")
                }
            }
            DocError::UnsupportedConversion { from, to } => {
                write!(f, "Unsupported conversion: {from} to {to}")
            }
            DocError::Docx(msg) => write!(f, "DOCX error: {msg}"),
            DocError::Pdf(msg) => write!(f, "PDF error: {msg}"),
            DocError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DocError {}

// ---------------------------------------------------------------------------
// 文档格式
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    Text,
    Docx,
    Pdf,
}

impl DocFormat {
    /// 按扩展名（不区分大小写）识别格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" => Some(DocFormat::Text),
            "docx" => Some(DocFormat::Docx),
            "pdf" => Some(DocFormat::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DocError> {
        let ext = get_extension(path);
        Self::from_extension(&ext).ok_or(DocError::UnsupportedFileType(ext))
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocFormat::Text => "txt",
            DocFormat::Docx => "docx",
            DocFormat::Pdf => "pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocFormat::Text => "TXT",
            DocFormat::Docx => "DOCX",
            DocFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DocFormat {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| DocError::UnsupportedFileType(s.to_ascii_lowercase()))
    }
}

/// 小写扩展名，无扩展名时为空串
pub(crate) fn get_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
