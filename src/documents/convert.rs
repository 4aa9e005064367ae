use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::reader::{read_docx_paragraphs, read_pdf_pages};
use super::writer::{write_docx_paragraphs, write_pdf, write_text};
use super::{DocError, DocFormat};

/// 支持的转换方向。其余组合一律视为不支持。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Conversion {
    DocxToPdf,
    PdfToText,
    PdfToDocx,
}

impl Conversion {
    pub const ALL: [Conversion; 3] = [
        Conversion::DocxToPdf,
        Conversion::PdfToText,
        Conversion::PdfToDocx,
    ];

    pub fn between(from: DocFormat, to: DocFormat) -> Result<Self, DocError> {
        match (from, to) {
            (DocFormat::Docx, DocFormat::Pdf) => Ok(Conversion::DocxToPdf),
            (DocFormat::Pdf, DocFormat::Text) => Ok(Conversion::PdfToText),
            (DocFormat::Pdf, DocFormat::Docx) => Ok(Conversion::PdfToDocx),
            _ => Err(DocError::UnsupportedConversion {
                from: from.label().to_string(),
                to: to.label().to_string(),
            }),
        }
    }

    pub fn source(self) -> DocFormat {
        match self {
            Conversion::DocxToPdf => DocFormat::Docx,
            Conversion::PdfToText | Conversion::PdfToDocx => DocFormat::Pdf,
        }
    }

    pub fn target(self) -> DocFormat {
        match self {
            Conversion::DocxToPdf => DocFormat::Pdf,
            Conversion::PdfToText => DocFormat::Text,
            Conversion::PdfToDocx => DocFormat::Docx,
        }
    }

    /// 界面展示用的名称，如 "DOCX to PDF"
    pub fn label(self) -> String {
        format!("{} to {}", self.source().label(), self.target().label())
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Conversion {
    type Err = DocError;

    /// 接受 "DOCX to PDF"、"docx-to-pdf"、"pdf2txt" 等写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let parts: Option<(&str, &str)> = [" to ", "-to-", "_to_", "2", "->"]
            .iter()
            .find_map(|sep| lower.split_once(sep));
        let Some((from, to)) = parts else {
            return Err(DocError::UnsupportedConversion {
                from: s.trim().to_string(),
                to: String::new(),
            });
        };
        let unsupported = || DocError::UnsupportedConversion {
            from: from.trim().to_ascii_uppercase(),
            to: to.trim().to_ascii_uppercase(),
        };
        let from = DocFormat::from_extension(from.trim()).ok_or_else(unsupported)?;
        let to = DocFormat::from_extension(to.trim()).ok_or_else(unsupported)?;
        Conversion::between(from, to)
    }
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

/// 按转换类型读取源文件并写出目标格式。只保留文本，格式与图片丢失。
pub fn convert(input: &Path, output: &Path, conversion: Conversion) -> Result<PathBuf, DocError> {
    log::info!(
        "[documents] convert {} -> {} ({conversion})",
        input.display(),
        output.display()
    );
    match conversion {
        Conversion::DocxToPdf => {
            let content = read_docx_paragraphs(input)?.join("\n");
            write_pdf(&content, output)
        }
        Conversion::PdfToText => {
            let content = read_pdf_pages(input)?.join("\n");
            write_text(&content, output)
        }
        Conversion::PdfToDocx => {
            let pages = read_pdf_pages(input)?;
            write_docx_paragraphs(&pages, output)
        }
    }
}

/// 由输入、输出扩展名推断转换方向；不支持的组合在读写任何文件之前被拒绝
pub fn convert_file(input: &Path, output: &Path) -> Result<PathBuf, DocError> {
    let conversion = Conversion::between(DocFormat::from_path(input)?, DocFormat::from_path(output)?)?;
    convert(input, output, conversion)
}
