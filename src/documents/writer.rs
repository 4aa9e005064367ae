use std::fs;
use std::path::{Path, PathBuf};

use docx_rs::{BreakType, Docx, Paragraph, Run};

use super::pdf::render_pdf;
use super::{DocError, DocFormat};

// ---------------------------------------------------------------------------
// 公共：目标路径准备
// ---------------------------------------------------------------------------

/// 目标不能是目录；父目录不存在时自动创建。已存在的文件会被覆盖。
fn prepare_destination(path: &Path) -> Result<(), DocError> {
    if path.is_dir() {
        return Err(DocError::NotAllowed(format!(
            "{} is a directory",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(DocError::from)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// write_document：按格式分派
// ---------------------------------------------------------------------------

pub fn write_document(content: &str, path: &Path, format: DocFormat) -> Result<PathBuf, DocError> {
    match format {
        DocFormat::Text => write_text(content, path),
        DocFormat::Docx => write_docx(content, path),
        DocFormat::Pdf => write_pdf(content, path),
    }
}

pub fn write_text(content: &str, path: &Path) -> Result<PathBuf, DocError> {
    prepare_destination(path)?;
    fs::write(path, content).map_err(DocError::from)?;
    log::info!("[documents] wrote {} bytes of text to {}", content.len(), path.display());
    Ok(path.to_path_buf())
}

// ---------------------------------------------------------------------------
// DOCX
// ---------------------------------------------------------------------------

/// 单段落文档：换行写成段内换行（w:br），制表符写成 w:tab，不拆分段落
pub fn write_docx(content: &str, path: &Path) -> Result<PathBuf, DocError> {
    write_docx_paragraphs(&[content], path)
}

/// 每个元素一个段落
pub fn write_docx_paragraphs<S: AsRef<str>>(paragraphs: &[S], path: &Path) -> Result<PathBuf, DocError> {
    prepare_destination(path)?;
    let docx = paragraphs
        .iter()
        .fold(Docx::new(), |docx, text| docx.add_paragraph(build_paragraph(text.as_ref())));

    let file = fs::File::create(path).map_err(DocError::from)?;
    docx.build()
        .pack(file)
        .map_err(|e| DocError::Docx(format!("failed to write DOCX: {e}")))?;
    log::info!(
        "[documents] wrote {} paragraph(s) to {}",
        paragraphs.len(),
        path.display()
    );
    Ok(path.to_path_buf())
}

/// XML 1.0 不允许的字符（除 \t \n \r 外的 C0 控制符、U+FFFE、U+FFFF）
fn is_xml_illegal(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{B}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

/// 换行与 `\r` 写成段内换行，换页符写成分页，制表符写成 w:tab，
/// 其它 XML 非法字符替换为 `?`
fn build_paragraph(text: &str) -> Paragraph {
    let normalized = text.replace("\r\n", "\n");
    let mut run = Run::new();
    let mut segment = String::new();
    for ch in normalized.chars() {
        let mark = match ch {
            '\n' | '\r' => Some(Some(BreakType::TextWrapping)),
            '\u{C}' => Some(Some(BreakType::Page)),
            '\t' => Some(None),
            _ => None,
        };
        let Some(mark) = mark else {
            segment.push(if is_xml_illegal(ch) { '?' } else { ch });
            continue;
        };
        if !segment.is_empty() {
            run = run.add_text(std::mem::take(&mut segment));
        }
        run = match mark {
            Some(kind) => run.add_break(kind),
            None => run.add_tab(),
        };
    }
    if !segment.is_empty() {
        run = run.add_text(segment);
    }
    Paragraph::new().add_run(run)
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// 无法编码的字符替换为 `?`，不会因编码失败而中止
pub fn write_pdf(content: &str, path: &Path) -> Result<PathBuf, DocError> {
    prepare_destination(path)?;
    let bytes = render_pdf(content)?;
    fs::write(path, &bytes).map_err(DocError::from)?;
    log::info!("[documents] wrote {} bytes of PDF to {}", bytes.len(), path.display());
    Ok(path.to_path_buf())
}
