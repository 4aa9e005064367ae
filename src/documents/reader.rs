use std::fs;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use zip::ZipArchive;

use super::{DocError, DocFormat};

const DOCX_BODY_ENTRY: &str = "word/document.xml";

// ---------------------------------------------------------------------------
// read_document：按扩展名分派
// ---------------------------------------------------------------------------

/// 读取 TXT / DOCX / PDF 的文本内容，其它扩展名返回 `UnsupportedFileType`
pub fn read_document(path: &Path) -> Result<String, DocError> {
    let format = DocFormat::from_path(path)?;
    read_as(path, format)
}

/// 忽略扩展名，按指定格式读取（转换时由转换类型决定源格式）
pub fn read_as(path: &Path, format: DocFormat) -> Result<String, DocError> {
    log::debug!("[documents] read {} as {format}", path.display());
    match format {
        DocFormat::Text => read_text(path),
        DocFormat::Docx => Ok(read_docx_paragraphs(path)?.join("\n")),
        DocFormat::Pdf => Ok(read_pdf_pages(path)?.join("\n")),
    }
}

pub fn read_text(path: &Path) -> Result<String, DocError> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!(
                "[documents] {} is not valid UTF-8, invalid sequences replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

// ---------------------------------------------------------------------------
// DOCX：解压 word/document.xml，逐段收集 w:t 文本
// ---------------------------------------------------------------------------

/// 按文档顺序返回每个段落（`w:p`）的文本。
/// 段内 `w:br` / `w:cr` 记为换行，`w:tab` 记为制表符。
pub fn read_docx_paragraphs(path: &Path) -> Result<Vec<String>, DocError> {
    let file = fs::File::open(path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| DocError::Docx(format!("not a valid DOCX archive: {e}")))?;
    let mut entry = archive
        .by_name(DOCX_BODY_ENTRY)
        .map_err(|e| DocError::Docx(format!("missing {DOCX_BODY_ENTRY}: {e}")))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| DocError::Docx(format!("failed to read {DOCX_BODY_ENTRY}: {e}")))?;
    parse_document_xml(&bytes)
}

/// 段落属性（含制表位定义）与 `mc:Fallback` 里的重复文本框都不计入正文
fn is_skipped_element(name: &[u8]) -> bool {
    matches!(name, b"w:pPr" | b"mc:Fallback")
}

/// 正在收集的段落；嵌套段落（文本框）在外层段落之后输出
#[derive(Default)]
struct OpenParagraph {
    text: String,
    nested: Vec<String>,
}

pub(super) fn parse_document_xml(xml: &[u8]) -> Result<Vec<String>, DocError> {
    let mut reader = XmlReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut in_text = false;
    let mut skip_depth = 0usize;

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| DocError::Docx(format!("malformed document XML: {err}")))?;
        if skip_depth > 0 {
            match &event {
                Event::Start(e) if is_skipped_element(e.name().as_ref()) => skip_depth += 1,
                Event::End(e) if is_skipped_element(e.name().as_ref()) => skip_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(OpenParagraph::default()),
                b"w:t" => in_text = true,
                name if is_skipped_element(name) => skip_depth = 1,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(done) = open.pop() {
                        let target = match open.last_mut() {
                            Some(outer) => &mut outer.nested,
                            None => &mut paragraphs,
                        };
                        target.push(done.text);
                        target.extend(done.nested);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => {
                let ch = match e.name().as_ref() {
                    b"w:p" => {
                        match open.last_mut() {
                            Some(outer) => outer.nested.push(String::new()),
                            None => paragraphs.push(String::new()),
                        }
                        None
                    }
                    b"w:br" | b"w:cr" => Some('\n'),
                    b"w:tab" => Some('\t'),
                    _ => None,
                };
                if let (Some(ch), Some(current)) = (ch, open.last_mut()) {
                    current.text.push(ch);
                }
            }
            Event::Text(text) if in_text => {
                let value = text
                    .unescape()
                    .map_err(|e| DocError::Docx(format!("malformed document XML: {e}")))?;
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

// ---------------------------------------------------------------------------
// PDF：逐页提取文本
// ---------------------------------------------------------------------------

pub fn read_pdf_pages(path: &Path) -> Result<Vec<String>, DocError> {
    let bytes = fs::read(path)?;
    pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|e| DocError::Pdf(format!("failed to extract PDF text: {e}")))
}
