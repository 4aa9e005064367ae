//! 最小 PDF 生成：Courier 等宽字体 + WinAnsi 编码，自动换行、自动分页。

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::DocError;

const MM: f32 = 72.0 / 25.4;

// A4
const PAGE_WIDTH: f32 = 210.0 * MM;
const PAGE_HEIGHT: f32 = 297.0 * MM;

const MARGIN_SIDE: f32 = 10.0 * MM;
const MARGIN_TOP: f32 = 10.0 * MM;
/// 自动分页的底边距
const MARGIN_BOTTOM: f32 = 15.0 * MM;
const LINE_HEIGHT: f32 = 10.0 * MM;

const FONT_NAME: &str = "Courier";
const FONT_SIZE: f32 = 12.0;
/// Courier 所有字形宽度均为 600/1000 em
const GLYPH_WIDTH: f32 = FONT_SIZE * 0.6;

const TAB_SPACES: &str = "    ";
const REPLACEMENT: u8 = b'?';

/// 每行可容纳的字符数
pub(super) fn chars_per_line() -> usize {
    ((PAGE_WIDTH - 2.0 * MARGIN_SIDE) / GLYPH_WIDTH).floor() as usize
}

/// 每页可容纳的行数
pub(super) fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / LINE_HEIGHT).floor() as usize
}

/// 把字符映射为 WinAnsi 单字节；Latin-1 之外的字符与 C1 控制字符替换为 `?`
pub(super) fn encode_latin1_lossy(line: &str) -> Vec<u8> {
    line.chars()
        .map(|ch| match ch as u32 {
            0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
            _ => REPLACEMENT,
        })
        .collect()
}

/// 按空格断词贪心折行；超长单词硬切。原文中的换行保留为独立行，空行保留。
pub(super) fn wrap_text(content: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in content.replace("\r\n", "\n").split('\n') {
        let raw = raw.replace('\r', "").replace('\t', TAB_SPACES);
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in raw.split(' ').filter(|w| !w.is_empty()) {
            let mut word: Vec<char> = word.chars().collect();
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed <= width {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(word.iter());
                current_len += word.len();
                continue;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            while word.len() > width {
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            current_len = word.len();
            current = word.into_iter().collect();
        }
        lines.push(current);
    }
    lines
}

/// 生成 PDF 字节。空内容也会产出一个空白页。
pub(super) fn render_pdf(content: &str) -> Result<Vec<u8>, DocError> {
    let lines = wrap_text(content, chars_per_line());
    let per_page = lines_per_page();
    let mut pages: Vec<&[String]> = lines.chunks(per_page).collect();
    if pages.is_empty() {
        pages.push(&[]);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FONT_NAME,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page_lines in &pages {
        let page_id = add_page(&mut doc, pages_id, page_lines)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| DocError::Pdf(format!("failed to write PDF: {e}")))?;
    Ok(out)
}

fn add_page(doc: &mut Document, pages_id: ObjectId, lines: &[String]) -> Result<ObjectId, DocError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
    ];
    // 基线放在行框的中部，与行高 10mm 的单元格对齐
    let first_baseline = PAGE_HEIGHT - MARGIN_TOP - (LINE_HEIGHT + FONT_SIZE * 0.7) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            operations.push(Operation::new(
                "Td",
                vec![MARGIN_SIDE.into(), first_baseline.into()],
            ));
        } else {
            operations.push(Operation::new("Td", vec![0.into(), (-LINE_HEIGHT).into()]));
        }
        if !line.is_empty() {
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_latin1_lossy(line))],
            ));
        }
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| DocError::Pdf(format!("failed to encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}
