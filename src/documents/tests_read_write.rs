use super::{
    read_docx_paragraphs, read_document, read_pdf_pages, write_docx, write_docx_paragraphs,
    write_document, write_pdf, write_text, DocError, DocFormat,
};

// ---------------------------------------------------------------------------
// TXT
// ---------------------------------------------------------------------------

#[test]
fn text_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    let content = "第一行 héllo\n\tindented — ok\n\nlast line without newline";

    let written = write_text(content, &path).unwrap();
    assert_eq!(written, path);
    assert_eq!(read_document(&path).unwrap(), content);
}

#[test]
fn text_write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "old content that is longer").unwrap();

    write_text("new", &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
}

#[test]
fn write_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a/b/c/out.txt");
    write_text("x", &path).unwrap();
    assert!(path.exists());
}

#[test]
fn write_rejects_directory_destination() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("sub.txt");
    std::fs::create_dir(&target).unwrap();

    let result = write_text("x", &target);
    assert!(matches!(result, Err(DocError::NotAllowed(_))));
}

// ---------------------------------------------------------------------------
// DOCX
// ---------------------------------------------------------------------------

#[test]
fn docx_single_paragraph_keeps_newlines_inside() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.docx");
    let content = "Title line\nSecond line\twith tab";

    write_docx(content, &path).unwrap();
    let paragraphs = read_docx_paragraphs(&path).unwrap();
    assert_eq!(paragraphs, vec![content.to_string()]);
    assert_eq!(read_document(&path).unwrap(), content);
}

#[test]
fn docx_control_characters_never_reach_document_xml() {
    use std::io::Read;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rfc.docx");
    write_docx("page one\u{000C}page two\u{0007}bell\u{FFFF}", &path).unwrap();

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    let mut xml = Vec::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_end(&mut xml)
        .unwrap();
    assert!(
        xml.iter().all(|&b| b >= 0x20 || matches!(b, b'\t' | b'\n' | b'\r')),
        "document.xml contains a raw control byte"
    );
    assert!(String::from_utf8_lossy(&xml).contains(r#"w:type="page""#));

    assert_eq!(read_document(&path).unwrap(), "page one\npage two?bell?");
}

#[test]
fn docx_paragraphs_join_with_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("multi.docx");

    write_docx_paragraphs(&["A", "B", "C & <D>"], &path).unwrap();
    assert_eq!(read_document(&path).unwrap(), "A\nB\nC & <D>");
}

#[test]
fn docx_read_of_non_zip_fails_as_docx_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.docx");
    std::fs::write(&path, "plain text pretending").unwrap();

    let result = read_document(&path);
    assert!(matches!(result, Err(DocError::Docx(_))));
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

#[test]
fn pdf_text_is_extractable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    write_pdf("Hello PDF world", &path).unwrap();
    let text = read_document(&path).unwrap();
    assert!(text.contains("Hello PDF world"), "extracted: {text:?}");
}

#[test]
fn pdf_substitutes_unencodable_characters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unicode.pdf");

    write_pdf("smile 😀 arrow → café", &path).unwrap();
    let text = read_document(&path).unwrap();
    assert!(text.contains("smile ? arrow ? caf"), "extracted: {text:?}");
}

#[test]
fn pdf_long_content_spans_pages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.pdf");
    let content = (0..40).map(|i| format!("row{i:02}")).collect::<Vec<_>>().join("\n");

    write_pdf(&content, &path).unwrap();
    let pages = read_pdf_pages(&path).unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("row00"));
    assert!(pages[1].contains("row39"));
}

#[test]
fn pdf_read_of_garbage_fails_as_pdf_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, "not a pdf").unwrap();

    let result = read_document(&path);
    assert!(matches!(result, Err(DocError::Pdf(_))));
}

// ---------------------------------------------------------------------------
// 分派
// ---------------------------------------------------------------------------

#[test]
fn read_unsupported_extension_is_explicit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# heading").unwrap();

    let result = read_document(&path);
    assert_eq!(result, Err(DocError::UnsupportedFileType("md".into())));
}

#[test]
fn read_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_document(&dir.path().join("missing.txt"));
    assert!(matches!(result, Err(DocError::NotFound(_))));
}

#[test]
fn read_dispatch_ignores_extension_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("UPPER.TXT");
    std::fs::write(&path, "shout").unwrap();
    assert_eq!(read_document(&path).unwrap(), "shout");
}

#[test]
fn write_document_dispatches_by_format() {
    let dir = tempfile::tempdir().unwrap();
    for format in [DocFormat::Text, DocFormat::Docx, DocFormat::Pdf] {
        let path = dir.path().join(format!("out.{}", format.extension()));
        write_document("dispatch check", &path, format).unwrap();
        let text = read_document(&path).unwrap();
        assert!(text.contains("dispatch check"), "{format}: {text:?}");
    }
}
