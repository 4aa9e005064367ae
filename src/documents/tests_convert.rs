use super::{
    convert, convert_file, read_document, write_docx_paragraphs, write_pdf, write_text,
    Conversion, DocError,
};

#[test]
fn docx_to_pdf_keeps_paragraph_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.pdf");
    write_docx_paragraphs(&["A", "B"], &input).unwrap();

    let written = convert(&input, &output, Conversion::DocxToPdf).unwrap();
    assert_eq!(written, output);

    let text = read_document(&output).unwrap();
    let a = text.find('A').expect("A missing");
    let b = text.find('B').expect("B missing");
    assert!(a < b, "extracted: {text:?}");
}

#[test]
fn pdf_to_text_and_pdf_to_docx_agree() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.pdf");
    write_pdf("Quarterly report\nRevenue grew steadily.", &source).unwrap();

    let txt = dir.path().join("out.txt");
    let docx = dir.path().join("out.docx");
    convert(&source, &txt, Conversion::PdfToText).unwrap();
    convert(&source, &docx, Conversion::PdfToDocx).unwrap();

    let from_txt = read_document(&txt).unwrap();
    let from_docx = read_document(&docx).unwrap();
    assert!(from_txt.contains("Quarterly report"));
    assert_eq!(from_txt, from_docx);
}

#[test]
fn pdf_to_docx_writes_one_paragraph_per_page() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("two-pages.pdf");
    let content = (0..30).map(|i| format!("line{i:02}")).collect::<Vec<_>>().join("\n");
    write_pdf(&content, &source).unwrap();

    let docx = dir.path().join("pages.docx");
    convert(&source, &docx, Conversion::PdfToDocx).unwrap();
    let paragraphs = super::read_docx_paragraphs(&docx).unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert!(paragraphs[1].contains("line29"));
}

#[test]
fn convert_file_infers_conversion_from_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.docx");
    let output = dir.path().join("out.pdf");
    write_docx_paragraphs(&["inferred"], &input).unwrap();

    convert_file(&input, &output).unwrap();
    assert!(read_document(&output).unwrap().contains("inferred"));
}

#[test]
fn unsupported_pair_is_rejected_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.txt");
    let output = dir.path().join("plain.pdf");
    write_text("text body", &input).unwrap();

    let result = convert_file(&input, &output);
    assert_eq!(
        result,
        Err(DocError::UnsupportedConversion { from: "TXT".into(), to: "PDF".into() })
    );
    assert!(!output.exists());
}

#[test]
fn convert_from_missing_source_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");

    let result = convert(&dir.path().join("nope.pdf"), &output, Conversion::PdfToText);
    assert!(matches!(result, Err(DocError::NotFound(_))));
    assert!(!output.exists());
}
