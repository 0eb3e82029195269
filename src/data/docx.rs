//! Paragraph text of Word (`.docx`) documents.
//!
//! A `.docx` file is a zip archive whose body lives in `word/document.xml`.
//! Each `w:p` element is a paragraph and its visible text is the
//! concatenation of the `w:t` runs inside it. Tabs and line breaks become
//! spaces, as the question parser collapses whitespace anyway.

use std::io::{self, Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a readable docx archive: {0}")]
    Archive(#[from] ZipError),

    #[error("failed to read {DOCUMENT_PART}: {0}")]
    Io(#[from] io::Error),

    #[error("malformed {DOCUMENT_PART}: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Non-empty paragraphs of the document body, in order.
pub fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    paragraphs_from_xml(&xml)
}

/// The document body as text, one paragraph per line.
pub fn docx_text(bytes: &[u8]) -> Result<String, DocxError> {
    Ok(docx_paragraphs(bytes)?.join("\n"))
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    // Nested paragraphs (text boxes) are folded into the enclosing one.
    let mut depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => depth += 1,
                b"w:t" => in_text = depth > 0,
                _ => {}
            },
            Event::Empty(e) => {
                if depth > 0 && matches!(e.name().as_ref(), b"w:tab" | b"w:br" | b"w:cr") {
                    current.push(' ');
                }
            }
            Event::Text(e) if in_text => current.push_str(&e.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        let paragraph = current.trim();
                        if !paragraph.is_empty() {
                            paragraphs.push(paragraph.to_string());
                        }
                        current.clear();
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    fn archive(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>TEST 1</w:t></w:r></w:p>
    <w:p><w:r><w:t>501.</w:t></w:r><w:r><w:t xml:space="preserve">Fire &amp; smoke </w:t></w:r><w:r><w:t>drills</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>A.</w:t></w:r><w:r><w:tab/><w:t>Exit</w:t></w:r></w:p>
    <w:p><w:pPr><w:jc w:val="left"/></w:pPr></w:p>
    <w:p><w:r><w:t>B. Stay</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn joins_runs_into_paragraphs() {
        let bytes = archive(&[(DOCUMENT_PART, BODY)]);
        let paragraphs = docx_paragraphs(&bytes).unwrap();
        assert_eq!(
            paragraphs,
            ["TEST 1", "501.Fire & smoke drills", "A. Exit", "B. Stay"]
        );
    }

    #[test]
    fn missing_document_part_is_an_archive_error() {
        let bytes = archive(&[("word/styles.xml", "<w:styles/>")]);
        assert!(matches!(
            docx_paragraphs(&bytes),
            Err(DocxError::Archive(ZipError::FileNotFound))
        ));
    }

    #[test]
    fn plain_text_is_not_an_archive() {
        assert!(matches!(
            docx_paragraphs(b"501.Not a zip"),
            Err(DocxError::Archive(_))
        ));
    }
}
