//! Word (`.docx`) extraction.
//!
//! A `.docx` file is a ZIP archive whose body lives in `word/document.xml`.
//! Only paragraphs that sit directly in `w:body` are read, one line per
//! paragraph, so table cells, headers and text boxes are left out. Within a
//! paragraph the text of every run (including runs inside hyperlinks) is
//! concatenated, with `w:tab` as `\t` and line breaks as `\n`.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::IngestError;
use crate::extract::TextExtractor;
use crate::types::DocumentFormat;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of `word/document.xml`.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 64 * 1024 * 1024;

/// Reads body paragraphs out of a `.docx` archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let xml = read_document_part(bytes)?;
        let paragraphs = body_paragraphs(&xml).map_err(failed)?;
        Ok(paragraphs.join("\n"))
    }
}

fn failed(err: impl std::fmt::Display) -> IngestError {
    IngestError::ExtractionFailed {
        format: DocumentFormat::Docx,
        message: err.to_string(),
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, IngestError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(failed)?;
    let part = archive.by_name(DOCUMENT_PART).map_err(failed)?;

    let mut xml = String::new();
    part.take(MAX_DOCUMENT_XML_BYTES + 1)
        .read_to_string(&mut xml)
        .map_err(failed)?;
    if xml.len() as u64 > MAX_DOCUMENT_XML_BYTES {
        return Err(failed(format!(
            "{DOCUMENT_PART} exceeds {MAX_DOCUMENT_XML_BYTES} bytes once decompressed"
        )));
    }
    Ok(xml)
}

/// WordprocessingML elements the paragraph reader cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Body,
    Paragraph,
    Hyperlink,
    Run,
    Text,
    Other,
}

impl Tag {
    fn of(name: &[u8]) -> Self {
        match name {
            b"w:body" => Tag::Body,
            b"w:p" => Tag::Paragraph,
            b"w:hyperlink" => Tag::Hyperlink,
            b"w:r" => Tag::Run,
            b"w:t" => Tag::Text,
            _ => Tag::Other,
        }
    }
}

/// True when `path` ends in a run of a body paragraph.
fn in_body_run(path: &[Tag]) -> bool {
    matches!(
        path,
        [.., Tag::Body, Tag::Paragraph, Tag::Run]
            | [.., Tag::Body, Tag::Paragraph, Tag::Hyperlink, Tag::Run]
    )
}

fn opens_body_paragraph(path: &[Tag], tag: Tag) -> bool {
    tag == Tag::Paragraph && path.last() == Some(&Tag::Body)
}

/// What an empty run child contributes to the paragraph text.
fn run_control(e: &BytesStart<'_>) -> Result<Option<char>, quick_xml::Error> {
    let ch = match e.name().as_ref() {
        b"w:tab" => Some('\t'),
        b"w:cr" => Some('\n'),
        b"w:br" => match e.try_get_attribute("w:type")? {
            Some(kind) if matches!(kind.value.as_ref(), b"page" | b"column") => None,
            _ => Some('\n'),
        },
        _ => None,
    };
    Ok(ch)
}

fn body_paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Tag> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = Tag::of(e.name().as_ref());
                if opens_body_paragraph(&path, tag) {
                    current = Some(String::new());
                }
                path.push(tag);
            }
            Event::End(_) => {
                let closed = path.pop();
                if closed == Some(Tag::Paragraph) && path.last() == Some(&Tag::Body) {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
            }
            Event::Empty(e) => {
                let tag = Tag::of(e.name().as_ref());
                if opens_body_paragraph(&path, tag) {
                    paragraphs.push(String::new());
                } else if let Some(paragraph) = current.as_mut() {
                    if in_body_run(&path) {
                        if let Some(ch) = run_control(&e)? {
                            paragraph.push(ch);
                        }
                    }
                }
            }
            Event::Text(t) => {
                if let Some(paragraph) = current.as_mut() {
                    if path.last() == Some(&Tag::Text) && in_body_run(&path[..path.len() - 1]) {
                        paragraph.push_str(&t.unescape()?);
                    }
                }
            }
            Event::CData(t) => {
                if let Some(paragraph) = current.as_mut() {
                    if path.last() == Some(&Tag::Text) && in_body_run(&path[..path.len() - 1]) {
                        paragraph.push_str(&String::from_utf8_lossy(&t));
                    }
                }
            }
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
    use zip::ZipWriter;

    use super::*;

    const NS: &str = "xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"";

    fn document_xml(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document {NS}><w:body>{body}<w:sectPr/></w:body></w:document>"
        )
    }

    fn docx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in parts {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn docx_with_body(body: &str) -> Vec<u8> {
        docx(&[
            ("[Content_Types].xml", "<Types/>"),
            (DOCUMENT_PART, &document_xml(body)),
        ])
    }

    #[test]
    fn paragraphs_joined_with_newlines() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>The quick </w:t></w:r><w:r><w:t>brown fox.</w:t></w:r></w:p>\
             <w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr><w:r><w:t>Second &amp; last</w:t></w:r></w:p>",
        );
        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "The quick brown fox.\nSecond & last");
    }

    #[test]
    fn empty_paragraphs_keep_their_line() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>one</w:t></w:r></w:p><w:p/><w:p></w:p>\
             <w:p><w:r><w:t>two</w:t></w:r></w:p>",
        );
        assert_eq!(DocxExtractor.extract(&bytes).unwrap(), "one\n\n\ntwo");
    }

    #[test]
    fn tabs_breaks_and_hyperlinks_inside_runs() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t>\
             <w:br w:type=\"page\"/></w:r>\
             <w:hyperlink w:history=\"1\"><w:r><w:t xml:space=\"preserve\"> link</w:t></w:r></w:hyperlink></w:p>",
        );
        assert_eq!(DocxExtractor.extract(&bytes).unwrap(), "a\tb\nc link");
    }

    #[test]
    fn tables_and_non_run_text_are_skipped() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>kept</w:t></w:r><w:r><w:instrText>PAGE</w:instrText></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert_eq!(DocxExtractor.extract(&bytes).unwrap(), "kept");
    }

    #[test]
    fn archive_without_document_part_fails() {
        let bytes = docx(&[("word/styles.xml", "<w:styles/>")]);
        let err = DocxExtractor.extract(&bytes).unwrap_err();
        assert!(matches!(
            err,
            IngestError::ExtractionFailed {
                format: DocumentFormat::Docx,
                ..
            }
        ));
    }

    #[test]
    fn non_zip_bytes_fail() {
        let err = DocxExtractor.extract(b"plain text, not a zip").unwrap_err();
        assert!(err.to_string().starts_with("failed to extract text from docx"));
    }

    #[test]
    fn malformed_xml_fails() {
        let bytes = docx(&[(DOCUMENT_PART, "<w:document><w:body><w:p></w:body>")]);
        assert!(matches!(
            DocxExtractor.extract(&bytes),
            Err(IngestError::ExtractionFailed { .. })
        ));
    }
}
