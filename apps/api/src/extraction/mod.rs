//! Text extraction: turns an uploaded PDF, DOCX or plain-text file into prompt-ready text.
//!
//! Extraction is synchronous and CPU bound; async callers run it on the blocking pool.

use std::fmt;
use std::panic;
use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use thiserror::Error;
use tracing::{debug, warn};

/// The file formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Resolves a type tag (a file extension, any case) to a supported kind.
    pub fn from_tag(tag: &str) -> Result<Self, ExtractError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::Txt),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF decode error: {0}")]
    Pdf(String),

    #[error("DOCX decode error: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Plain text pulled out of one uploaded file. May be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub kind: DocumentKind,
    pub text: String,
}

impl ExtractedDocument {
    /// True when there is nothing worth sending to the model.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extracts the text of the file at `path`, decoding it according to `type_tag`.
pub fn extract(path: &Path, type_tag: &str) -> Result<ExtractedDocument, ExtractError> {
    let result = DocumentKind::from_tag(type_tag).and_then(|kind| {
        let bytes = std::fs::read(path)?;
        let text = match kind {
            DocumentKind::Pdf => extract_pdf(&bytes)?,
            DocumentKind::Docx => extract_docx(&bytes)?,
            DocumentKind::Txt => String::from_utf8(bytes)?,
        };
        Ok(ExtractedDocument { kind, text })
    });

    match &result {
        Ok(doc) => debug!(
            "Extracted {} chars from {} file {}",
            doc.text.len(),
            doc.kind,
            path.display()
        ),
        Err(e) => warn!("Error extracting text from {}: {e}", path.display()),
    }

    result
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning an error
    panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractError::Pdf("decoder panicked on malformed input".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(&mut text, &p.children),
            DocumentChild::Table(table) => {
                for row in &table.rows {
                    let TableChild::TableRow(row) = row;
                    for TableRowChild::TableCell(cell) in &row.cells {
                        for content in &cell.children {
                            if let TableCellContent::Paragraph(p) = content {
                                push_paragraph(&mut text, &p.children);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(text)
}

/// Appends the raw text of one paragraph followed by a newline.
fn push_paragraph(out: &mut String, children: &[ParagraphChild]) {
    push_runs(out, children);
    out.push('\n');
}

fn push_runs(out: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_runs(out, &link.children),
            _ => {}
        }
    }
}
