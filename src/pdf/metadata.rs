//! PDF metadata extraction

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};

/// PDF metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Document author (if present)
    pub author: Option<String>,
}

/// Extract metadata from an in-memory PDF
pub fn inspect(bytes: &[u8]) -> Result<PdfMetadata> {
    let doc = Document::load_mem(bytes)?;

    // Walk the page tree rather than trusting the root Count, which some
    // producers get wrong
    let page_count = doc.get_pages().len();

    Ok(PdfMetadata {
        page_count,
        title: info_string(&doc, b"Title"),
        author: info_string(&doc, b"Author"),
    })
}

/// Extract metadata from a PDF file
pub fn inspect_file(path: &Path) -> Result<PdfMetadata> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    inspect(&std::fs::read(path)?)
}

/// Read a text entry from the trailer's Info dictionary
fn info_string(doc: &Document, key: &[u8]) -> Option<String> {
    let info = match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    // UTF-16BE/UTF-8 with a BOM, otherwise PDFDocEncoding
    info.get(key).and_then(lopdf::decode_text_string).ok()
}
