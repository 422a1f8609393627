//! Shared helpers for integration tests

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_bundler::SourceHandle;

/// Build an in-memory PDF with one page per label; each page shows its label
pub fn sample_pdf(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Courier".to_vec()));
    let font_id = doc.add_object(Object::Dictionary(font));

    let mut kids = Vec::new();
    for label in labels {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ]),
        );
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources));
        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page))));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(kids.len() as i64));
    pages.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to serialize sample PDF");
    buffer
}

/// A source handle over a generated PDF
pub fn source(name: &str, labels: &[&str]) -> SourceHandle {
    SourceHandle::new(name, sample_pdf(labels))
}

/// Decoded content stream of every page in a PDF, in page order
pub fn page_texts(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("Failed to load merged PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc
                .get_page_content(page_id)
                .expect("Failed to read page content");
            String::from_utf8_lossy(&content).into_owned()
        })
        .collect()
}

/// The marker each page carries: the label of a source page, or the text of
/// a title page
pub fn page_markers(bytes: &[u8]) -> Vec<String> {
    page_texts(bytes)
        .iter()
        .map(|text| {
            let start = text.find('(').expect("page has no text") + 1;
            let end = text[start..].find(')').expect("unterminated string") + start;
            text[start..end].to_string()
        })
        .collect()
}
