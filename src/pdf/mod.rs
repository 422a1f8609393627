//! PDF manipulation module

pub mod font;
pub mod merge;
pub mod metadata;
pub mod pages;
pub mod title;

// Re-export commonly used items
pub use merge::{merge_documents, MergeEngine, MergeOptions};
pub use metadata::{inspect, inspect_file, PdfMetadata};
pub use pages::{LopdfCodec, PageCodec, PageRun};
pub use title::{StandardTitleRenderer, TitlePageOptions, TitlePageRenderer};

/// Small in-memory PDFs for unit tests
#[cfg(test)]
pub(crate) mod testing {
    use lopdf::{Dictionary, Document, Object, Stream};

    /// A PDF with one page per label; each page shows its label
    pub fn sample_pdf(labels: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = super::font::add_helvetica(&mut doc);

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
                    Object::Integer(612),
                    Object::Integer(792),
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

    /// Decoded content of every page, in page order
    pub fn page_texts(bytes: &[u8]) -> Vec<String> {
        let doc = Document::load_mem(bytes).expect("Failed to load merged PDF");
        doc.get_pages()
            .into_values()
            .map(|page_id| {
                let content = doc.get_page_content(page_id).expect("Failed to read page content");
                String::from_utf8_lossy(&content).into_owned()
            })
            .collect()
    }
}
