//! Page sequences and the lopdf-backed page codec
//!
//! A [`PageRun`] is one loaded document plus the ordered pages it contributes
//! to a bundle. The [`PageCodec`] trait turns source bytes into runs and a list
//! of runs back into a single PDF.

use std::collections::BTreeMap;
use std::fmt;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// A loaded document and the pages it contributes, in page order
#[derive(Clone)]
pub struct PageRun {
    document: Document,
    pages: Vec<ObjectId>,
}

impl PageRun {
    /// Wrap a document, taking every page in its page tree order
    pub fn new(document: Document) -> Self {
        let pages = document.get_pages().into_values().collect();
        Self { document, pages }
    }

    /// The underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Object ids of the pages, in page order
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.pages
    }

    /// Number of pages in this run
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the run contributes no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl fmt::Debug for PageRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRun")
            .field("pages", &self.pages)
            .field("objects", &self.document.objects.len())
            .finish()
    }
}

/// Reads source documents into page runs and writes runs out as one PDF
pub trait PageCodec {
    /// Decode a source document
    fn read(&self, bytes: &[u8]) -> std::result::Result<PageRun, lopdf::Error>;

    /// Serialize the pages of every run, in order, into a single document
    fn write(&self, runs: Vec<PageRun>) -> Result<Vec<u8>>;
}

/// [`PageCodec`] built on lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfCodec;

impl LopdfCodec {
    pub fn new() -> Self {
        Self
    }
}

impl PageCodec for LopdfCodec {
    fn read(&self, bytes: &[u8]) -> std::result::Result<PageRun, lopdf::Error> {
        let mut document = Document::load_mem(bytes)?;

        // Pages get re-parented under a flat page tree when written, so pull
        // down anything they currently inherit from intermediate nodes
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();
        for page_id in page_ids {
            flatten_inherited_attributes(&mut document, page_id)?;
        }

        Ok(PageRun::new(document))
    }

    /// Merge the runs into one document
    ///
    /// Follows the lopdf merge example:
    /// https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs
    fn write(&self, runs: Vec<PageRun>) -> Result<Vec<u8>> {
        // Define a starting max_id for merged document
        let mut max_id = 1;
        let mut page_ids: Vec<ObjectId> = Vec::new();
        let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

        for run in runs {
            let mut doc = run.document;

            // Renumber objects in this document to avoid conflicts
            doc.renumber_objects_with(max_id);
            max_id = doc.max_id + 1;

            page_ids.extend(doc.get_pages().into_values());

            // The old catalog and page tree nodes are replaced by the merged ones
            let catalog_id = doc.trailer.get(b"Root").and_then(Object::as_reference).ok();
            objects.extend(
                doc.objects
                    .into_iter()
                    .filter(|(id, object)| Some(*id) != catalog_id && !is_page_tree_node(object)),
            );
        }

        if page_ids.is_empty() {
            return Err(Error::NothingToMerge);
        }

        let mut merged_doc = Document::with_version("1.5");
        merged_doc.objects.extend(objects);

        // new_object_id() must hand out ids above everything we just added
        merged_doc.max_id = max_id - 1;

        let pages_id = merged_doc.new_object_id();

        let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));
        merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = merged_doc.add_object(Object::Dictionary(catalog));

        merged_doc.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &page_ids {
            merged_doc
                .get_dictionary_mut(page_id)?
                .set("Parent", Object::Reference(pages_id));
        }

        // Drop outlines, name trees and the like that hung off the old catalogs
        merged_doc.prune_objects();
        merged_doc.compress();

        let mut buffer = Vec::new();
        merged_doc.save_to(&mut buffer)?;

        log::debug!(
            "Wrote {} pages ({} bytes)",
            page_ids.len(),
            buffer.len()
        );

        Ok(buffer)
    }
}

/// Whether an object is an intermediate or root node of a page tree
fn is_page_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => dict
            .get(b"Type")
            .and_then(Object::as_name)
            .map_or(false, |name| name == &b"Pages"[..]),
        _ => false,
    }
}

/// Copy inheritable attributes from ancestor page tree nodes onto the page
fn flatten_inherited_attributes(
    doc: &mut Document,
    page_id: ObjectId,
) -> std::result::Result<(), lopdf::Error> {
    let mut inherited: Vec<(&'static [u8], Object)> = Vec::new();

    {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&'static [u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;

        while let Some(node_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let Ok(node) = doc.get_dictionary(node_id) else {
                break;
            };

            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });

            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
    }

    if inherited.is_empty() {
        return Ok(());
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        page.set(key.to_vec(), value);
    }

    Ok(())
}
