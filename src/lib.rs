//! PDF Bundler Library
//!
//! Combines several PDF documents into one, optionally with a generated cover
//! page and a title page in front of each document. This library provides
//! functionality to:
//! - Keep an ordered, reorderable set of source documents with editable titles
//! - Render simple centered title pages
//! - Merge title pages and source pages into a single PDF
//! - Describe bundles as JSON manifests
//! - Inspect PDFs (page counts, Info title and author)
//!
//! # Example
//!
//! ```no_run
//! use pdf_bundler::bundle::{DocumentSet, SourceHandle};
//! use pdf_bundler::pdf::{MergeEngine, MergeOptions};
//! use std::path::Path;
//!
//! let mut set = DocumentSet::new();
//! let intro = SourceHandle::from_path(Path::new("1. intro.pdf")).unwrap();
//! let advanced = SourceHandle::from_path(Path::new("2. advanced.pdf")).unwrap();
//! set.add(intro);
//! set.add(advanced.clone());
//! set.set_title(&advanced, "Advanced Topics").unwrap();
//! set.move_up(&advanced);
//!
//! let options = MergeOptions { insert_document_titles: true };
//! let bytes = MergeEngine::default().merge(&set, &options).expect("Failed to merge PDFs");
//! std::fs::write("merged.pdf", bytes).unwrap();
//! ```

pub mod bundle;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod pdf;

// Re-export commonly used items
pub use bundle::{DocumentSet, MoveOutcome, SourceHandle, SourceLoader, TitledDocument};
pub use error::{Error, Result};
pub use pdf::{merge_documents, MergeEngine, MergeOptions};
