//! JSON bundle manifests
//!
//! A manifest lists the documents of a bundle in order, with optional titles,
//! so a bundle can be rebuilt without retyping every option:
//!
//! ```json
//! {
//!   "cover": "Workshop Handouts",
//!   "section_titles": true,
//!   "documents": [
//!     { "path": "intro.pdf", "title": "Introduction" },
//!     { "path": "exercises/week1.pdf" }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the manifest.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::{DocumentSet, SourceLoader};
use crate::error::{Error, Result};

/// One document entry in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    /// Title page text; defaults to the file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A bundle description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Cover page text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Insert a title page before each document
    #[serde(default)]
    pub section_titles: bool,
    pub documents: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest file, resolving relative document paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let mut manifest = Self::from_json(&std::fs::read_to_string(path)?)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in &mut manifest.documents {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }

        log::debug!(
            "Loaded manifest {} with {} documents",
            path.display(),
            manifest.documents.len()
        );

        Ok(manifest)
    }

    /// Read every listed document and build the bundle
    pub fn into_document_set(self) -> Result<DocumentSet> {
        self.into_document_set_with(&mut SourceLoader::new())
    }

    /// Build the bundle, reading documents through a shared loader
    ///
    /// A file listed more than once keeps its first position and title.
    pub fn into_document_set_with(self, loader: &mut SourceLoader) -> Result<DocumentSet> {
        let mut set = DocumentSet::new();
        set.set_leading_title(self.cover);

        for entry in self.documents {
            let source = loader.load(&entry.path)?;
            if !set.add(source.clone()) {
                log::warn!(
                    "{} is listed more than once; keeping the first",
                    entry.path.display()
                );
                continue;
            }
            if let Some(title) = entry.title {
                set.set_title(&source, title)?;
            }
        }

        Ok(set)
    }
}
