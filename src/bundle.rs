//! The ordered set of documents that make up a bundle
//!
//! A [`DocumentSet`] holds uploaded sources together with the title each one
//! carries in the bundle and its position. Positions are explicit order keys;
//! reordering swaps keys between neighbours, and [`DocumentSet::ordered_view`]
//! is the only way to observe the resulting order.
//!
//! # Example
//!
//! ```
//! use pdf_bundler::bundle::{DocumentSet, MoveOutcome, SourceHandle};
//!
//! let intro = SourceHandle::new("intro.pdf", b"%PDF-1.5 ...".to_vec());
//! let appendix = SourceHandle::new("appendix.pdf", b"%PDF-1.5 ...".to_vec());
//!
//! let mut set = DocumentSet::new();
//! set.add(intro.clone());
//! set.add(appendix.clone());
//!
//! assert_eq!(set.move_up(&appendix), MoveOutcome::Moved);
//! let names: Vec<_> = set.ordered_view().iter().map(|d| d.title()).collect();
//! assert_eq!(names, ["appendix.pdf", "intro.pdf"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};

struct Source {
    name: String,
    bytes: Arc<[u8]>,
}

/// Handle to one uploaded source document
///
/// Handles compare by identity: clones of a handle are the same document,
/// while two handles created from equal bytes are not.
#[derive(Clone)]
pub struct SourceHandle {
    inner: Arc<Source>,
}

impl SourceHandle {
    /// Create a handle from a display name (usually the file name) and bytes
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            inner: Arc::new(Source {
                name: name.into(),
                bytes: bytes.into(),
            }),
        }
    }

    /// Read a file and name the handle after the file name
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, bytes))
    }

    /// Display name of the source
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Raw bytes of the source
    pub fn bytes(&self) -> &[u8] {
        &self.inner.bytes
    }

    /// Whether both handles refer to the same upload
    pub fn same_source(&self, other: &SourceHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for SourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_source(other)
    }
}

impl Eq for SourceHandle {}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceHandle")
            .field("name", &self.inner.name)
            .field("len", &self.inner.bytes.len())
            .finish()
    }
}

/// Opens files as sources, handing out one handle per file
///
/// Paths are canonicalized first, so `a.pdf` and `./a.pdf` give back the
/// same handle and [`DocumentSet::add`] treats the second as a duplicate.
#[derive(Debug, Default)]
pub struct SourceLoader {
    loaded: HashMap<PathBuf, SourceHandle>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the file at `path`, reading it on first use
    pub fn load(&mut self, path: &Path) -> Result<SourceHandle> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let key = std::fs::canonicalize(path)?;
        if let Some(source) = self.loaded.get(&key) {
            return Ok(source.clone());
        }

        let source = SourceHandle::from_path(path)?;
        self.loaded.insert(key, source.clone());
        Ok(source)
    }
}

/// A source document with its bundle title and order key
#[derive(Debug, Clone)]
pub struct TitledDocument {
    source: SourceHandle,
    title: String,
    order: u64,
}

impl TitledDocument {
    pub fn source(&self) -> &SourceHandle {
        &self.source
    }

    /// Title used for this document's title page
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The document swapped places with its neighbour
    Moved,
    /// The document is already first (move up) or last (move down)
    AtBoundary,
    /// The handle does not belong to this set; nothing changed
    NotMember,
}

impl MoveOutcome {
    /// Treat a stale handle as an error instead of a no-op
    pub fn into_result(self) -> Result<Self> {
        match self {
            MoveOutcome::NotMember => Err(Error::NotFound(
                "move target is not part of the bundle".to_string(),
            )),
            outcome => Ok(outcome),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Up,
    Down,
}

/// Ordered collection of documents plus the optional cover title
///
/// The set is plain owned data. Callers that share one set between threads
/// must wrap it in a lock, since moves read and then rewrite order keys.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    documents: Vec<TitledDocument>,
    leading_title: Option<String>,
    next_order: u64,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source, titled after its name, behind every existing document
    ///
    /// Returns `false` and leaves the set untouched if the same handle is
    /// already present.
    pub fn add(&mut self, source: SourceHandle) -> bool {
        if self.contains(&source) {
            log::debug!("Ignoring duplicate upload {}", source.name());
            return false;
        }

        let order = self.next_order;
        self.next_order += 1;
        self.documents.push(TitledDocument {
            title: source.name().to_string(),
            source,
            order,
        });

        true
    }

    /// Whether this exact handle is part of the set
    pub fn contains(&self, source: &SourceHandle) -> bool {
        self.position(source).is_some()
    }

    /// Look up the entry for a handle
    pub fn get(&self, source: &SourceHandle) -> Option<&TitledDocument> {
        self.documents.iter().find(|doc| doc.source.same_source(source))
    }

    /// Remove a document, returning its entry
    ///
    /// The relative order of the remaining documents is unchanged.
    pub fn remove(&mut self, source: &SourceHandle) -> Option<TitledDocument> {
        let index = self.position(source)?;
        Some(self.documents.remove(index))
    }

    /// The source with this name, if any
    ///
    /// Names are not unique; several documents sharing the name is an
    /// [`Error::AmbiguousName`].
    pub fn find_by_name(&self, name: &str) -> Result<Option<&SourceHandle>> {
        let mut matches = self
            .documents
            .iter()
            .map(|doc| &doc.source)
            .filter(|source| source.name() == name);

        let Some(first) = matches.next() else {
            return Ok(None);
        };
        let others = matches.count();
        if others > 0 {
            return Err(Error::AmbiguousName {
                name: name.to_string(),
                count: others + 1,
            });
        }

        Ok(Some(first))
    }

    /// Change the title a document carries in the bundle
    pub fn set_title(&mut self, source: &SourceHandle, title: impl Into<String>) -> Result<()> {
        let index = self
            .position(source)
            .ok_or_else(|| Error::NotFound(source.name().to_string()))?;
        self.documents[index].title = title.into();
        Ok(())
    }

    /// Cover title text; `None` when unset or empty
    pub fn leading_title(&self) -> Option<&str> {
        self.leading_title.as_deref().filter(|text| !text.is_empty())
    }

    pub fn set_leading_title(&mut self, text: Option<String>) {
        self.leading_title = text;
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in bundle order
    ///
    /// Sorted by order key; the sort is stable so equal keys keep insertion
    /// order.
    pub fn ordered_view(&self) -> Vec<&TitledDocument> {
        let mut view: Vec<&TitledDocument> = self.documents.iter().collect();
        view.sort_by_key(|doc| doc.order);
        view
    }

    /// Swap a document with the one before it
    pub fn move_up(&mut self, source: &SourceHandle) -> MoveOutcome {
        self.shift(source, Direction::Up)
    }

    /// Swap a document with the one after it
    pub fn move_down(&mut self, source: &SourceHandle) -> MoveOutcome {
        self.shift(source, Direction::Down)
    }

    fn shift(&mut self, source: &SourceHandle, direction: Direction) -> MoveOutcome {
        // Indices into `documents`, in bundle order
        let mut ranked: Vec<usize> = (0..self.documents.len()).collect();
        ranked.sort_by_key(|&index| self.documents[index].order);

        let Some(rank) = ranked
            .iter()
            .position(|&index| self.documents[index].source.same_source(source))
        else {
            log::warn!(
                "Ignoring {:?} for {}: not part of this bundle",
                direction,
                source.name()
            );
            return MoveOutcome::NotMember;
        };

        let neighbour_rank = match direction {
            Direction::Up if rank > 0 => rank - 1,
            Direction::Down if rank + 1 < ranked.len() => rank + 1,
            _ => return MoveOutcome::AtBoundary,
        };

        let (current, neighbour) = (ranked[rank], ranked[neighbour_rank]);
        let current_order = self.documents[current].order;
        let neighbour_order = self.documents[neighbour].order;

        if current_order == neighbour_order {
            // Equal keys are ordered by position in `documents`; swap slots instead
            self.documents.swap(current, neighbour);
        } else {
            self.documents[current].order = neighbour_order;
            self.documents[neighbour].order = current_order;
        }

        log::debug!(
            "Moved {} {:?} to position {}",
            source.name(),
            direction,
            neighbour_rank + 1
        );

        MoveOutcome::Moved
    }

    fn position(&self, source: &SourceHandle) -> Option<usize> {
        self.documents
            .iter()
            .position(|doc| doc.source.same_source(source))
    }
}
