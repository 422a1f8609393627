//! Bundle assembly: title pages and source pages into one PDF

use crate::bundle::{DocumentSet, SourceHandle};
use crate::error::{Error, Result};
use crate::pdf::pages::{LopdfCodec, PageCodec, PageRun};
use crate::pdf::title::{StandardTitleRenderer, TitlePageOptions, TitlePageRenderer};

/// Options for merging a bundle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Insert a title page before each document
    pub insert_document_titles: bool,
}

/// Walks a [`DocumentSet`] and writes the bundle
///
/// The output page order is: the cover page (when the set has a leading
/// title), then for each document in bundle order its title page (when
/// enabled) followed by all of its own pages.
#[derive(Debug, Clone)]
pub struct MergeEngine<C = LopdfCodec, R = StandardTitleRenderer> {
    codec: C,
    renderer: R,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new(LopdfCodec, StandardTitleRenderer::default())
    }
}

impl MergeEngine {
    /// Default codec with custom title page settings
    pub fn with_title_options(options: TitlePageOptions) -> Self {
        Self::new(LopdfCodec, StandardTitleRenderer::new(options))
    }
}

impl<C: PageCodec, R: TitlePageRenderer> MergeEngine<C, R> {
    pub fn new(codec: C, renderer: R) -> Self {
        Self { codec, renderer }
    }

    /// Merge the bundle into PDF bytes
    ///
    /// Fails without producing output if any source cannot be read or any
    /// title cannot be rendered. A bundle with nothing to place on a page is
    /// reported as [`Error::NothingToMerge`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pdf_bundler::bundle::{DocumentSet, SourceHandle};
    /// use pdf_bundler::pdf::{MergeEngine, MergeOptions};
    /// use std::path::Path;
    ///
    /// let mut set = DocumentSet::new();
    /// set.add(SourceHandle::from_path(Path::new("1. intro.pdf")).unwrap());
    /// set.add(SourceHandle::from_path(Path::new("2. advanced.pdf")).unwrap());
    /// set.set_leading_title(Some("Workshop Handouts".to_string()));
    ///
    /// let options = MergeOptions { insert_document_titles: true };
    /// let bytes = MergeEngine::default().merge(&set, &options).expect("Failed to merge");
    /// std::fs::write("handouts.pdf", bytes).unwrap();
    /// ```
    pub fn merge(&self, set: &DocumentSet, options: &MergeOptions) -> Result<Vec<u8>> {
        let mut runs: Vec<PageRun> = Vec::new();

        if let Some(cover) = set.leading_title() {
            log::debug!("Rendering cover page");
            runs.push(self.renderer.render(cover)?);
        }

        for (index, document) in set.ordered_view().into_iter().enumerate() {
            if options.insert_document_titles {
                runs.push(self.renderer.render(document.title())?);
            }

            let source = document.source();
            let run = self
                .codec
                .read(source.bytes())
                .map_err(|source_error| Error::DocumentUnreadable {
                    position: index + 1,
                    name: source.name().to_string(),
                    title: document.title().to_string(),
                    source: source_error,
                })?;

            if run.is_empty() {
                log::warn!("{} has no pages; it adds nothing to the bundle", source.name());
            } else {
                log::debug!("Adding {} ({} pages)", source.name(), run.page_count());
            }

            runs.push(run);
        }

        if runs.iter().all(PageRun::is_empty) {
            return Err(Error::NothingToMerge);
        }

        let total: usize = runs.iter().map(PageRun::page_count).sum();
        log::info!("Merging {} documents into {} pages", set.len(), total);

        self.codec.write(runs)
    }
}

/// Merge documents in the given order into one PDF
///
/// Each entry pairs a source with the title it should carry. A handle given
/// twice is only included once, at its first position.
///
/// # Example
///
/// ```no_run
/// use pdf_bundler::bundle::SourceHandle;
/// use pdf_bundler::pdf::merge_documents;
/// use std::path::Path;
///
/// let intro = SourceHandle::from_path(Path::new("intro.pdf")).unwrap();
/// let bytes = merge_documents(
///     vec![(intro, "Introduction".to_string())],
///     Some("Course Pack"),
///     true,
/// ).expect("Failed to merge");
/// ```
pub fn merge_documents<I>(
    documents: I,
    leading_title: Option<&str>,
    insert_document_titles: bool,
) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (SourceHandle, String)>,
{
    let mut set = DocumentSet::new();
    set.set_leading_title(leading_title.map(str::to_string));

    for (source, title) in documents {
        if set.add(source.clone()) {
            set.set_title(&source, title)?;
        }
    }

    MergeEngine::default().merge(&set, &MergeOptions { insert_document_titles })
}
