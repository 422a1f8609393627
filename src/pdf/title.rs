//! Title page generation
//!
//! Renders a line of text (or several) centered on an otherwise blank page.
//! Output is fully deterministic: no timestamps, no document IDs, no Info
//! dictionary, so identical text always produces identical objects.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use crate::error::{Error, Result};
use crate::layout::{centered_lines, usable_width, Margins, PageDimensions};
use crate::pdf::font::{self, FONT_RESOURCE};
use crate::pdf::pages::PageRun;

/// Renders title text onto a single-page document
pub trait TitlePageRenderer {
    fn render(&self, text: &str) -> Result<PageRun>;
}

/// Options for generated title pages
#[derive(Debug, Clone, PartialEq)]
pub struct TitlePageOptions {
    /// Paper size of the generated page
    pub page: PageDimensions,
    /// Text is wrapped to stay inside these margins
    pub margins: Margins,
    /// Font size in points
    pub font_size: f32,
    /// Distance between baselines as a multiple of the font size
    pub line_spacing: f32,
}

impl Default for TitlePageOptions {
    fn default() -> Self {
        Self {
            page: PageDimensions::letter(),
            margins: Margins::standard(),
            font_size: 24.0,
            line_spacing: 1.2,
        }
    }
}

/// Title page renderer using the built-in Helvetica font
#[derive(Debug, Clone, Default)]
pub struct StandardTitleRenderer {
    options: TitlePageOptions,
}

impl StandardTitleRenderer {
    pub fn new(options: TitlePageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TitlePageOptions {
        &self.options
    }

    /// Encode and wrap the text into lines that fit between the margins
    fn layout_lines(&self, text: &str) -> Result<Vec<Vec<u8>>> {
        let font_size = f64::from(self.options.font_size);
        let max_width = usable_width(&self.options.page, &self.options.margins);

        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut lines = Vec::new();
        for raw_line in split_line_breaks(text) {
            let encoded = font::encode_win_ansi(raw_line.trim()).map_err(|c| {
                if c.is_control() {
                    Error::render(text, format!("control character {c:?} is not allowed"))
                } else {
                    Error::render(
                        text,
                        format!("character {c:?} is not available in WinAnsiEncoding"),
                    )
                }
            })?;
            lines.extend(wrap_words(&encoded, font_size, max_width));
        }

        Ok(lines)
    }

    /// Build the content stream that draws the lines
    fn content_stream(&self, lines: &[Vec<u8>]) -> Result<Vec<u8>> {
        let font_size = f64::from(self.options.font_size);
        let widths: Vec<f64> = lines
            .iter()
            .map(|line| font::text_width(line, font_size))
            .collect();
        let origins = centered_lines(
            &self.options.page,
            &widths,
            font_size,
            f64::from(self.options.line_spacing),
        );

        let mut operations = vec![Operation::new("g", vec![Object::Integer(0)])];

        for (line, (x, y)) in lines.iter().zip(origins) {
            if line.is_empty() {
                continue;
            }
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                    Object::Real(self.options.font_size),
                ],
            ));
            operations.push(Operation::new(
                "Tm",
                vec![
                    Object::Integer(1),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(1),
                    Object::Real(round_coordinate(x)),
                    Object::Real(round_coordinate(y)),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(line.clone(), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        Ok(Content { operations }.encode()?)
    }
}

impl TitlePageRenderer for StandardTitleRenderer {
    fn render(&self, text: &str) -> Result<PageRun> {
        let font_size = self.options.font_size;
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(Error::render(text, format!("invalid font size {font_size}")));
        }

        let lines = self.layout_lines(text)?;
        let content = self.content_stream(&lines)?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = font::add_helvetica(&mut doc);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

        let mut fonts = Dictionary::new();
        fonts.set(FONT_RESOURCE, Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let media_box = self
            .options
            .page
            .media_box()
            .into_iter()
            .map(Object::Integer)
            .collect();

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("MediaBox", Object::Array(media_box));
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources));
        let page_id = doc.add_object(Object::Dictionary(page));

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages.set("Count", Object::Integer(1));
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        log::debug!("Rendered title page with {} line(s)", lines.len());

        Ok(PageRun::new(doc))
    }
}

/// Split on `\r\n`, `\n` or a lone `\r`
fn split_line_breaks(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Greedy word wrap of WinAnsi text; words wider than a line are split
fn wrap_words(encoded: &[u8], font_size: f64, max_width: f64) -> Vec<Vec<u8>> {
    let fits = |candidate: &[u8]| font::text_width(candidate, font_size) <= max_width;

    let mut lines = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for word in encoded.split(|&b| b == b' ').filter(|word| !word.is_empty()) {
        let mut candidate = current.clone();
        if !candidate.is_empty() {
            candidate.push(b' ');
        }
        candidate.extend_from_slice(word);

        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // Break an overlong word at the last byte that still fits
        let mut rest = word;
        while !fits(rest) && rest.len() > 1 {
            let mut cut = 1;
            while cut < rest.len() && fits(&rest[..cut + 1]) {
                cut += 1;
            }
            lines.push(rest[..cut].to_vec());
            rest = &rest[cut..];
        }
        current = rest.to_vec();
    }

    lines.push(current);
    lines
}

/// Keep content streams short and stable: two decimals are plenty for text placement
fn round_coordinate(value: f64) -> f32 {
    ((value * 100.0).round() / 100.0) as f32
}
