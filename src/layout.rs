//! Page layout calculations for generated title pages

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches * 25.4)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self {
            width: Length::from_mm(215.9),
            height: Length::from_mm(279.4),
        }
    }

    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: Length::from_mm(210.0),
            height: Length::from_mm(297.0),
        }
    }

    /// MediaBox values in whole points, as written into the page dictionary
    pub fn media_box(&self) -> [i64; 4] {
        [0, 0, self.width.pt().round() as i64, self.height.pt().round() as i64]
    }
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self::letter()
    }
}

/// Margins for page content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Length,
    pub bottom: Length,
    pub left: Length,
    pub right: Length,
}

impl Margins {
    /// Create margins with same value on all sides
    pub fn uniform(margin: Length) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }

    /// Standard 1-inch margins on all sides
    pub fn standard() -> Self {
        Self::uniform(Length::from_inches(1.0))
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::standard()
    }
}

/// Width available for text between the left and right margins, in points
pub fn usable_width(page: &PageDimensions, margins: &Margins) -> f64 {
    (page.width.pt() - margins.left.pt() - margins.right.pt()).max(0.0)
}

/// Baseline origins for a block of lines centered on the page
///
/// `line_widths` are the rendered widths of each line in points. The block is
/// centered vertically on the page and every line is centered horizontally.
/// Coordinates use the PDF convention with the origin at the bottom-left.
pub fn centered_lines(
    page: &PageDimensions,
    line_widths: &[f64],
    font_size: f64,
    line_spacing: f64,
) -> Vec<(f64, f64)> {
    let page_width = page.width.pt();
    let page_height = page.height.pt();
    let line_height = font_size * line_spacing;

    // Block height counts the full leading between lines plus one em for the last line
    let lines = line_widths.len();
    let block_height = lines.saturating_sub(1) as f64 * line_height + font_size;
    let first_baseline = (page_height + block_height) / 2.0 - font_size;

    line_widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let x = (page_width - width) / 2.0;
            let y = first_baseline - i as f64 * line_height;
            (x, y)
        })
        .collect()
}
