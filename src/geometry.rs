// Page and cell geometry. All lengths are millimetres, origin at the top-left
// corner of the page with y growing downward.

use crate::error::Error;

// ============================================================================
// Constants
// ============================================================================

/// A4 dimensions in mm
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Margins
pub const MARGIN_MM: f32 = 10.0;

/// Grid of the reference layout (20 codes per page)
pub const COLUMNS: u32 = 4;
pub const ROWS: u32 = 5;

/// Vertical bands reserved inside every cell
pub const CAPTION_BAND_MM: f32 = 10.0;
pub const LABEL_BAND_MM: f32 = 10.0;
pub const IMAGE_GAP_MM: f32 = 3.0;

/// Horizontal slack left when wrapping the caption
pub const TEXT_MARGIN_MM: f32 = 4.0;

/// Font sizes in points
pub const CAPTION_FONT_SIZE: f32 = 7.0;
pub const LABEL_FONT_SIZE: f32 = 10.0;

// ============================================================================
// Rect
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        self.x < other.right() - EPS
            && other.x < self.right() - EPS
            && self.y < other.bottom() - EPS
            && other.y < self.bottom() - EPS
    }
}

// ============================================================================
// Page Geometry
// ============================================================================

/// Fixed page layout shared by every cell of one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub columns: u32,
    pub rows: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH_MM,
            page_height: PAGE_HEIGHT_MM,
            margin_x: MARGIN_MM,
            margin_y: MARGIN_MM,
            columns: COLUMNS,
            rows: ROWS,
        }
    }
}

impl PageGeometry {
    pub fn validate(&self) -> Result<(), Error> {
        let values = [self.page_width, self.page_height, self.margin_x, self.margin_y];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidGeometry("dimensions must be finite".into()));
        }
        if self.margin_x < 0.0 || self.margin_y < 0.0 {
            return Err(Error::InvalidGeometry("margins must not be negative".into()));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(Error::InvalidGeometry(format!(
                "grid must have at least one column and one row (got {}x{})",
                self.columns, self.rows
            )));
        }
        if self.page_width <= 2.0 * self.margin_x {
            return Err(Error::InvalidGeometry(format!(
                "page width {} leaves no room inside margins of {}",
                self.page_width, self.margin_x
            )));
        }
        if self.page_height <= 2.0 * self.margin_y {
            return Err(Error::InvalidGeometry(format!(
                "page height {} leaves no room inside margins of {}",
                self.page_height, self.margin_y
            )));
        }
        Ok(())
    }

    pub fn cells_per_page(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn cell_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin_x) / self.columns as f32
    }

    pub fn cell_height(&self) -> f32 {
        (self.page_height - 2.0 * self.margin_y) / self.rows as f32
    }
}

// ============================================================================
// Cell Style
// ============================================================================

/// Fixed bands and font sizes used inside each cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub caption_band: f32,
    pub label_band: f32,
    pub image_gap: f32,
    pub text_margin: f32,
    pub caption_font_size: f32,
    pub label_font_size: f32,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            caption_band: CAPTION_BAND_MM,
            label_band: LABEL_BAND_MM,
            image_gap: IMAGE_GAP_MM,
            text_margin: TEXT_MARGIN_MM,
            caption_font_size: CAPTION_FONT_SIZE,
            label_font_size: LABEL_FONT_SIZE,
        }
    }
}

impl CellStyle {
    pub fn validate(&self) -> Result<(), Error> {
        let bands = [self.caption_band, self.label_band, self.image_gap, self.text_margin];
        if bands.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::Config(
                "bands, gap and text margin must be finite and not negative".into(),
            ));
        }
        if !(self.caption_font_size > 0.0 && self.label_font_size > 0.0) {
            return Err(Error::Config("font sizes must be positive".into()));
        }
        Ok(())
    }

    /// Height left for the image once the text bands and gap are taken out.
    pub fn available_image_height(&self, cell_height: f32) -> f32 {
        cell_height - self.caption_band - self.label_band - self.image_gap
    }
}
