// Placement of the caption, image and label inside one grid cell.
//
// A cell is split top to bottom into: caption band, image band, gap, label band.

use log::{debug, warn};

use crate::error::Error;
use crate::geometry::{CellStyle, Rect};
use crate::text::{line_height_mm, FontStyle, TextMeasure};

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub caption_rect: Rect,
    pub caption_lines: Vec<String>,
    pub image_rect: Rect,
    pub label_rect: Rect,
    /// Label as it should be drawn, shortened to fit the cell width
    pub label_text: String,
}

/// Lay out one cell.
///
/// The image is scaled uniformly so it fits both the cell width and the height
/// left between the text bands, then centered in that space.
pub fn layout(
    cell: Rect,
    caption: &str,
    label: &str,
    image_width_px: u32,
    image_height_px: u32,
    style: &CellStyle,
    measure: &dyn TextMeasure,
) -> Result<CellLayout, Error> {
    let available_height = style.available_image_height(cell.height);
    if !(available_height > 0.0) {
        return Err(Error::DegenerateLayout(format!(
            "cell height {:.1}mm leaves {:.1}mm for the image",
            cell.height, available_height
        )));
    }
    if !(cell.width > 0.0) {
        return Err(Error::DegenerateLayout(format!("cell width {:.1}mm", cell.width)));
    }
    if image_width_px == 0 || image_height_px == 0 {
        return Err(Error::DegenerateLayout(format!(
            "image for '{}' has no pixels ({}x{})",
            label, image_width_px, image_height_px
        )));
    }

    let caption_rect = Rect::new(cell.x, cell.y, cell.width, style.caption_band);
    let image_band = Rect::new(cell.x, caption_rect.bottom(), cell.width, available_height);
    let label_rect = Rect::new(
        cell.x,
        image_band.bottom() + style.image_gap,
        cell.width,
        style.label_band,
    );

    let scale = (cell.width / image_width_px as f32).min(available_height / image_height_px as f32);
    let image_width = image_width_px as f32 * scale;
    let image_height = image_height_px as f32 * scale;
    let image_rect = Rect::new(
        image_band.x + (image_band.width - image_width) / 2.0,
        image_band.y + (image_band.height - image_height) / 2.0,
        image_width,
        image_height,
    );

    let caption_lines = wrap_caption(caption, cell.width, style, measure)?;
    let label_text = fit_label(label, cell.width - style.text_margin, style, measure);

    debug!(
        "cell '{}': image {:.1}x{:.1}mm at ({:.1}, {:.1}), {} caption line(s)",
        label,
        image_rect.width,
        image_rect.height,
        image_rect.x,
        image_rect.y,
        caption_lines.len()
    );

    Ok(CellLayout {
        caption_rect,
        caption_lines,
        image_rect,
        label_rect,
        label_text,
    })
}

/// Wrap the caption to the cell width and keep only the lines that fit the band.
fn wrap_caption(
    caption: &str,
    cell_width: f32,
    style: &CellStyle,
    measure: &dyn TextMeasure,
) -> Result<Vec<String>, Error> {
    let max_width = cell_width - style.text_margin;
    if !(max_width > 0.0) {
        return Err(Error::DegenerateLayout(format!(
            "cell width {:.1}mm leaves no room for text after a {:.1}mm margin",
            cell_width, style.text_margin
        )));
    }

    let size = style.caption_font_size;
    let mut lines = measure.wrap(caption, FontStyle::Regular, size, max_width);

    let capacity = (style.caption_band / line_height_mm(size)).floor() as usize;
    if lines.len() > capacity {
        warn!(
            "Caption needs {} lines but only {} fit in the caption band; truncating",
            lines.len(),
            capacity
        );
        lines.truncate(capacity);
        if let Some(last) = lines.last_mut() {
            end_with_ellipsis(last, FontStyle::Regular, size, max_width, measure);
        }
    }

    Ok(lines)
}

/// Shorten the label with an ellipsis when it is wider than `max_width`.
fn fit_label(label: &str, max_width: f32, style: &CellStyle, measure: &dyn TextMeasure) -> String {
    let size = style.label_font_size;
    let mut text = label.to_string();
    if measure.text_width(&text, FontStyle::Bold, size) > max_width {
        warn!("Label '{}' is wider than its cell; shortening", label);
        end_with_ellipsis(&mut text, FontStyle::Bold, size, max_width, measure);
    }
    text
}

/// Drop trailing characters until `text` plus an ellipsis fits, then append it.
fn end_with_ellipsis(
    text: &mut String,
    font: FontStyle,
    size: f32,
    max_width: f32,
    measure: &dyn TextMeasure,
) {
    while !text.is_empty() && measure.text_width(&format!("{}{}", text, ELLIPSIS), font, size) > max_width {
        text.pop();
    }
    text.push_str(ELLIPSIS);
}
