// Drives pagination and cell layout across a snapshot of items, issuing draw
// calls to a sink and saving once at the end.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};

use crate::cell;
use crate::decode::{ImageDecoder, RasterDecoder};
use crate::error::Error;
use crate::geometry::{CellStyle, PageGeometry};
use crate::item::ItemSnapshot;
use crate::paginator;
use crate::sink::{DocumentSink, PdfSink};
use crate::text::{FontStyle, TextStyle};

/// Output file name used when none is given
pub const DEFAULT_OUTPUT: &str = "qr-codes.pdf";

/// What to do when an image cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeFailure {
    /// Stop the pass and report the file; nothing is saved.
    #[default]
    Abort,
    /// Draw caption and label but leave the image slot empty.
    LeaveBlank,
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output: PathBuf,
    pub on_decode_failure: DecodeFailure,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            on_decode_failure: DecodeFailure::Abort,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub items: usize,
    pub pages: usize,
    pub blank_cells: usize,
    pub output: PathBuf,
}

/// Lay out every item of `snapshot` and save the document.
///
/// Input is validated before the sink is touched: an empty snapshot or a
/// geometry that leaves no room for the image produces an error and no calls.
pub fn build<D, S>(
    snapshot: &ItemSnapshot,
    geometry: &PageGeometry,
    style: &CellStyle,
    caption: &str,
    decoder: &mut D,
    sink: &mut S,
    options: &BuildOptions,
) -> Result<DocumentSummary, Error>
where
    D: ImageDecoder + ?Sized,
    S: DocumentSink + ?Sized,
{
    let t0 = Instant::now();

    if snapshot.is_empty() {
        return Err(Error::NoImages);
    }
    geometry.validate()?;
    style.validate()?;

    let assignments = paginator::assign(snapshot.len(), geometry);

    // Lay out a unit image first so a degenerate cell fails before anything is drawn
    cell::layout(assignments[0].cell, caption, "", 1, 1, style, sink.measure())?;

    let caption_style = TextStyle::centered(FontStyle::Regular, style.caption_font_size);
    let label_style = TextStyle::centered(FontStyle::Bold, style.label_font_size);

    sink.start(geometry.page_width, geometry.page_height)?;

    let mut blank_cells = 0;
    for assignment in &assignments {
        let item = &snapshot.items[assignment.index];

        if assignment.starts_new_page() {
            sink.add_page()?;
        }

        let decoded = match decoder.decode(item) {
            Ok(decoded) => Some(decoded),
            Err(e) if options.on_decode_failure == DecodeFailure::LeaveBlank => {
                warn!("Leaving '{}' blank: {}", item.label, e);
                blank_cells += 1;
                None
            }
            Err(e) => return Err(e),
        };

        // A failed decode still gets caption and label in the right place
        let (width_px, height_px) = decoded
            .as_ref()
            .map(|d| (d.width_px, d.height_px))
            .unwrap_or((1, 1));
        let layout = cell::layout(
            assignment.cell,
            caption,
            &item.label,
            width_px,
            height_px,
            style,
            sink.measure(),
        )?;

        debug!(
            "Item {} '{}' -> page {}, column {}, row {}",
            assignment.index, item.label, assignment.page_index, assignment.column_index, assignment.row_index
        );

        sink.draw_wrapped_text(&layout.caption_lines, layout.caption_rect, caption_style)?;
        if let Some(decoded) = &decoded {
            sink.draw_image(decoded, layout.image_rect)?;
        }
        sink.draw_text(&layout.label_text, layout.label_rect, label_style)?;
    }

    let t_layout = t0.elapsed();
    sink.save(&options.output)?;
    let t_total = t0.elapsed();

    let pages = paginator::page_count(snapshot.len(), geometry);
    info!(
        "Timing: layout={:.1}ms, save={:.1}ms, total={:.1}ms ({} items on {} pages, list version {})",
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        snapshot.len(),
        pages,
        snapshot.version,
    );

    Ok(DocumentSummary {
        items: snapshot.len(),
        pages,
        blank_cells,
        output: options.output.clone(),
    })
}

/// Convenience wrapper: lay out `snapshot` into a PDF at `output`.
pub fn write_pdf(
    snapshot: &ItemSnapshot,
    geometry: &PageGeometry,
    style: &CellStyle,
    caption: &str,
    title: &str,
    output: &Path,
    on_decode_failure: DecodeFailure,
) -> Result<DocumentSummary, Error> {
    let mut decoder = RasterDecoder;
    let mut sink = PdfSink::new(title);
    let options = BuildOptions {
        output: output.to_path_buf(),
        on_decode_failure,
    };
    build(snapshot, geometry, style, caption, &mut decoder, &mut sink, &options)
}
