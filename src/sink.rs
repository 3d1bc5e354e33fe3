// Document output. `DocumentSink` is the drawing surface the assembler talks
// to; `PdfSink` implements it on top of printpdf.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Px,
};

use crate::decode::DecodedImage;
use crate::error::Error;
use crate::geometry::Rect;
use crate::text::{line_height_mm, pt_to_mm, Align, FontStyle, HelveticaMetrics, TextMeasure, TextStyle};

/// Cap height of Helvetica as a fraction of the font size
const CAP_HEIGHT: f32 = 0.718;

/// Drawing primitives used to assemble a document.
///
/// Rects use page coordinates: millimetres from the top-left corner. Nothing is
/// written anywhere until `save`.
pub trait DocumentSink {
    /// Text measurement matching the fonts this sink draws with.
    fn measure(&self) -> &dyn TextMeasure;

    /// Begin a document; the first page exists after this call.
    fn start(&mut self, page_width: f32, page_height: f32) -> Result<(), Error>;

    fn add_page(&mut self) -> Result<(), Error>;

    /// Draw lines top-aligned inside `rect`, one below the other.
    fn draw_wrapped_text(&mut self, lines: &[String], rect: Rect, style: TextStyle) -> Result<(), Error>;

    fn draw_image(&mut self, image: &DecodedImage, rect: Rect) -> Result<(), Error>;

    /// Draw a single line vertically centered inside `rect`.
    fn draw_text(&mut self, text: &str, rect: Rect, style: TextStyle) -> Result<(), Error>;

    fn save(&mut self, output: &Path) -> Result<(), Error>;
}

// ============================================================================
// PDF Sink
// ============================================================================

struct PdfState {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
    page_width: f32,
    page_height: f32,
    pages: usize,
}

pub struct PdfSink {
    title: String,
    metrics: HelveticaMetrics,
    state: Option<PdfState>,
}

impl PdfSink {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            metrics: HelveticaMetrics,
            state: None,
        }
    }

    fn state(&self) -> Result<&PdfState, Error> {
        self.state
            .as_ref()
            .ok_or_else(|| Error::Pdf("document not started".to_string()))
    }

    fn state_mut(&mut self) -> Result<&mut PdfState, Error> {
        self.state
            .as_mut()
            .ok_or_else(|| Error::Pdf("document not started".to_string()))
    }

    fn use_text(&self, text: &str, x_left: f32, baseline: f32, style: TextStyle) -> Result<(), Error> {
        let state = self.state()?;
        let font = match style.font {
            FontStyle::Regular => &state.font_regular,
            FontStyle::Bold => &state.font_bold,
        };
        state.layer.use_text(
            text,
            style.size_pt,
            Mm(x_left),
            Mm(state.page_height - baseline),
            font,
        );
        Ok(())
    }

    fn line_x(&self, text: &str, rect: Rect, style: TextStyle) -> f32 {
        match style.align {
            Align::Left => rect.x,
            Align::Center => {
                rect.center_x() - self.metrics.text_width(text, style.font, style.size_pt) / 2.0
            }
        }
    }
}

/// Baseline for a line whose box starts at `line_top`, centering the capitals.
fn baseline_in_line(line_top: f32, size_pt: f32) -> f32 {
    let line_h = line_height_mm(size_pt);
    line_top + (line_h + pt_to_mm(size_pt * CAP_HEIGHT)) / 2.0
}

impl DocumentSink for PdfSink {
    fn measure(&self) -> &dyn TextMeasure {
        &self.metrics
    }

    fn start(&mut self, page_width: f32, page_height: f32) -> Result<(), Error> {
        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, Mm(page_width), Mm(page_height), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Pdf(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Pdf(e.to_string()))?;

        self.state = Some(PdfState {
            doc,
            layer,
            font_regular,
            font_bold,
            page_width,
            page_height,
            pages: 1,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), Error> {
        let state = self.state_mut()?;
        state.pages += 1;
        let (page, layer) = state.doc.add_page(
            Mm(state.page_width),
            Mm(state.page_height),
            format!("Page {}", state.pages),
        );
        state.layer = state.doc.get_page(page).get_layer(layer);
        debug!("Started page {}", state.pages);
        Ok(())
    }

    fn draw_wrapped_text(&mut self, lines: &[String], rect: Rect, style: TextStyle) -> Result<(), Error> {
        let line_h = line_height_mm(style.size_pt);
        for (i, line) in lines.iter().enumerate() {
            let baseline = baseline_in_line(rect.y + i as f32 * line_h, style.size_pt);
            let x = self.line_x(line, rect, style);
            self.use_text(line, x, baseline, style)?;
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Rect) -> Result<(), Error> {
        let state = self.state()?;

        let xobject = Image::from(ImageXObject {
            width: Px(image.width_px as usize),
            height: Px(image.height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: image.rgb.clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI = pixels / (mm / 25.4)
        let dpi = image.width_px as f32 / (rect.width / 25.4);

        xobject.add_to_layer(
            state.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x)),
                translate_y: Some(Mm(state.page_height - rect.bottom())),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn draw_text(&mut self, text: &str, rect: Rect, style: TextStyle) -> Result<(), Error> {
        let line_h = line_height_mm(style.size_pt);
        let baseline = baseline_in_line(rect.y + (rect.height - line_h) / 2.0, style.size_pt);
        let x = self.line_x(text, rect, style);
        self.use_text(text, x, baseline, style)
    }

    fn save(&mut self, output: &Path) -> Result<(), Error> {
        let state = self
            .state
            .take()
            .ok_or_else(|| Error::Pdf("nothing to save".to_string()))?;

        // The output name only ever holds a complete document
        let partial = partial_path(output);
        let written = write_document(state.doc, &partial)
            .and_then(|_| fs::rename(&partial, output).map_err(Error::from));
        if written.is_err() {
            fs::remove_file(&partial).ok();
        }
        written
    }
}

fn write_document(doc: PdfDocumentReference, path: &Path) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(|e| Error::Pdf(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Sibling path used while the document is being written.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "document".into());
    name.push(".part");
    output.with_file_name(name)
}
