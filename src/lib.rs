//! Lay out QR code images on printable PDF pages.
//!
//! Each image gets a grid cell with the shared URL caption above it and its
//! code (the file name without extension) below it.

pub mod assembler;
pub mod cell;
pub mod config;
pub mod decode;
mod error;
pub mod geometry;
pub mod item;
pub mod paginator;
pub mod sink;
pub mod text;

pub use assembler::{build, write_pdf, BuildOptions, DecodeFailure, DocumentSummary, DEFAULT_OUTPUT};
pub use cell::CellLayout;
pub use config::LayoutConfig;
pub use decode::{DecodedImage, ImageDecoder, RasterDecoder};
pub use error::Error;
pub use geometry::{CellStyle, PageGeometry, Rect};
pub use item::{ImageItem, ItemList, ItemSnapshot};
pub use paginator::CellAssignment;
pub use sink::{DocumentSink, PdfSink};
pub use text::{Align, FontStyle, HelveticaMetrics, TextMeasure, TextStyle};
