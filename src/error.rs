use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No images to lay out; add at least one PNG or JPEG file")]
    NoImages,
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("Cell too small for its contents: {0}")]
    DegenerateLayout(String),
    #[error("Unsupported file (expected PNG or JPEG): {0}")]
    UnsupportedFile(String),
    #[error("Failed to decode image {file}: {reason}")]
    Decode { file: String, reason: String },
    #[error("Invalid layout configuration: {0}")]
    Config(String),
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("No item at position {position} (list has {len})")]
    InvalidPosition { position: usize, len: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
