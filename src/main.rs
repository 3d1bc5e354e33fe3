// qr-sheet: Lay out QR code images on printable pages with a URL caption

use clap::Parser;
use qr_sheet::{write_pdf, DecodeFailure, Error, ItemList, LayoutConfig, DEFAULT_OUTPUT};
use std::path::PathBuf;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out QR code images on printable PDF pages")]
struct Args {
    /// QR code images (PNG or JPEG); the file name becomes the code label
    images: Vec<PathBuf>,

    /// URL printed above every code
    #[arg(short, long, default_value = "")]
    url: String,

    /// Output filename
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// PDF document title
    #[arg(short, long, default_value = "QR Codes")]
    title: String,

    /// Layout configuration file (JSON)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Remove the item at this 1-based position before generating (repeatable,
    /// applied in order; later items move up after each removal)
    #[arg(long, value_name = "N")]
    remove: Vec<usize>,

    /// Leave a blank slot for images that fail to decode instead of stopping
    #[arg(long)]
    skip_undecodable: bool,

    /// Print the numbered list of accepted images and exit
    #[arg(long)]
    list: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::parse();

    // Load layout
    let config = match &args.layout {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };

    // Collect images
    let mut items = ItemList::new();
    items.add_paths(&args.images)?;

    for position in &args.remove {
        let len = items.len();
        let index = position
            .checked_sub(1)
            .ok_or(Error::InvalidPosition { position: *position, len })?;
        let removed = items
            .remove(index)
            .map_err(|_| Error::InvalidPosition { position: *position, len })?;
        log::info!("Removed #{} ({})", position, removed.file_name);
    }

    if args.list {
        for (i, item) in items.iter().enumerate() {
            println!("{:>3}. {} ({})", i + 1, item.label, item.file_name);
        }
        return Ok(());
    }

    let on_decode_failure = if args.skip_undecodable {
        DecodeFailure::LeaveBlank
    } else {
        DecodeFailure::Abort
    };

    // Generate PDF
    let summary = write_pdf(
        &items.snapshot(),
        &config.geometry(),
        &config.style(),
        &args.url,
        &args.title,
        &args.output,
        on_decode_failure,
    )?;

    println!("✓ Generated: {}", summary.output.display());
    println!("  Codes: {}", summary.items);
    println!("  Pages: {}", summary.pages);
    if summary.blank_cells > 0 {
        println!("  Blank (undecodable): {}", summary.blank_cells);
    }

    Ok(())
}
