// Turning uploaded file bytes into a drawable RGB bitmap.

use ::image::{DynamicImage, Rgba, RgbImage};

use crate::error::Error;
use crate::item::ImageItem;

/// Decoded pixels ready to embed: 8-bit RGB, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

pub trait ImageDecoder {
    fn decode(&mut self, item: &ImageItem) -> Result<DecodedImage, Error>;
}

/// Decoder backed by the `image` crate (PNG and JPEG).
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&mut self, item: &ImageItem) -> Result<DecodedImage, Error> {
        let img = ::image::load_from_memory(&item.bytes).map_err(|e| Error::Decode {
            file: item.file_name.clone(),
            reason: e.to_string(),
        })?;
        let rgb = flatten_on_white(&img);
        let (width_px, height_px) = rgb.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(Error::Decode {
                file: item.file_name.clone(),
                reason: "image has no pixels".to_string(),
            });
        }
        Ok(DecodedImage {
            width_px,
            height_px,
            rgb: rgb.into_raw(),
        })
    }
}

/// Composite any transparency against a white background.
fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba_image = img.to_rgba8();
    let (width_px, height_px) = rgba_image.dimensions();
    let mut rgb_image = RgbImage::new(width_px, height_px);
    for (x, y, pixel) in rgba_image.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let bg = 255.0;
        let out_r = (r as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_g = (g as f32 * alpha + bg * (1.0 - alpha)) as u8;
        let out_b = (b as f32 * alpha + bg * (1.0 - alpha)) as u8;
        rgb_image.put_pixel(x, y, ::image::Rgb([out_r, out_g, out_b]));
    }
    rgb_image
}
