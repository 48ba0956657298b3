//! Budgeted re-encoding of uploaded photos.
//!
//! Photos are downscaled so the longest side fits `max_side`, stored as JPEG
//! unless they carry an alpha channel, and re-encoded at decreasing JPEG
//! quality until they fit the byte budget or the quality floor is reached.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};

use crate::errors::AppError;
use crate::views::filters::b64encode;

pub const DEFAULT_MAX_SIDE: u32 = 1600;
pub const DEFAULT_QUALITY_START: u8 = 85;
pub const DEFAULT_QUALITY_FLOOR: u8 = 40;
const QUALITY_STEP: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLimits {
    pub max_bytes: usize,
    pub max_side: u32,
    pub quality_start: u8,
    pub quality_floor: u8,
}

impl CompressionLimits {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            max_side: DEFAULT_MAX_SIDE,
            quality_start: DEFAULT_QUALITY_START,
            quality_floor: DEFAULT_QUALITY_FLOOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    /// `data:` URL for inline use (vision prompts, HTML previews).
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.content_type(),
            b64encode(&self.bytes)
        )
    }
}

/// Re-encodes `raw` to fit `limits.max_bytes` when possible.
///
/// The result can still exceed the budget when even the quality floor is too
/// large; callers store it anyway. CPU-bound: run it on a blocking thread.
pub fn compress_image_to_limit(
    raw: &[u8],
    limits: &CompressionLimits,
) -> Result<CompressedImage, AppError> {
    let image = decode_oriented(raw)?;
    let image = normalize_color(image);
    let image = fit_within(image, limits.max_side);

    let (mut bytes, mut format) = if image.color().has_alpha() {
        (encode_png(&image)?, OutputFormat::Png)
    } else {
        let (bytes, _) = step_down_quality(limits, |q| encode_jpeg(&image, q))?;
        (bytes, OutputFormat::Jpeg)
    };

    if bytes.len() > limits.max_bytes && format == OutputFormat::Png {
        let flattened = DynamicImage::ImageRgb8(image.to_rgb8());
        let (jpeg, _) = step_down_quality(limits, |q| encode_jpeg(&flattened, q))?;
        bytes = jpeg;
        format = OutputFormat::Jpeg;
    }

    Ok(CompressedImage {
        bytes,
        format,
        width: image.width(),
        height: image.height(),
    })
}

/// Encodes at `quality_start`, then lowers quality in fixed steps while the
/// output is over budget and quality is above the floor.
fn step_down_quality<F>(limits: &CompressionLimits, mut encode: F) -> Result<(Vec<u8>, u8), AppError>
where
    F: FnMut(u8) -> Result<Vec<u8>, AppError>,
{
    let mut quality = limits.quality_start;
    let mut data = encode(quality)?;
    while data.len() > limits.max_bytes && quality > limits.quality_floor {
        quality = quality
            .saturating_sub(QUALITY_STEP)
            .max(limits.quality_floor);
        data = encode(quality)?;
    }
    Ok((data, quality))
}

fn decode_oriented(raw: &[u8]) -> Result<DynamicImage, AppError> {
    let mut decoder = ImageReader::new(Cursor::new(raw))
        .with_guessed_format()
        .map_err(|e| AppError::Image(format!("Unreadable image: {e}")))?
        .into_decoder()
        .map_err(|e| AppError::Image(format!("Unsupported image: {e}")))?;
    let orientation = decoder
        .orientation()
        .map_err(|e| AppError::Image(format!("Unreadable image metadata: {e}")))?;
    let mut image = DynamicImage::from_decoder(decoder)
        .map_err(|e| AppError::Image(format!("Could not decode image: {e}")))?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Keeps greyscale and RGB, keeps an alpha channel when there is one, and
/// converts everything else (16-bit, float, palette-expanded) to 8-bit.
fn normalize_color(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 | ColorType::Rgba8 => image,
        ColorType::L16 => DynamicImage::ImageLuma8(image.into_luma8()),
        c if c.has_alpha() => DynamicImage::ImageRgba8(image.into_rgba8()),
        _ => DynamicImage::ImageRgb8(image.into_rgb8()),
    }
}

fn fit_within(image: DynamicImage, max_side: u32) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    let scale = w.max(h) as f64 / max_side.max(1) as f64;
    if scale <= 1.0 {
        return image;
    }
    let new_w = ((w as f64 / scale) as u32).max(1);
    let new_h = ((h as f64 / scale) as u32).max(1);
    image.resize_exact(new_w, new_h, FilterType::Lanczos3)
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, AppError> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|e| AppError::Image(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, AppError> {
    let mut out = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilter::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| AppError::Image(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}
