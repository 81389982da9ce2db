//! Letterhead logo decoding.
//!
//! A logo arrives as a data URI, a file path, or bare base64. JPEG bytes are
//! embedded as they are and only their header is read. PNG is flattened to
//! RGB with an optional alpha plane for the PDF soft mask.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, DynamicImage, GenericImageView, ImageDecoder, ImageFormat};
use serde::Serialize;

/// A decoded logo, ready to be placed and embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    #[serde(skip)]
    pub pixels: LogoPixels,
    pub width_px: u32,
    pub height_px: u32,
}

/// Pixel payload in the form the PDF writer embeds.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoPixels {
    /// Untouched JPEG stream, written with DCTDecode.
    Jpeg { data: Vec<u8>, color_space: ColorSpace },
    /// 8-bit RGB samples, plus a gray alpha plane when any pixel is translucent.
    Raw { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Rgb,
    Gray,
}

impl ColorSpace {
    pub fn pdf_name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "/DeviceRGB",
            ColorSpace::Gray => "/DeviceGray",
        }
    }
}

impl Logo {
    /// Read and decode a logo source.
    ///
    /// `src` is a `data:` URI with a base64 payload, a path starting with
    /// `/`, `./` or `../`, or bare base64.
    pub fn decode(src: &str) -> Result<Self, String> {
        let bytes = LogoSource::parse(src).read()?;
        match image::guess_format(&bytes) {
            Ok(ImageFormat::Jpeg) => Self::from_jpeg(bytes),
            Ok(ImageFormat::Png) => Self::from_png(&bytes),
            Ok(other) => Err(format!("Unsupported logo format {other:?} (expected JPEG or PNG)")),
            Err(_) => Err("Unrecognized logo data (expected JPEG or PNG)".to_string()),
        }
    }

    /// Size in points of the largest box with the logo's aspect ratio that
    /// fits `max_width` × `max_height`. Zero for an empty image.
    pub fn fit_box(&self, max_width: f64, max_height: f64) -> (f64, f64) {
        if self.width_px == 0 || self.height_px == 0 {
            return (0.0, 0.0);
        }
        let (w, h) = (self.width_px as f64, self.height_px as f64);
        let scale = (max_width / w).min(max_height / h);
        (w * scale, h * scale)
    }

    fn from_jpeg(data: Vec<u8>) -> Result<Self, String> {
        let ((width_px, height_px), color) = {
            let decoder = JpegDecoder::new(Cursor::new(data.as_slice()))
                .map_err(|e| format!("Invalid JPEG logo: {e}"))?;
            (decoder.dimensions(), decoder.color_type())
        };
        let color_space = match color {
            ColorType::L8 | ColorType::L16 => ColorSpace::Gray,
            _ => ColorSpace::Rgb,
        };
        Ok(Logo {
            pixels: LogoPixels::Jpeg { data, color_space },
            width_px,
            height_px,
        })
    }

    fn from_png(bytes: &[u8]) -> Result<Self, String> {
        let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| format!("Invalid PNG logo: {e}"))?;
        let (width_px, height_px) = img.dimensions();
        let alpha = if img.color().has_alpha() {
            alpha_plane(&img)
        } else {
            None
        };
        Ok(Logo {
            pixels: LogoPixels::Raw {
                rgb: img.into_rgb8().into_raw(),
                alpha,
            },
            width_px,
            height_px,
        })
    }
}

/// The alpha channel, or `None` when every pixel is opaque.
fn alpha_plane(img: &DynamicImage) -> Option<Vec<u8>> {
    let alpha: Vec<u8> = img.to_rgba8().pixels().map(|p| p[3]).collect();
    alpha.iter().any(|&a| a < u8::MAX).then_some(alpha)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogoSource<'a> {
    /// Everything after `data:`.
    DataUri(&'a str),
    File(&'a Path),
    Base64(&'a str),
}

impl<'a> LogoSource<'a> {
    fn parse(src: &'a str) -> Self {
        let src = src.trim();
        if let Some(rest) = src.strip_prefix("data:") {
            return LogoSource::DataUri(rest);
        }
        // Base64 may contain '/', so only explicit path prefixes name files.
        if ["/", "./", "../"].iter().any(|p| src.starts_with(p)) {
            return LogoSource::File(Path::new(src));
        }
        LogoSource::Base64(src)
    }

    fn read(self) -> Result<Vec<u8>, String> {
        match self {
            LogoSource::DataUri(rest) => {
                let (_, payload) = rest
                    .split_once(";base64,")
                    .ok_or_else(|| "Logo data URI must carry a base64 payload".to_string())?;
                decode_base64(payload)
            }
            LogoSource::File(path) => std::fs::read(path)
                .map_err(|e| format!("Failed to read logo file '{}': {e}", path.display())),
            LogoSource::Base64(data) => decode_base64(data),
        }
    }
}

fn decode_base64(data: &str) -> Result<Vec<u8>, String> {
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| format!("Logo is not valid base64: {e}"))
}
