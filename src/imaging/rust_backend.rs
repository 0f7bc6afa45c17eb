//! Pure Rust image processing backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | MIME sniff | `image::guess_format` on the leading bytes |
//! | Identify | `image::image_dimensions` |
//! | Decode | `ImageReader` with content-guessed format |
//! | Resize | `DynamicImage::resize_exact` with the configured [`Sampling`](super::Sampling) |
//! | Filter | the resolved filter's function, see [`filters`](crate::filters) |
//! | Encode | format from the output extension; JPEG via `JpegEncoder` with quality |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{FilterParams, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Bytes read from the head of a file for MIME sniffing.
const SNIFF_LEN: u64 = 64;

/// Reported when the content matches no known image signature.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save an image to a path that must not exist yet, inferring format from extension.
///
/// A partially written file is removed if encoding fails.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path)
        .ok()
        .filter(|f| f.writing_enabled())
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "Unsupported output format: {}",
                path.display()
            ))
        })?;

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(BackendError::Io)?;
    let mut writer = BufWriter::new(file);

    let result = encode(img, format, quality, &mut writer)
        .and_then(|()| writer.flush().map_err(BackendError::Io));
    if result.is_err() {
        drop(writer);
        let _ = std::fs::remove_file(path);
    }
    result
}

fn encode(
    img: &DynamicImage,
    format: ImageFormat,
    quality: u32,
    writer: &mut BufWriter<File>,
) -> Result<(), BackendError> {
    let encoded = match format {
        // JPEG carries no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(writer, quality as u8)),
        other => img.write_to(writer, other),
    };
    encoded.map_err(|e| BackendError::ProcessingFailed(format!("{format:?} encode failed: {e}")))
}

impl ImageBackend for RustBackend {
    fn probe_mime(&self, path: &Path) -> Result<String, BackendError> {
        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
        let mime = image::guess_format(&head)
            .map(|f| f.to_mime_type())
            .unwrap_or(UNKNOWN_MIME);
        Ok(mime.to_string())
    }

    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, params.sampling.into());
        save_image(&resized, &params.output, params.quality.value())
    }

    fn filter(&self, params: &FilterParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let filtered = params.filter.apply(&img);
        save_image(&filtered, &params.output, params.quality.value())
    }
}
