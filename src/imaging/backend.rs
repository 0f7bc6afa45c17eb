//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam to the image library. It covers
//! the four things the transforms need: sniff a MIME type, identify
//! dimensions, resize, and apply a filter.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::{FilterParams, ResizeParams};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `resize` and `filter` write exactly one new file at the params' output
/// path and must fail rather than replace an existing file.
pub trait ImageBackend: Sync {
    /// Sniff the MIME type from file content (not the extension).
    fn probe_mime(&self, path: &Path) -> Result<String, BackendError>;

    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Execute a resize operation.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Execute a filter operation.
    fn filter(&self, params: &FilterParams) -> Result<(), BackendError>;
}
