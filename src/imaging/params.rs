//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`transform`](crate::transform) (which decides what to
//! produce once preconditions hold) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping
//! backends (e.g. for testing with a mock) without changing request logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`Sampling`]: Resampling kernel used by resize, selectable from config.
//! - [`ResizeParams`]: Source, output path, exact target dimensions, sampling, quality.
//! - [`FilterParams`]: Source, output path, resolved filter, quality.

use crate::filters::ResolvedFilter;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resampling kernel for resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sampling {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<Sampling> for FilterType {
    fn from(sampling: Sampling) -> Self {
        match sampling {
            Sampling::Nearest => FilterType::Nearest,
            Sampling::Triangle => FilterType::Triangle,
            Sampling::CatmullRom => FilterType::CatmullRom,
            Sampling::Gaussian => FilterType::Gaussian,
            Sampling::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Parameters for an exact resize (aspect ratio is not preserved).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub sampling: Sampling,
    pub quality: Quality,
}

/// Parameters for applying one named filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub filter: ResolvedFilter,
    pub quality: Quality,
}
