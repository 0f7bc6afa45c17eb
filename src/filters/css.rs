//! Primitive colour adjustments, following the CSS Filter Effects definitions.
//!
//! Each adjustment exists in two forms: a parameterized function
//! (`sepia(img, 0.5)`) and the registered zero-argument filter used when the
//! name is requested on its own. Amounts use CSS semantics: `1.0` is the full
//! effect for `grayscale`/`sepia` and the identity for `contrast`/`saturate`/
//! `brightness`; `hue_rotate` takes degrees.
//!
//! Channel values are processed as `0.0..=1.0` floats and clamped after every
//! step. Alpha is preserved; images without alpha stay without alpha.

use super::FilterFn;
use image::{DynamicImage, Rgba};

/// Registered primitive filters with their default amounts.
pub(crate) const FILTERS: &[(&str, FilterFn)] = &[
    ("contrast", |img| contrast(img, 1.2)),
    ("grayscale", |img| grayscale(img, 1.0)),
    ("hue_rotate", |img| hue_rotate(img, 90.0)),
    ("saturate", |img| saturate(img, 1.5)),
    ("sepia", |img| sepia(img, 1.0)),
];

/// RGB triple, each channel in `0.0..=1.0`.
pub(crate) type Rgb = [f32; 3];

/// A single colour adjustment with its amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjust {
    Brightness(f32),
    Contrast(f32),
    Grayscale(f32),
    HueRotate(f32),
    Saturate(f32),
    Sepia(f32),
}

impl Adjust {
    pub(crate) fn apply_rgb(self, c: Rgb) -> Rgb {
        let out = match self {
            Self::Brightness(a) => c.map(|v| v * a),
            Self::Contrast(a) => c.map(|v| (v - 0.5) * a + 0.5),
            Self::Grayscale(a) => mul(grayscale_matrix(a), c),
            Self::HueRotate(deg) => mul(hue_rotate_matrix(deg), c),
            Self::Saturate(a) => mul(saturate_matrix(a), c),
            Self::Sepia(a) => mul(sepia_matrix(a), c),
        };
        out.map(|v| v.clamp(0.0, 1.0))
    }

    /// Apply to a whole image.
    pub fn apply(self, img: &DynamicImage) -> DynamicImage {
        map_pixels(img, |c| self.apply_rgb(c))
    }
}

pub fn brightness(img: &DynamicImage, amount: f32) -> DynamicImage {
    Adjust::Brightness(amount).apply(img)
}

pub fn contrast(img: &DynamicImage, amount: f32) -> DynamicImage {
    Adjust::Contrast(amount).apply(img)
}

pub fn grayscale(img: &DynamicImage, amount: f32) -> DynamicImage {
    Adjust::Grayscale(amount).apply(img)
}

pub fn hue_rotate(img: &DynamicImage, degrees: f32) -> DynamicImage {
    Adjust::HueRotate(degrees).apply(img)
}

pub fn saturate(img: &DynamicImage, amount: f32) -> DynamicImage {
    Adjust::Saturate(amount).apply(img)
}

pub fn sepia(img: &DynamicImage, amount: f32) -> DynamicImage {
    Adjust::Sepia(amount).apply(img)
}

/// Run `f` over every pixel's RGB, keeping alpha and the input's alpha-ness.
pub(crate) fn map_pixels(img: &DynamicImage, f: impl Fn(Rgb) -> Rgb) -> DynamicImage {
    let mut buf = img.to_rgba8();
    for px in buf.pixels_mut() {
        let [r, g, b, a] = px.0;
        let [r, g, b] = f([r, g, b].map(|v| v as f32 / 255.0)).map(to_u8);
        *px = Rgba([r, g, b, a]);
    }
    let out = DynamicImage::ImageRgba8(buf);
    if img.color().has_alpha() {
        out
    } else {
        DynamicImage::ImageRgb8(out.to_rgb8())
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

type Matrix = [[f32; 3]; 3];

fn mul(m: Matrix, c: Rgb) -> Rgb {
    m.map(|row| row[0] * c[0] + row[1] * c[1] + row[2] * c[2])
}

fn grayscale_matrix(amount: f32) -> Matrix {
    let a = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
    ]
}

fn sepia_matrix(amount: f32) -> Matrix {
    let a = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * a, 0.769 - 0.769 * a, 0.189 - 0.189 * a],
        [0.349 - 0.349 * a, 0.686 + 0.314 * a, 0.168 - 0.168 * a],
        [0.272 - 0.272 * a, 0.534 - 0.534 * a, 0.131 + 0.869 * a],
    ]
}

fn saturate_matrix(s: f32) -> Matrix {
    let s = s.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn hue_rotate_matrix(degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}
