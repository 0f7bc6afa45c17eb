//! Instagram-style presets.
//!
//! Every preset is a [`Recipe`]: solid colour [`Layer`]s composited over the
//! image with a W3C blend mode, followed by a chain of [`Adjust`]ments. The
//! whole recipe runs in a single pass over the pixels.
//!
//! The looks approximate the well-known CSS recreations of the Instagram
//! filters. Gradient and vignette layers are flattened to solid colours.

use super::FilterFn;
use super::css::{Adjust, Rgb, map_pixels};
use image::DynamicImage;

/// Separable blend modes from the W3C Compositing spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    SoftLight,
    Exclusion,
}

impl Blend {
    /// Blend one channel: `cb` is the backdrop (image), `cs` the layer colour.
    fn channel(self, cb: f32, cs: f32) -> f32 {
        match self {
            Self::Multiply => cb * cs,
            Self::Screen => screen(cb, cs),
            Self::Overlay => hard_light(cs, cb),
            Self::Darken => cb.min(cs),
            Self::Lighten => cb.max(cs),
            Self::ColorDodge => {
                if cb == 0.0 {
                    0.0
                } else if cs >= 1.0 {
                    1.0
                } else {
                    (cb / (1.0 - cs)).min(1.0)
                }
            }
            Self::ColorBurn => {
                if cb >= 1.0 {
                    1.0
                } else if cs == 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - cb) / cs).min(1.0)
                }
            }
            Self::SoftLight => {
                if cs <= 0.5 {
                    cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
                } else {
                    let d = if cb <= 0.25 {
                        ((16.0 * cb - 12.0) * cb + 4.0) * cb
                    } else {
                        cb.sqrt()
                    };
                    cb + (2.0 * cs - 1.0) * (d - cb)
                }
            }
            Self::Exclusion => cb + cs - 2.0 * cb * cs,
        }
    }
}

fn screen(cb: f32, cs: f32) -> f32 {
    cb + cs - cb * cs
}

fn hard_light(cb: f32, cs: f32) -> f32 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        screen(cb, 2.0 * cs - 1.0)
    }
}

/// A solid colour composited over the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub mode: Blend,
    pub color: [u8; 3],
    /// Layer opacity, `0.0..=1.0`.
    pub alpha: f32,
}

const fn layer(mode: Blend, r: u8, g: u8, b: u8, alpha: f32) -> Layer {
    Layer {
        mode,
        color: [r, g, b],
        alpha,
    }
}

impl Layer {
    fn composite(&self, c: Rgb) -> Rgb {
        let mut out = c;
        for (i, v) in out.iter_mut().enumerate() {
            let cs = self.color[i] as f32 / 255.0;
            let blended = self.mode.channel(c[i], cs);
            *v = ((1.0 - self.alpha) * c[i] + self.alpha * blended).clamp(0.0, 1.0);
        }
        out
    }
}

/// Layers first, then adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recipe {
    pub layers: &'static [Layer],
    pub adjust: &'static [Adjust],
}

impl Recipe {
    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        map_pixels(img, |c| {
            let c = self.layers.iter().fold(c, |c, l| l.composite(c));
            self.adjust.iter().fold(c, |c, a| a.apply_rgb(c))
        })
    }
}

use Adjust::{Brightness, Contrast, Grayscale, HueRotate, Saturate, Sepia};
use Blend::*;

/// Declares one public function per preset and the registration table.
macro_rules! presets {
    ($($name:ident => $recipe:expr;)+) => {
        $(
            pub fn $name(img: &DynamicImage) -> DynamicImage {
                const RECIPE: Recipe = $recipe;
                RECIPE.apply(img)
            }
        )+

        /// Registered presets.
        pub(crate) const FILTERS: &[(&str, FilterFn)] = &[$((stringify!($name), $name),)+];
    };
}

presets! {
    _1977 => Recipe {
        layers: &[layer(Screen, 243, 106, 188, 0.3)],
        adjust: &[Contrast(1.1), Brightness(1.1), Saturate(1.3)],
    };
    aden => Recipe {
        layers: &[layer(Darken, 66, 10, 14, 0.2)],
        adjust: &[HueRotate(-20.0), Contrast(0.9), Saturate(0.85), Brightness(1.2)],
    };
    brannan => Recipe {
        layers: &[layer(Lighten, 161, 44, 191, 0.31)],
        adjust: &[Sepia(0.5), Contrast(1.4)],
    };
    brooklyn => Recipe {
        layers: &[layer(Overlay, 168, 223, 193, 0.4)],
        adjust: &[Contrast(0.9), Brightness(1.1)],
    };
    clarendon => Recipe {
        layers: &[layer(Overlay, 127, 187, 227, 0.2)],
        adjust: &[Contrast(1.2), Saturate(1.35)],
    };
    earlybird => Recipe {
        layers: &[layer(Overlay, 208, 186, 142, 0.6)],
        adjust: &[Contrast(0.9), Sepia(0.2)],
    };
    gingham => Recipe {
        layers: &[layer(SoftLight, 230, 230, 250, 1.0)],
        adjust: &[Brightness(1.05), HueRotate(-10.0)],
    };
    hudson => Recipe {
        layers: &[layer(Multiply, 166, 177, 255, 0.5)],
        adjust: &[Brightness(1.2), Contrast(0.9), Saturate(1.1)],
    };
    inkwell => Recipe {
        layers: &[],
        adjust: &[Sepia(0.3), Contrast(1.1), Brightness(1.1), Grayscale(1.0)],
    };
    kelvin => Recipe {
        layers: &[
            layer(ColorDodge, 56, 44, 52, 1.0),
            layer(Overlay, 183, 125, 33, 1.0),
        ],
        adjust: &[],
    };
    lark => Recipe {
        layers: &[
            layer(ColorDodge, 34, 37, 63, 1.0),
            layer(Darken, 242, 242, 242, 0.8),
        ],
        adjust: &[Contrast(0.9)],
    };
    lofi => Recipe {
        layers: &[layer(Multiply, 34, 34, 34, 0.25)],
        adjust: &[Saturate(1.1), Contrast(1.5)],
    };
    maven => Recipe {
        layers: &[layer(Overlay, 3, 230, 26, 0.2)],
        adjust: &[Sepia(0.25), Brightness(0.95), Contrast(0.95), Saturate(1.5)],
    };
    mayfair => Recipe {
        layers: &[layer(Overlay, 255, 200, 200, 0.4)],
        adjust: &[Contrast(1.1), Saturate(1.1)],
    };
    moon => Recipe {
        layers: &[
            layer(SoftLight, 160, 160, 160, 1.0),
            layer(Lighten, 56, 56, 56, 1.0),
        ],
        adjust: &[Grayscale(1.0), Contrast(1.1), Brightness(1.1)],
    };
    nashville => Recipe {
        layers: &[
            layer(Darken, 247, 176, 153, 0.56),
            layer(Lighten, 0, 70, 150, 0.4),
        ],
        adjust: &[Sepia(0.2), Contrast(1.2), Brightness(1.05), Saturate(1.2)],
    };
    perpetua => Recipe {
        layers: &[layer(SoftLight, 0, 91, 154, 0.5)],
        adjust: &[],
    };
    reyes => Recipe {
        layers: &[layer(SoftLight, 239, 205, 173, 0.5)],
        adjust: &[Sepia(0.22), Brightness(1.1), Contrast(0.85), Saturate(0.75)],
    };
    rise => Recipe {
        layers: &[
            layer(Multiply, 236, 205, 169, 0.15),
            layer(Overlay, 232, 197, 152, 0.6),
        ],
        adjust: &[Brightness(1.05), Sepia(0.2), Contrast(0.9), Saturate(0.9)],
    };
    slumber => Recipe {
        layers: &[
            layer(Lighten, 69, 41, 12, 0.4),
            layer(SoftLight, 125, 105, 24, 0.5),
        ],
        adjust: &[Saturate(0.66), Brightness(1.05)],
    };
    stinson => Recipe {
        layers: &[layer(SoftLight, 240, 149, 128, 0.2)],
        adjust: &[Contrast(0.75), Saturate(0.85), Brightness(1.15)],
    };
    toaster => Recipe {
        layers: &[layer(Screen, 128, 78, 15, 1.0)],
        adjust: &[Contrast(1.5), Brightness(0.9)],
    };
    valencia => Recipe {
        layers: &[layer(Exclusion, 58, 3, 57, 0.5)],
        adjust: &[Contrast(1.08), Brightness(1.08), Sepia(0.08)],
    };
    walden => Recipe {
        layers: &[layer(Screen, 0, 68, 204, 0.3)],
        adjust: &[Brightness(1.1), HueRotate(-10.0), Sepia(0.3), Saturate(1.6)],
    };
    willow => Recipe {
        layers: &[layer(Overlay, 212, 169, 175, 0.5)],
        adjust: &[Grayscale(0.5), Contrast(0.95), Brightness(0.9)],
    };
    xpro2 => Recipe {
        layers: &[layer(ColorBurn, 230, 231, 224, 0.6)],
        adjust: &[Sepia(0.3)],
    };
}
