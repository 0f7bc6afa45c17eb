//! Image processing, on the pure-Rust `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff** | `image::guess_format` → MIME type |
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | `resize_exact` with a configurable kernel |
//! | **Filter** | a [`ResolvedFilter`](crate::filters::ResolvedFilter) applied to the decoded image |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use params::{FilterParams, Quality, ResizeParams, Sampling};
pub use rust_backend::RustBackend;
