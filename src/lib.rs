//! # imgtweak
//!
//! Resize an image to a target size, or apply a named Instagram-style filter,
//! and never write anything until every precondition holds.
//!
//! # Lifecycle
//!
//! Both operations follow the same shape:
//!
//! ```text
//! 1. Construct   raw arguments  →  request   (size / filter name resolved once)
//! 2. Check       request        →  Checked   (ordered rules, first failure wins)
//! 3. Execute     Checked        →  one file  (errors propagate, never swallowed)
//! ```
//!
//! ```no_run
//! use imgtweak::imaging::RustBackend;
//! use imgtweak::size::SizeArg;
//! use imgtweak::transform::{FilterImage, ResizeImage, Transform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = RustBackend::new();
//!
//! ResizeImage::new("input.png", "output.png", SizeArg::from((200, 150)))?
//!     .check(&backend)?
//!     .execute(&backend)?;
//!
//! FilterImage::new("input.jpg", "input-lofi.jpg", "lofi")
//!     .check(&backend)?
//!     .execute(&backend)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`size`] | Normalizes a mapping, pair or scalar size argument to a canonical `Size` |
//! | [`check`] | Ordered precondition rules for input, output, size and filter |
//! | [`filters`] | Closed registry of filter names → families and functions; the two families |
//! | [`transform`] | `ResizeImage` / `FilterImage` requests, the `Checked` token, execution errors |
//! | [`imaging`] | Backend seam over the `image` crate: sniff, identify, resize, filter |
//! | [`config`] | Optional `config.toml`: resampling kernel, JPEG quality |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Code From Names
//!
//! A filter name is only ever used as a key into a table built at startup.
//! Unknown names stay unresolved and fail the check; there is no default
//! filter and no way for a name to reach anything outside the table.
//!
//! ## Checked Is a Type
//!
//! `check()` consumes the request and hands back a `Checked<T>`. Only that
//! type can execute, so running a transform whose checks failed, or never
//! ran, does not compile.
//!
//! ## Never Overwrite
//!
//! The output rule rejects an existing file, and the backend additionally
//! creates the output with create-new semantics. A file that appears between
//! check and execute turns into an execution error rather than data loss.

pub mod check;
pub mod config;
pub mod filters;
pub mod imaging;
pub mod output;
pub mod size;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_helpers;
