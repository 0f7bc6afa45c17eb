//! Precondition validation.
//!
//! Before any transform may write, its request runs a fixed sequence of checks
//! and stops at the first violation:
//!
//! | # | Rule | Failure |
//! |---|---|---|
//! | 1 | input exists and is a regular file | [`CheckError::InputNotFound`] |
//! | 2 | input is not empty | [`CheckError::EmptyInput`] |
//! | 3 | input content sniffs as `image/*` | [`CheckError::NotAnImage`] |
//! | 4 | output is not an existing file | [`CheckError::OutputExists`] |
//! | 5 | output is not an existing directory | [`CheckError::OutputIsDirectory`] |
//! | 6 | *resize:* width and height are positive and the output fits [`MAX_OUTPUT_BYTES`] | [`CheckError::NonPositiveSize`], [`CheckError::SizeTooLarge`] |
//! | 7 | *filter:* input is not a symlink, filter name resolved | [`CheckError::SymlinkInput`], [`CheckError::UnresolvedFilter`] |
//!
//! Checks only read metadata and the first bytes of the input; none of them
//! create or modify files. Violations are never aggregated.

use crate::filters::ResolvedFilter;
use crate::imaging::ImageBackend;
use crate::size::Size;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Input file is empty: {}", .0.display())]
    EmptyInput(PathBuf),
    #[error("Input does not look like an image ({mime}): {}", .path.display())]
    NotAnImage { path: PathBuf, mime: String },
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    #[error("Output must be a file, not a directory: {}", .0.display())]
    OutputIsDirectory(PathBuf),
    #[error("Width and height must be positive integers, got {0}")]
    NonPositiveSize(Size),
    #[error("Size {0} is too large, the output would exceed {max} bytes", max = MAX_OUTPUT_BYTES)]
    SizeTooLarge(Size),
    #[error("Input must not be a symbolic link: {}", .0.display())]
    SymlinkInput(PathBuf),
    #[error("Unknown filter '{0}'")]
    UnresolvedFilter(String),
}

/// Rules 1–3: the input is a non-empty regular file with image content.
pub fn check_input(input: &Path, backend: &impl ImageBackend) -> Result<(), CheckError> {
    debug!(input = %input.display(), "checking input");
    if !input.is_file() {
        return Err(CheckError::InputNotFound(input.to_path_buf()));
    }

    let len = fs::metadata(input)
        .map_err(|_| CheckError::InputNotFound(input.to_path_buf()))?
        .len();
    if len == 0 {
        return Err(CheckError::EmptyInput(input.to_path_buf()));
    }

    let mime = backend
        .probe_mime(input)
        .unwrap_or_else(|e| format!("unreadable: {e}"));
    debug!(input = %input.display(), %mime, "probed input");
    if !mime.starts_with("image/") {
        return Err(CheckError::NotAnImage {
            path: input.to_path_buf(),
            mime,
        });
    }
    Ok(())
}

/// Rules 4–5: nothing exists at the output path that could be clobbered.
pub fn check_output(output: &Path) -> Result<(), CheckError> {
    debug!(output = %output.display(), "checking output");
    if output.is_file() {
        return Err(CheckError::OutputExists(output.to_path_buf()));
    }
    if output.is_dir() {
        return Err(CheckError::OutputIsDirectory(output.to_path_buf()));
    }
    Ok(())
}

/// Largest output buffer a resize may allocate, in bytes (RGBA8).
///
/// Matches the `image` crate's default decoder allocation limit.
pub const MAX_OUTPUT_BYTES: u64 = 512 * 1024 * 1024;

/// Rule 6: the resolved size is usable. Returns it as `(width, height)` in pixels.
pub fn check_size(size: Size) -> Result<(u32, u32), CheckError> {
    if !size.is_positive() {
        return Err(CheckError::NonPositiveSize(size));
    }
    let (Ok(width), Ok(height)) = (u32::try_from(size.width), u32::try_from(size.height)) else {
        return Err(CheckError::SizeTooLarge(size));
    };
    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(4));
    match bytes {
        Some(bytes) if bytes <= MAX_OUTPUT_BYTES => Ok((width, height)),
        _ => Err(CheckError::SizeTooLarge(size)),
    }
}

/// Rule 7: the input is not a symlink and the requested name resolved.
pub fn check_filter(
    input: &Path,
    requested: &str,
    resolved: Option<ResolvedFilter>,
) -> Result<ResolvedFilter, CheckError> {
    let is_symlink = fs::symlink_metadata(input)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if is_symlink {
        return Err(CheckError::SymlinkInput(input.to_path_buf()));
    }
    resolved.ok_or_else(|| CheckError::UnresolvedFilter(requested.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterRegistry;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::create_test_png;
    use tempfile::TempDir;

    #[test]
    fn missing_input_fails_before_probing() {
        let backend = MockBackend::with_mime("image/png");
        let err = check_input(Path::new("/nonexistent/in.png"), &backend).unwrap_err();
        assert!(matches!(err, CheckError::InputNotFound(_)));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn directory_input_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = check_input(tmp.path(), &RustBackend::new()).unwrap_err();
        assert!(matches!(err, CheckError::InputNotFound(_)));
    }

    #[test]
    fn empty_input_fails_before_probing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.png");
        fs::write(&path, b"").unwrap();

        let backend = MockBackend::with_mime("image/png");
        let err = check_input(&path, &backend).unwrap_err();
        assert!(matches!(err, CheckError::EmptyInput(_)));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn non_image_content_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("text.png");
        fs::write(&path, "hello").unwrap();

        let err = check_input(&path, &RustBackend::new()).unwrap_err();
        assert!(matches!(err, CheckError::NotAnImage { .. }));
    }

    #[test]
    fn probe_failure_counts_as_not_an_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("in.png");
        fs::write(&path, b"x").unwrap();

        // MockBackend without a mime errors on probe
        let backend = MockBackend::new();
        let err = check_input(&path, &backend).unwrap_err();
        assert!(matches!(err, CheckError::NotAnImage { .. }));
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Probe(path.to_string_lossy().to_string())]
        );
    }

    #[test]
    fn valid_png_passes_input_checks() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("in.png");
        create_test_png(&path, 10, 10);
        assert!(check_input(&path, &RustBackend::new()).is_ok());
    }

    #[test]
    fn existing_output_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        fs::write(&path, b"old").unwrap();
        assert!(matches!(
            check_output(&path),
            Err(CheckError::OutputExists(_))
        ));
    }

    #[test]
    fn output_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            check_output(tmp.path()),
            Err(CheckError::OutputIsDirectory(_))
        ));
    }

    #[test]
    fn fresh_output_passes() {
        let tmp = TempDir::new().unwrap();
        assert!(check_output(&tmp.path().join("new.png")).is_ok());
    }

    #[test]
    fn size_must_be_positive() {
        assert!(matches!(
            check_size(Size::new(-1, 5)),
            Err(CheckError::NonPositiveSize(_))
        ));
        assert!(matches!(
            check_size(Size::new(5, 0)),
            Err(CheckError::NonPositiveSize(_))
        ));
        assert_eq!(check_size(Size::new(5, 7)).unwrap(), (5, 7));
    }

    #[test]
    fn size_must_fit_u32() {
        let err = check_size(Size::new(i64::from(u32::MAX) + 1, 5)).unwrap_err();
        assert!(matches!(err, CheckError::SizeTooLarge(_)));
    }

    #[test]
    fn output_buffer_must_fit_allocation_cap() {
        let max = i64::from(u32::MAX);
        for size in [
            Size::new(max, max),
            Size::new(100_000, 100_000),
            Size::new(max, 1),
        ] {
            assert!(
                matches!(check_size(size), Err(CheckError::SizeTooLarge(_))),
                "{size} should be too large"
            );
        }
    }

    #[test]
    fn size_at_allocation_cap_passes() {
        // 8192 * 8192 * 4 bytes is exactly the cap
        assert_eq!(check_size(Size::square(8192)).unwrap(), (8192, 8192));
        assert!(matches!(
            check_size(Size::new(8192, 8193)),
            Err(CheckError::SizeTooLarge(_))
        ));
    }

    #[test]
    fn unresolved_filter_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("in.png");
        create_test_png(&path, 2, 2);

        let err = check_filter(&path, "not_a_real_filter", None).unwrap_err();
        assert!(matches!(err, CheckError::UnresolvedFilter(name) if name == "not_a_real_filter"));
    }

    #[test]
    fn resolved_filter_passes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("in.png");
        create_test_png(&path, 2, 2);

        let resolved = FilterRegistry::builtin().resolve("lofi");
        assert_eq!(check_filter(&path, "lofi", resolved).unwrap(), resolved.unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_input_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("in.png");
        create_test_png(&target, 2, 2);
        let link = tmp.path().join("link.png");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let resolved = FilterRegistry::builtin().resolve("lofi");
        let err = check_filter(&link, "lofi", resolved).unwrap_err();
        assert!(matches!(err, CheckError::SymlinkInput(_)));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_reported_before_unknown_filter() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("in.png");
        create_test_png(&target, 2, 2);
        let link = tmp.path().join("link.png");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = check_filter(&link, "not_a_real_filter", None).unwrap_err();
        assert!(matches!(err, CheckError::SymlinkInput(_)));
    }
}
