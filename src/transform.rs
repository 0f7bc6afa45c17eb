//! Resize and filter requests.
//!
//! Both pipelines share one lifecycle:
//!
//! ```text
//! new()/from_options()  →  check()  →  Checked<T>  →  execute()
//!   (size / filter           (rules 1–7,               (one new file
//!    resolved once)           fail fast)                at output)
//! ```
//!
//! [`Transform::check`] consumes the request. On success it returns a
//! [`Checked`] token, the only type with an `execute` method; on failure the
//! request is gone and a new one must be built to retry. Execution failures
//! are returned as [`ExecutionError`], never swallowed.
//!
//! Nothing locks the output path between `check` and `execute`. The backend
//! opens the output with create-new semantics, so a file that appears in
//! between makes `execute` fail instead of being overwritten.

use crate::check::{self, CheckError};
use crate::filters::{FilterRegistry, ResolvedFilter};
use crate::imaging::{BackendError, FilterParams, ImageBackend, Quality, ResizeParams, Sampling};
use crate::size::{Size, SizeArg, SizeError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
#[error("Failed to write {}: {source}", .output.display())]
pub struct ExecutionError {
    pub output: PathBuf,
    #[source]
    pub source: BackendError,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("Missing 'filter' option")]
    MissingFilter,
    #[error("The 'filter' option must be a string, got {0}")]
    FilterNotAString(Value),
}

/// A request that can be validated and then executed.
pub trait Transform: Sized {
    /// What the request-specific checks prove, handed to `run`.
    type Plan;

    fn input(&self) -> &Path;

    fn output(&self) -> &Path;

    /// Rules that only apply to this kind of request (after rules 1–5).
    fn check_specific(&self) -> Result<Self::Plan, CheckError>;

    /// Perform the transform. Only reachable through [`Checked::execute`].
    fn run(&self, plan: &Self::Plan, backend: &impl ImageBackend) -> Result<(), BackendError>;

    /// Run every precondition in order, stopping at the first violation.
    fn check(self, backend: &impl ImageBackend) -> Result<Checked<Self>, CheckError> {
        check::check_input(self.input(), backend)?;
        check::check_output(self.output())?;
        let plan = self.check_specific()?;
        Ok(Checked {
            request: self,
            plan,
        })
    }
}

/// A request whose preconditions all held.
pub struct Checked<T: Transform> {
    request: T,
    plan: T::Plan,
}

impl<T: Transform> Checked<T> {
    pub fn request(&self) -> &T {
        &self.request
    }

    /// What the request-specific checks established.
    pub fn plan(&self) -> &T::Plan {
        &self.plan
    }

    /// Perform the transform, creating exactly one file at the output path.
    ///
    /// Returns the path written.
    pub fn execute(self, backend: &impl ImageBackend) -> Result<PathBuf, ExecutionError> {
        let output = self.request.output().to_path_buf();
        match self.request.run(&self.plan, backend) {
            Ok(()) => {
                info!(output = %output.display(), "wrote image");
                Ok(output)
            }
            Err(source) => Err(ExecutionError { output, source }),
        }
    }
}

// ============================================================================
// Resize
// ============================================================================

/// Resize `input` to an exact size and write it to `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeImage {
    input: PathBuf,
    output: PathBuf,
    size: Size,
    sampling: Sampling,
    quality: Quality,
}

impl ResizeImage {
    /// Build a request, resolving `size` to its canonical form.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        size: SizeArg,
    ) -> Result<Self, SizeError> {
        let size = size.resolve()?;
        Ok(Self {
            input: input.into(),
            output: output.into(),
            size,
            sampling: Sampling::default(),
            quality: Quality::default(),
        })
    }

    /// Build from an options mapping.
    ///
    /// A `size` entry (mapping, pair or integer) wins; otherwise the options
    /// themselves must carry `width` and `height`.
    pub fn from_options(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        options: &Map<String, Value>,
    ) -> Result<Self, SizeError> {
        let size = match options.get("size") {
            Some(value) => SizeArg::from_value(value.clone())?,
            None => SizeArg::Mapping(options.clone()),
        };
        Self::new(input, output, size)
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// The canonical target size.
    pub fn size(&self) -> Size {
        self.size
    }
}

impl Transform for ResizeImage {
    type Plan = (u32, u32);

    fn input(&self) -> &Path {
        &self.input
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn check_specific(&self) -> Result<(u32, u32), CheckError> {
        check::check_size(self.size)
    }

    fn run(&self, plan: &(u32, u32), backend: &impl ImageBackend) -> Result<(), BackendError> {
        let (width, height) = *plan;
        debug!(input = %self.input.display(), width, height, "resizing");
        backend.resize(&ResizeParams {
            source: self.input.clone(),
            output: self.output.clone(),
            width,
            height,
            sampling: self.sampling,
            quality: self.quality,
        })
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Apply a named filter to `input` and write it to `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterImage {
    input: PathBuf,
    output: PathBuf,
    requested: String,
    filter: Option<ResolvedFilter>,
    quality: Quality,
}

impl FilterImage {
    /// Build a request against the builtin registry.
    ///
    /// An unknown name does not fail here; it fails [`check`](Transform::check).
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, name: &str) -> Self {
        Self::with_registry(input, output, name, FilterRegistry::builtin())
    }

    pub fn with_registry(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        name: &str,
        registry: &FilterRegistry,
    ) -> Self {
        let filter = registry.resolve(name);
        debug!(name, resolved = ?filter.map(|f| f.qualified_name()), "resolved filter");
        Self {
            input: input.into(),
            output: output.into(),
            requested: name.to_string(),
            filter,
            quality: Quality::default(),
        }
    }

    /// Build from an options mapping carrying a `filter` string.
    pub fn from_options(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        options: &Map<String, Value>,
    ) -> Result<Self, OptionsError> {
        let name = match options.get("filter") {
            None => return Err(OptionsError::MissingFilter),
            Some(Value::String(name)) => name,
            Some(other) => return Err(OptionsError::FilterNotAString(other.clone())),
        };
        Ok(Self::new(input, output, name))
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// The name as requested.
    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// The registry match, if the name was known.
    pub fn filter(&self) -> Option<ResolvedFilter> {
        self.filter
    }
}

impl Transform for FilterImage {
    type Plan = ResolvedFilter;

    fn input(&self) -> &Path {
        &self.input
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn check_specific(&self) -> Result<ResolvedFilter, CheckError> {
        check::check_filter(&self.input, &self.requested, self.filter)
    }

    fn run(&self, plan: &ResolvedFilter, backend: &impl ImageBackend) -> Result<(), BackendError> {
        debug!(input = %self.input.display(), filter = %plan.qualified_name(), "filtering");
        backend.filter(&FilterParams {
            source: self.input.clone(),
            output: self.output.clone(),
            filter: *plan,
            quality: self.quality,
        })
    }
}
