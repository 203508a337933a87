use std::path::PathBuf;

use thiserror::Error;

use crate::model::StringId;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Comparison itself is a pure computation over already-loaded data and cannot fail; errors
/// originate at the seam to the Code Analysis Provider, either while loading a package or while
/// resolving entries in a code base's string-constant pool.
///
/// # Error Categories
///
/// ## Collaborator Errors
/// - [`Error::LoadFailed`] - A package could not be loaded or disassembled
/// - [`Error::StringNotFound`] - A string-constant pool entry is missing
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Error`] - Generic error for provider implementations
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use clonescope::{compare_paths, CodeAnalyzer, Error, MethodFilter};
///
/// # fn run(analyzer: &dyn CodeAnalyzer) {
/// match compare_paths(analyzer, Path::new("a.apk"), Path::new("b.apk"), &MethodFilter::all()) {
///     Ok(result) => println!("overall: {:.4}", result.overall_similarity),
///     Err(Error::LoadFailed { path, message }) => {
///         eprintln!("failed to load {}: {}", path.display(), message);
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// # }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A package could not be loaded or disassembled.
    ///
    /// Raised by [`CodeAnalyzer`](crate::CodeAnalyzer) implementations when the input file is not
    /// a valid package or its code cannot be decoded. A load failure aborts the whole comparison;
    /// no partial result is meaningful with only one code base.
    #[error("Failed to load package '{}' - {message}", .path.display())]
    LoadFailed {
        /// Path of the package that failed to load
        path: PathBuf,
        /// Description of what went wrong, as reported by the provider
        message: String,
    },

    /// A string-constant pool entry is missing.
    ///
    /// Returned by [`CodeBase::resolve_string`](crate::CodeBase::resolve_string) when an
    /// instruction references a pool slot that has no value. Feature extraction treats this as a
    /// per-instruction condition: the affected token is skipped, the rest of the method's feature
    /// set is still produced.
    #[error("String constant {0} is not present in the constant pool")]
    StringNotFound(StringId),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that provider implementations hit while reading package files.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    ///
    /// Escape hatch for provider implementations whose failure modes don't fit the other
    /// categories.
    #[error("{0}")]
    Error(String),
}
