//! Unified error type for the specwriter engine.
//!
//! Rendering itself never fails on content it can normalize (missing
//! descriptions, absent color backends); the only fallible surfaces are
//! sink I/O and manifest loading.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = SpecError> = std::result::Result<T, E>;

#[derive(Debug, Error, Diagnostic)]
pub enum SpecError {
    /// The output sink rejected a write or flush.
    #[error("failed to write report output")]
    #[diagnostic(code(specwriter::io))]
    Io(#[from] std::io::Error),

    /// A test-module manifest could not be parsed.
    #[error("invalid test manifest: {}", path.display())]
    #[diagnostic(
        code(specwriter::manifest),
        help("each manifest needs a `group` name and a `cases` list; see the discovery module docs")
    )]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The discovery filename pattern is not a valid glob.
    #[error("invalid discovery pattern {pattern:?}")]
    #[diagnostic(code(specwriter::pattern))]
    BadPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
