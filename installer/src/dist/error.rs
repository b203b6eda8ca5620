//! Error types for release packaging.
//!
//! Packaging is fail-fast: the first error aborts the run and nothing that was
//! already written is rolled back.

use std::path::PathBuf;
use thiserror::Error;

/// Errors arising while producing a release archive.
#[derive(Debug, Error)]
pub enum DistError {
    /// An I/O operation failed (reading inputs, writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),

    /// The build script declares no `VERSION = '...'` line.
    #[error("no VERSION assignment found in {0}")]
    VersionNotFound(PathBuf),

    /// A required release file is missing from the build output.
    #[error("release file not found: {0}")]
    MissingReleaseFile(PathBuf),

    /// The release build could not be started.
    #[error("failed to run {command}: {source}")]
    CommandSpawn {
        /// The command line that was attempted.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The release build exited unsuccessfully.
    #[error("{command} failed with {status}")]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// Description of the exit status.
        status: String,
    },

    /// No build command was configured.
    #[error("build command is empty")]
    EmptyCommand,

    /// Test stub received an unexpected or mismatched command invocation.
    #[cfg(any(test, feature = "test-support"))]
    #[error("stub mismatch: {message}")]
    StubMismatch {
        /// Description of what was expected versus what was received.
        message: String,
    },
}
