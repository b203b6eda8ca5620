//! Error types for option resolution and install execution.
//!
//! Registering files with the installer never fails; these errors come from
//! parsing user overrides, expanding option defaults, and from the staging
//! environment when it finally executes the scheduled copies and permission
//! changes.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving options or executing an install.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// An override or options file named an option that does not exist.
    #[error("unknown option {name:?}; expected one of prefix, eprefix, bindir, datadir")]
    UnknownOption {
        /// The unrecognised option name.
        name: String,
    },

    /// A command-line override was not of the form `name=value`.
    #[error("malformed override {argument:?}; expected NAME=VALUE")]
    MalformedOverride {
        /// The offending argument.
        argument: String,
    },

    /// A default expression referenced an option with no resolved value.
    #[error("option {option} references ${{{reference}}}, which is not resolved yet")]
    UnresolvedReference {
        /// The option whose expression contains the reference.
        option: String,
        /// The referenced name.
        reference: String,
    },

    /// A default expression contains an unterminated `${` reference.
    #[error("option {option} has an unterminated reference in {expression:?}")]
    MalformedReference {
        /// The option whose expression is malformed.
        option: String,
        /// The full expression.
        expression: String,
    },

    /// The options file could not be parsed.
    #[error("invalid options file {path}: {reason}")]
    InvalidOptionsFile {
        /// Path to the options file.
        path: Utf8PathBuf,
        /// Description of the parse error.
        reason: String,
    },

    /// No install targets were registered under the requested alias.
    #[error("no targets registered under alias {name:?}")]
    UnknownAlias {
        /// The alias that was requested.
        name: String,
    },

    /// A registered source artefact does not exist.
    #[error("source {path} does not exist")]
    SourceNotFound {
        /// Path of the missing source.
        path: Utf8PathBuf,
    },

    /// A source would be copied onto itself.
    #[error("source {path} is already at its install location")]
    SourceIsDestination {
        /// Path shared by the source and the destination.
        path: Utf8PathBuf,
    },

    /// Copying a source into its destination failed.
    #[error("failed to copy {source_path} to {destination}")]
    CopyFailed {
        /// The source artefact.
        source_path: Utf8PathBuf,
        /// The destination file.
        destination: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Applying a permission change to an installed file failed.
    #[error("failed to set mode {mode} on {path}")]
    PermissionFailed {
        /// The installed file.
        path: Utf8PathBuf,
        /// The requested mode in octal notation.
        mode: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
