//! Release packaging for gonstruct.
//!
//! Produces the `gonstruct-<version>-<arch>.tar.gz` release tarball: run the
//! release build, read the version from the build script, and archive the
//! product binary with its readme and changelog under a versioned top-level
//! directory.
//!
//! # Sub-modules
//!
//! - [`archive`] - Gzip tar creation with a renamed root directory.
//! - [`error`] - Error type for packaging failures.
//! - [`naming`] - Release naming policy (`ReleaseName`).
//! - [`release`] - Release build invocation through a `CommandExecutor`.
//! - [`version`] - Version scraping from the build script.

pub mod archive;
pub mod error;
pub mod naming;
pub mod release;
pub mod version;
