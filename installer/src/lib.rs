//! gonstruct installer library.
//!
//! This crate resolves the installation directories for gonstruct, registers
//! files for installation with a build environment, executes the recorded
//! installs, and packages release tarballs. It is used by the
//! `gonstruct-install` and `gonstruct-dist` binaries and can be consumed
//! programmatically by build scripts.
//!
//! # Modules
//!
//! - [`args`] - User overrides for the installation options
//! - [`cli`] - Command-line argument definitions
//! - [`dist`] - Release archive packaging
//! - [`environment`] - The build environment collaborator
//! - [`error`] - Semantic error types
//! - [`installer`] - Directory resolution and install registration
//! - [`logging`] - Stderr logging backend for the binaries
//! - [`mode`] - Symbolic permission modes
//! - [`option`] - Installation option schema
//! - [`option_set`] - Option registration and `${name}` expansion
//! - [`output`] - Text formatting for the CLI
//! - [`staging`] - Recording environment that performs installs

pub mod args;
pub mod cli;
pub mod dist;
pub mod environment;
pub mod error;
pub mod installer;
pub mod logging;
pub mod mode;
pub mod option;
pub mod option_set;
pub mod output;
pub mod staging;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
