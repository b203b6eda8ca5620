//! The build environment collaborator.
//!
//! The [`crate::installer::Installer`] never touches the filesystem itself.
//! It asks an [`Environment`] to copy sources into a destination, to group
//! destinations under an alias, and to run follow-up actions on each
//! installed file. When and how that work is carried out belongs to the
//! environment.

use crate::mode::FileMode;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// A source file or build product to be installed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Artefact(Utf8PathBuf);

impl Artefact {
    /// Create an artefact reference from a path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self(path.into())
    }

    /// Return the source path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.0
    }
}

impl From<&str> for Artefact {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<Utf8PathBuf> for Artefact {
    fn from(path: Utf8PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for Artefact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Handle to a file an install request will produce.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstalledFile {
    source: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl InstalledFile {
    /// Describe the file produced by installing `source` into `destination`.
    ///
    /// The file keeps the source's file name. A source without a file name
    /// (such as `..`) maps onto the destination itself.
    #[must_use]
    pub fn new(destination: &Utf8Path, source: &Artefact) -> Self {
        let path = source
            .path()
            .file_name()
            .map_or_else(|| destination.to_owned(), |name| destination.join(name));
        Self {
            source: source.path().to_owned(),
            path,
        }
    }

    /// Return the installed file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Return the source the file is copied from.
    #[must_use]
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }
}

impl fmt::Display for InstalledFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.fmt(f)
    }
}

/// An action scheduled to run after a file has been installed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostAction {
    /// Set the permission mode of a file.
    Chmod {
        /// The file to change.
        path: Utf8PathBuf,
        /// The mode to apply.
        mode: FileMode,
    },
}

impl PostAction {
    /// Build a permission change for `path`.
    #[must_use]
    pub fn chmod(path: impl Into<Utf8PathBuf>, mode: FileMode) -> Self {
        Self::Chmod {
            path: path.into(),
            mode,
        }
    }
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chmod { path, mode } => write!(f, "chmod {mode} {path}"),
        }
    }
}

/// The operations the installer needs from the build environment.
///
/// Implementations record or perform the work; none of these calls report
/// errors. Failures belong to whatever later executes the recorded work.
#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// Request that every source be copied into `destination`.
    ///
    /// Returns one handle per file that will be installed.
    fn install(&mut self, destination: &Utf8Path, sources: &[Artefact]) -> Vec<InstalledFile>;

    /// Add `target` to the named alias. Repeated calls accumulate targets.
    fn alias(&mut self, name: &str, target: &Utf8Path);

    /// Schedule `action` to run once `file` has been installed.
    fn add_post_action(&mut self, file: &InstalledFile, action: PostAction);
}
