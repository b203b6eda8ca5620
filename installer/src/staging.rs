//! Recording environment that performs installs on request.
//!
//! [`StagingEnvironment`] implements [`Environment`] by remembering every
//! install request, alias and post action. Nothing touches the filesystem
//! until [`StagingEnvironment::run_alias`] is called, which is where missing
//! sources and unwritable destinations are finally reported.
//!
//! An optional staging root (`DESTDIR`) is prepended to every destination so a
//! complete tree can be assembled away from the live prefix.

use crate::environment::{Artefact, Environment, InstalledFile, PostAction};
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;

/// A recorded install request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    /// Destination directory.
    pub destination: Utf8PathBuf,
    /// Sources to copy into it.
    pub sources: Vec<Artefact>,
}

/// One filesystem operation carried out by [`StagingEnvironment::run_alias`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Copy a source file to an installed path.
    Copy {
        /// File being copied.
        source: Utf8PathBuf,
        /// Path written, including any staging root.
        destination: Utf8PathBuf,
    },
    /// Run a post action on an installed path.
    Post(PostAction),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy {
                source,
                destination,
            } => write!(f, "copy {source} -> {destination}"),
            Self::Post(action) => action.fmt(f),
        }
    }
}

/// An [`Environment`] that records requests and executes them later.
#[derive(Debug, Default)]
pub struct StagingEnvironment {
    destdir: Option<Utf8PathBuf>,
    installs: Vec<InstallRecord>,
    aliases: BTreeMap<String, BTreeSet<Utf8PathBuf>>,
    post_actions: Vec<(InstalledFile, PostAction)>,
}

impl Environment for StagingEnvironment {
    fn install(&mut self, destination: &Utf8Path, sources: &[Artefact]) -> Vec<InstalledFile> {
        self.installs.push(InstallRecord {
            destination: destination.to_owned(),
            sources: sources.to_vec(),
        });
        sources
            .iter()
            .map(|source| InstalledFile::new(destination, source))
            .collect()
    }

    fn alias(&mut self, name: &str, target: &Utf8Path) {
        self.aliases
            .entry(name.to_owned())
            .or_default()
            .insert(target.to_owned());
    }

    fn add_post_action(&mut self, file: &InstalledFile, action: PostAction) {
        self.post_actions.push((file.clone(), action));
    }
}

impl StagingEnvironment {
    /// Create an environment that installs into the live filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment that installs beneath `destdir`.
    #[must_use]
    pub fn with_destdir(destdir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            destdir: Some(destdir.into()),
            ..Self::default()
        }
    }

    /// Return the staging root, if any.
    #[must_use]
    pub fn destdir(&self) -> Option<&Utf8Path> {
        self.destdir.as_deref()
    }

    /// Return every recorded install request in registration order.
    #[must_use]
    pub fn installs(&self) -> &[InstallRecord] {
        &self.installs
    }

    /// Return the targets registered under `name`, if the alias exists.
    #[must_use]
    pub fn alias_targets(&self, name: &str) -> Option<&BTreeSet<Utf8PathBuf>> {
        self.aliases.get(name)
    }

    /// Return every recorded post action with the file it applies to.
    #[must_use]
    pub fn post_actions(&self) -> &[(InstalledFile, PostAction)] {
        &self.post_actions
    }

    /// List the operations [`Self::run_alias`] would perform for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnknownAlias`] if nothing is registered
    /// under `name`.
    pub fn plan(&self, name: &str) -> Result<Vec<Operation>> {
        let targets = self
            .aliases
            .get(name)
            .ok_or_else(|| InstallerError::UnknownAlias {
                name: name.to_owned(),
            })?;

        let mut operations = Vec::new();
        let mut seen = BTreeSet::new();
        for record in self
            .installs
            .iter()
            .filter(|record| targets.contains(&record.destination))
        {
            for source in &record.sources {
                let installed = InstalledFile::new(&record.destination, source);
                if !seen.insert(installed.clone()) {
                    continue;
                }
                operations.push(Operation::Copy {
                    source: source.path().to_owned(),
                    destination: self.staged(installed.path()),
                });
                operations.extend(
                    self.actions_for(&installed)
                        .into_iter()
                        .map(|action| Operation::Post(self.staged_action(action))),
                );
            }
        }
        Ok(operations)
    }

    /// Perform every copy and post action reachable from alias `name`.
    ///
    /// Each distinct installed file is copied once. Returns the paths
    /// written. Execution stops at the first failure and
    /// leaves already-installed files in place.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UnknownAlias`] for an unregistered alias,
    /// [`InstallerError::SourceNotFound`] when a source is missing,
    /// [`InstallerError::SourceIsDestination`] when a source would overwrite
    /// itself,
    /// [`InstallerError::CopyFailed`] when a copy fails and
    /// [`InstallerError::PermissionFailed`] when a mode cannot be applied.
    pub fn run_alias(&self, name: &str) -> Result<Vec<Utf8PathBuf>> {
        let mut written = Vec::new();
        for operation in self.plan(name)? {
            match operation {
                Operation::Copy {
                    source,
                    destination,
                } => {
                    copy_file(&source, &destination)?;
                    written.push(destination);
                }
                Operation::Post(action) => apply(&action)?,
            }
        }
        Ok(written)
    }

    /// Distinct post actions recorded for `file`, in registration order.
    fn actions_for(&self, file: &InstalledFile) -> Vec<&PostAction> {
        let mut actions: Vec<&PostAction> = Vec::new();
        for (recorded, action) in &self.post_actions {
            if recorded == file && !actions.contains(&action) {
                actions.push(action);
            }
        }
        actions
    }

    /// Map an installed path beneath the staging root.
    fn staged(&self, path: &Utf8Path) -> Utf8PathBuf {
        self.destdir.as_ref().map_or_else(
            || path.to_owned(),
            |root| root.join(path.strip_prefix("/").unwrap_or(path)),
        )
    }

    fn staged_action(&self, action: &PostAction) -> PostAction {
        match action {
            PostAction::Chmod { path, mode } => PostAction::chmod(self.staged(path), *mode),
        }
    }
}

fn copy_file(source: &Utf8Path, destination: &Utf8Path) -> Result<()> {
    if !source.exists() {
        return Err(InstallerError::SourceNotFound {
            path: source.to_owned(),
        });
    }

    if is_same_file(source, destination) {
        return Err(InstallerError::SourceIsDestination {
            path: source.to_owned(),
        });
    }

    let copy_failed = |e| InstallerError::CopyFailed {
        source_path: source.to_owned(),
        destination: destination.to_owned(),
        source: e,
    };
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(copy_failed)?;
    }
    trace!("copying {source} to {destination}");
    fs::copy(source, destination).map_err(copy_failed)?;
    Ok(())
}

/// `fs::copy` truncates its destination before reading, so copying a file
/// onto itself would empty it.
fn is_same_file(source: &Utf8Path, destination: &Utf8Path) -> bool {
    match (source.canonicalize(), destination.canonicalize()) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

fn apply(action: &PostAction) -> Result<()> {
    match action {
        PostAction::Chmod { path, mode } => {
            trace!("setting mode {mode} on {path}");
            set_mode(path, mode.bits()).map_err(|e| InstallerError::PermissionFailed {
                path: path.clone(),
                mode: mode.to_string(),
                source: e,
            })
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Utf8Path, bits: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(bits))
}

#[cfg(not(unix))]
fn set_mode(path: &Utf8Path, bits: u32) -> std::io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(bits & 0o200 == 0);
    fs::set_permissions(path, permissions)
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod tests;
