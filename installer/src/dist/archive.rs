//! Release archive creation.
//!
//! Writes a gzip-compressed tar whose entries are the release files placed
//! under a `<product>-<version>-<arch>/` root. Entries are renamed while
//! archiving, so the build output directory never needs to be linked or
//! copied under the release name.

use super::error::DistError;
use super::naming::ReleaseName;
use flate2::Compression;
use flate2::write::GzEncoder;
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Files shipped in every release, relative to the build output directory.
pub const RELEASE_FILES: [&str; 3] = ["gonstruct", "readme.html", "changelog.txt"];

/// Default build output directory holding [`RELEASE_FILES`].
pub const DIST_DIR: &str = "dist";

/// Input parameters for [`create_release_archive`].
#[derive(Debug, Clone)]
pub struct ArchiveParams {
    /// Name of the release; also the archive's root directory.
    pub name: ReleaseName,
    /// Directory containing the release files.
    pub dist_dir: PathBuf,
    /// Release files, relative to `dist_dir`.
    pub files: Vec<String>,
    /// Directory where the archive is written.
    pub output_dir: PathBuf,
}

impl ArchiveParams {
    /// Parameters for the standard release layout rooted at `source_dir`.
    #[must_use]
    pub fn standard(name: ReleaseName, source_dir: &Path) -> Self {
        Self {
            name,
            dist_dir: source_dir.join(DIST_DIR),
            files: RELEASE_FILES.iter().map(|f| (*f).to_owned()).collect(),
            output_dir: source_dir.to_path_buf(),
        }
    }
}

/// Output produced by [`create_release_archive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutput {
    /// Path to the created `.tar.gz` archive.
    pub archive_path: PathBuf,
    /// Lowercase hex SHA-256 digest of the archive.
    pub sha256: String,
}

/// Create the release archive described by `params`.
///
/// Any existing file with the archive's name is replaced. A partially
/// written archive is left behind if a write fails.
///
/// # Errors
///
/// Returns [`DistError::MissingReleaseFile`] if a release file is absent,
/// and [`DistError::Io`] if reading inputs or writing the archive fails.
pub fn create_release_archive(params: &ArchiveParams) -> Result<ArchiveOutput, DistError> {
    let entries = archive_entries(params)?;
    let archive_path = params.output_dir.join(params.name.archive_filename());

    remove_existing(&archive_path)?;
    write_archive(&archive_path, &entries)?;
    let sha256 = compute_sha256(&archive_path)?;

    info!("created {} ({sha256})", archive_path.display());
    Ok(ArchiveOutput {
        archive_path,
        sha256,
    })
}

/// Pair each release file with its name inside the archive.
fn archive_entries(params: &ArchiveParams) -> Result<Vec<(PathBuf, String)>, DistError> {
    params
        .files
        .iter()
        .map(|file| {
            let source = params.dist_dir.join(file);
            if source.is_file() {
                Ok((source, format!("{}/{file}", params.name)))
            } else {
                Err(DistError::MissingReleaseFile(source))
            }
        })
        .collect()
}

fn remove_existing(path: &Path) -> Result<(), DistError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Write a `.tar.gz` archive of `(source_path, archive_name)` pairs.
///
/// File metadata, including the permission mode, is taken from the source.
fn write_archive(output_path: &Path, entries: &[(PathBuf, String)]) -> Result<(), DistError> {
    let output_file = fs::File::create(output_path)?;
    let encoder = GzEncoder::new(output_file, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    for (source_path, archive_name) in entries {
        debug!("adding {} as {archive_name}", source_path.display());
        archive.append_path_with_name(source_path, archive_name)?;
    }

    archive.into_inner()?.finish()?;
    Ok(())
}

/// Compute the lowercase hex SHA-256 digest of a file.
///
/// # Errors
///
/// Returns [`DistError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String, DistError> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
