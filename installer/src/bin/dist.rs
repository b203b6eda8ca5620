//! Release packaging binary for gonstruct.
//!
//! Thin CLI wrapper around [`gonstruct_installer::dist`]: run the release
//! build, read the version from the build script, and archive the build
//! output as `gonstruct-<version>-<arch>.tar.gz`.

use clap::Parser;
use gonstruct_installer::dist::archive::{
    ArchiveOutput, ArchiveParams, DIST_DIR, create_release_archive,
};
use gonstruct_installer::dist::error::DistError;
use gonstruct_installer::dist::naming::{DEFAULT_ARCH, ReleaseName};
use gonstruct_installer::dist::release::{
    CommandExecutor, DEFAULT_BUILD_COMMAND, SystemCommandExecutor, run_release_build,
};
use gonstruct_installer::dist::version::{VERSION_FILE, read_version};
use gonstruct_installer::logging;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Build and package a gonstruct release tarball.
#[derive(Parser, Debug, Clone)]
#[command(name = "gonstruct-dist")]
#[command(version, about = "Build and package a gonstruct release tarball")]
struct DistCli {
    /// Source tree containing the build script.
    #[arg(long, default_value = ".")]
    source_dir: PathBuf,

    /// Build script declaring `VERSION`, relative to the source tree.
    #[arg(long, default_value = VERSION_FILE)]
    version_file: PathBuf,

    /// Build output directory [default: <source-dir>/dist].
    #[arg(long)]
    dist_dir: Option<PathBuf>,

    /// Architecture tag for the archive name.
    #[arg(long, default_value = DEFAULT_ARCH)]
    arch: String,

    /// Directory where the archive is written [default: <source-dir>].
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Package the existing build output without rebuilding.
    #[arg(long)]
    skip_build: bool,

    /// Release build command line.
    #[arg(
        long,
        num_args = 1..,
        allow_hyphen_values = true,
        default_values = DEFAULT_BUILD_COMMAND
    )]
    build_command: Vec<String>,

    /// Increase log verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Errors returned by the packaging CLI.
#[derive(Debug, Error)]
enum DistCliError {
    /// A packaging step failed.
    #[error("{0}")]
    Dist(#[from] DistError),

    /// The arch tag would break the archive name.
    #[error("invalid --arch value {0:?}")]
    InvalidArch(String),
}

fn main() {
    let cli = DistCli::parse();
    let mut stderr = std::io::stderr();
    if logging::init(cli.verbose, false).is_err() {
        write_line(&mut stderr, "dist: logger already initialised");
    }

    let outcome = run(&cli, &SystemCommandExecutor)
        .map(|output| report_success(&output, &mut std::io::stdout()));
    if let Err(err) = outcome {
        report_failure(&err, &mut stderr);
        std::process::exit(1);
    }
}

/// Build the release, then archive it under its versioned name.
fn run(cli: &DistCli, executor: &dyn CommandExecutor) -> Result<ArchiveOutput, DistCliError> {
    if cli.arch.is_empty() || cli.arch.contains(['/', '\\']) {
        return Err(DistCliError::InvalidArch(cli.arch.clone()));
    }

    if !cli.skip_build {
        run_release_build(executor, &cli.build_command)?;
    }

    let version = read_version(&cli.source_dir.join(&cli.version_file))?;
    let name = ReleaseName::new(version, cli.arch.as_str());

    let mut params = ArchiveParams::standard(name, &cli.source_dir);
    params.dist_dir = cli
        .dist_dir
        .clone()
        .unwrap_or_else(|| cli.source_dir.join(DIST_DIR));
    if let Some(output_dir) = &cli.output_dir {
        std::fs::create_dir_all(output_dir).map_err(DistError::from)?;
        params.output_dir.clone_from(output_dir);
    }

    create_release_archive(&params).map_err(DistCliError::from)
}

fn report_success(output: &ArchiveOutput, stdout: &mut dyn Write) {
    write_line(stdout, format!("Created {}", output.archive_path.display()));
    write_line(stdout, format!("sha256 {}", output.sha256));
}

fn report_failure(err: &DistCliError, stderr: &mut dyn Write) {
    write_line(stderr, format!("dist: {err}"));
    write_line(stderr, "dist: exiting...");
}

fn write_line(stream: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stream, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
