//! Behaviour-driven tests for release packaging.
//!
//! The release build is driven through [`StubExecutor`], so scenarios never
//! invoke the real build tool.

use flate2::read::GzDecoder;
use gonstruct_installer::dist::archive::{
    ArchiveOutput, ArchiveParams, RELEASE_FILES, create_release_archive,
};
use gonstruct_installer::dist::error::DistError;
use gonstruct_installer::dist::naming::{DEFAULT_ARCH, ReleaseName};
use gonstruct_installer::dist::release::{DEFAULT_BUILD_COMMAND, run_release_build};
use gonstruct_installer::dist::version::{VERSION_FILE, read_version};
use gonstruct_installer::test_utils::{ExpectedCall, StubExecutor};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct DistWorld {
    dir: TempDir,
    build_exit_code: i32,
    outcome: Option<Result<ArchiveOutput, DistError>>,
}

impl DistWorld {
    fn write_tree(&self, script: &str) {
        fs::write(self.dir.path().join(VERSION_FILE), script).expect("write build script");
        let dist = self.dir.path().join("dist");
        fs::create_dir_all(&dist).expect("create dist");
        for file in RELEASE_FILES {
            fs::write(dist.join(file), file).expect("write release file");
        }
    }

    fn archives(&self) -> Vec<PathBuf> {
        fs::read_dir(self.dir.path())
            .expect("read source tree")
            .map(|entry| entry.expect("dir entry").path())
            .filter(|path| path.to_string_lossy().ends_with(".tar.gz"))
            .collect()
    }

    fn package(&self) -> Result<ArchiveOutput, DistError> {
        let executor = StubExecutor::new(vec![ExpectedCall {
            program: DEFAULT_BUILD_COMMAND[0],
            args: DEFAULT_BUILD_COMMAND[1..].to_vec(),
            exit_code: self.build_exit_code,
        }]);
        let command: Vec<String> = DEFAULT_BUILD_COMMAND
            .iter()
            .map(|arg| (*arg).to_owned())
            .collect();

        run_release_build(&executor, &command)?;
        let version = read_version(&self.dir.path().join(VERSION_FILE))?;
        let name = ReleaseName::new(version, DEFAULT_ARCH);
        let params = ArchiveParams::standard(name, self.dir.path());
        create_release_archive(&params)
    }
}

#[fixture]
fn world() -> DistWorld {
    DistWorld {
        dir: TempDir::new().expect("temp dir"),
        build_exit_code: 0,
        outcome: None,
    }
}

#[given("a source tree declaring version \"{version}\"")]
fn given_versioned_tree(world: &mut DistWorld, version: String) {
    world.write_tree(&format!("import os\nVERSION = '{version}'\nenv = Environment()\n"));
}

#[given("a source tree without a version")]
fn given_unversioned_tree(world: &mut DistWorld) {
    world.write_tree("env = Environment()\n");
}

#[given("a release build that exits with {code}")]
fn given_build_exit_code(world: &mut DistWorld, code: i32) {
    world.build_exit_code = code;
}

#[when("the release is packaged")]
fn when_release_packaged(world: &mut DistWorld) {
    world.outcome = Some(world.package());
}

#[then("the archive \"{filename}\" is created")]
fn then_archive_created(world: &mut DistWorld, filename: String) {
    let output = world
        .outcome
        .as_ref()
        .expect("packaging ran")
        .as_ref()
        .expect("packaging succeeded");
    assert_eq!(output.archive_path, world.dir.path().join(filename));
    assert_eq!(output.sha256.len(), 64);
}

#[then("the archive contains \"{entry}\"")]
fn then_archive_contains(world: &mut DistWorld, entry: String) {
    let output = world
        .outcome
        .as_ref()
        .expect("packaging ran")
        .as_ref()
        .expect("packaging succeeded");
    let file = fs::File::open(&output.archive_path).expect("open archive");
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let names: Vec<String> = archive
        .entries()
        .expect("entries")
        .map(|e| e.expect("entry").path().expect("path").display().to_string())
        .collect();
    assert!(names.contains(&entry), "entries: {names:?}");
}

#[then("packaging fails because the build failed")]
fn then_build_failed(world: &mut DistWorld) {
    assert!(matches!(
        world.outcome,
        Some(Err(DistError::CommandFailed { .. }))
    ));
}

#[then("packaging fails because the version is missing")]
fn then_version_missing(world: &mut DistWorld) {
    assert!(matches!(world.outcome, Some(Err(DistError::VersionNotFound(_)))));
}

#[then("no archive is written")]
fn then_no_archive(world: &mut DistWorld) {
    assert!(world.archives().is_empty());
}

#[scenario(
    path = "tests/features/dist.feature",
    name = "Package a release after a successful build"
)]
fn scenario_package_release(world: DistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dist.feature",
    name = "A failed build produces no archive"
)]
fn scenario_failed_build(world: DistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/dist.feature",
    name = "A build script without a version is rejected"
)]
fn scenario_missing_version(world: DistWorld) {
    let _ = world;
}
