//! Unit tests for the staging environment.

use super::*;
use crate::mode::FileMode;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Sandbox {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Sandbox {
    fn write(&self, name: &str, contents: &[u8]) -> Artefact {
        let path = self.root.join("src").join(name);
        fs::create_dir_all(path.parent().expect("source has parent")).expect("mkdir");
        fs::write(&path, contents).expect("write source");
        Artefact::new(path)
    }

    fn destdir(&self) -> Utf8PathBuf {
        self.root.join("stage")
    }
}

#[fixture]
fn sandbox() -> Sandbox {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
    Sandbox { _dir: dir, root }
}

#[test]
fn install_returns_one_handle_per_source() {
    let mut env = StagingEnvironment::new();
    let files = env.install(
        Utf8Path::new("/usr/local/bin"),
        &[Artefact::from("a/one"), Artefact::from("b/two")],
    );
    let paths: Vec<_> = files.iter().map(|f| f.path().as_str()).collect();
    assert_eq!(paths, ["/usr/local/bin/one", "/usr/local/bin/two"]);
    assert_eq!(env.installs().len(), 1);
}

#[test]
fn aliases_accumulate_without_duplicates() {
    let mut env = StagingEnvironment::new();
    env.alias("install", Utf8Path::new("/usr/local/bin"));
    env.alias("install", Utf8Path::new("/usr/local/share/gonstruct"));
    env.alias("install", Utf8Path::new("/usr/local/bin"));

    let targets = env.alias_targets("install").expect("alias registered");
    assert_eq!(targets.len(), 2);
    assert!(targets.contains(Utf8Path::new("/usr/local/bin")));
    assert!(targets.contains(Utf8Path::new("/usr/local/share/gonstruct")));
}

#[test]
fn plan_rejects_unknown_alias() {
    let env = StagingEnvironment::new();
    let err = env.plan("install").expect_err("nothing registered");
    assert!(matches!(err, InstallerError::UnknownAlias { name } if name == "install"));
}

#[test]
fn plan_pairs_copies_with_their_post_actions() {
    let mut env = StagingEnvironment::with_destdir("/tmp/stage");
    let dest = Utf8Path::new("/usr/bin");
    let files = env.install(dest, &[Artefact::from("build/gonstruct")]);
    env.alias("install", dest);
    for file in &files {
        env.add_post_action(file, PostAction::chmod(file.path(), FileMode::PROGRAM));
    }

    let plan = env.plan("install").expect("plan");
    assert_eq!(
        plan,
        [
            Operation::Copy {
                source: Utf8PathBuf::from("build/gonstruct"),
                destination: Utf8PathBuf::from("/tmp/stage/usr/bin/gonstruct"),
            },
            Operation::Post(PostAction::chmod(
                "/tmp/stage/usr/bin/gonstruct",
                FileMode::PROGRAM
            )),
        ]
    );
}

#[test]
fn plan_ignores_destinations_outside_the_alias() {
    let mut env = StagingEnvironment::new();
    env.install(Utf8Path::new("/usr/bin"), &[Artefact::from("gonstruct")]);
    env.install(Utf8Path::new("/opt/extra"), &[Artefact::from("extra")]);
    env.alias("install", Utf8Path::new("/usr/bin"));

    let plan = env.plan("install").expect("plan");
    assert_eq!(plan.len(), 1);
}

#[test]
fn plan_emits_each_installed_file_once() {
    let mut env = StagingEnvironment::new();
    let dest = Utf8Path::new("/usr/bin");
    for _ in 0..2 {
        let files = env.install(dest, &[Artefact::from("gonstruct")]);
        env.alias("install", dest);
        for file in &files {
            env.add_post_action(file, PostAction::chmod(file.path(), FileMode::PROGRAM));
        }
    }

    let plan = env.plan("install").expect("plan");
    assert_eq!(
        plan,
        [
            Operation::Copy {
                source: Utf8PathBuf::from("gonstruct"),
                destination: Utf8PathBuf::from("/usr/bin/gonstruct"),
            },
            Operation::Post(PostAction::chmod("/usr/bin/gonstruct", FileMode::PROGRAM)),
        ]
    );
}

#[rstest]
fn run_alias_refuses_to_copy_a_file_onto_itself(sandbox: Sandbox) {
    let source = sandbox.write("readme.html", b"<p>keep</p>");
    let dest = sandbox.root.join("src");
    let mut env = StagingEnvironment::new();
    env.install(&dest, &[source.clone()]);
    env.alias("install", &dest);

    let err = env.run_alias("install").expect_err("same file");
    assert!(matches!(
        err,
        InstallerError::SourceIsDestination { path } if path.as_path() == source.path()
    ));
    assert_eq!(fs::read(source.path()).expect("read"), b"<p>keep</p>");
}

#[rstest]
fn run_alias_copies_into_destdir(sandbox: Sandbox) {
    let source = sandbox.write("readme.html", b"<html></html>");
    let mut env = StagingEnvironment::with_destdir(sandbox.destdir());
    let dest = Utf8Path::new("/usr/share/gonstruct");
    env.install(dest, &[source]);
    env.alias("install", dest);

    let written = env.run_alias("install").expect("install succeeds");
    let expected = sandbox.destdir().join("usr/share/gonstruct/readme.html");
    assert_eq!(written, [expected.clone()]);
    assert_eq!(fs::read(&expected).expect("read"), b"<html></html>");
}

#[cfg(unix)]
#[rstest]
#[case::program(FileMode::PROGRAM)]
#[case::data(FileMode::DATA)]
fn run_alias_applies_requested_mode(sandbox: Sandbox, #[case] mode: FileMode) {
    use std::os::unix::fs::PermissionsExt;

    let source = sandbox.write("gonstruct", b"#!/bin/sh\n");
    let mut env = StagingEnvironment::with_destdir(sandbox.destdir());
    let dest = Utf8Path::new("/usr/bin");
    let files = env.install(dest, &[source]);
    env.alias("install", dest);
    for file in &files {
        env.add_post_action(file, PostAction::chmod(file.path(), mode));
    }

    env.run_alias("install").expect("install succeeds");
    let installed = sandbox.destdir().join("usr/bin/gonstruct");
    let bits = fs::metadata(&installed).expect("metadata").permissions().mode() & 0o777;
    assert_eq!(bits, mode.bits());
}

#[rstest]
fn run_alias_reports_missing_source(sandbox: Sandbox) {
    let mut env = StagingEnvironment::with_destdir(sandbox.destdir());
    let dest = Utf8Path::new("/usr/bin");
    let missing = sandbox.root.join("src/absent");
    env.install(dest, &[Artefact::new(missing.clone())]);
    env.alias("install", dest);

    let err = env.run_alias("install").expect_err("source missing");
    assert!(matches!(err, InstallerError::SourceNotFound { path } if path == missing));
}

#[rstest]
fn registration_never_touches_the_filesystem(sandbox: Sandbox) {
    let mut env = StagingEnvironment::with_destdir(sandbox.destdir());
    let dest = Utf8Path::new("/usr/bin");
    env.install(dest, &[Artefact::from("does/not/exist")]);
    env.alias("install", dest);

    assert!(!sandbox.destdir().exists());
}
