use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteBin, FileWriteStr, PathChild, PathCreateDir};
use latest_branches::areas::database::Database;
use latest_branches::areas::refs::Refs;
use latest_branches::areas::shell::ShellFallback;
use latest_branches::artifacts::resolve::head_resolver::HeadResolver;
use rstest::fixture;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// A `.git` directory laid out by hand: loose objects and loose refs only
pub struct SyntheticRepo {
    dir: TempDir,
}

#[fixture]
pub fn synthetic_repo() -> SyntheticRepo {
    SyntheticRepo::new()
}

impl SyntheticRepo {
    pub fn new() -> Self {
        redirect_temp_dir();
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child(".git/objects")
            .create_dir_all()
            .expect("Failed to create objects dir");
        dir.child(".git/refs/heads")
            .create_dir_all()
            .expect("Failed to create heads dir");

        SyntheticRepo { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git_dir(&self) -> PathBuf {
        self.dir.path().join(".git")
    }

    /// Build a commit object committed at `timestamp` and return `(oid, raw object)`
    pub fn commit_object(message: &str, timestamp: i64) -> (String, Vec<u8>) {
        let body = format!(
            "tree {EMPTY_TREE}\n\
             author fake_user <fake_email@email.com> {timestamp} +0000\n\
             committer fake_user <fake_email@email.com> {timestamp} +0200\n\
             \n\
             {message}\n"
        );
        let object = format!("commit {}\0{}", body.len(), body).into_bytes();
        let oid = format!("{:x}", Sha1::digest(&object));

        (oid, object)
    }

    /// Store a loose commit and return its id
    pub fn write_commit(&self, message: &str, timestamp: i64) -> String {
        let (oid, object) = Self::commit_object(message, timestamp);
        self.write_loose_object(&oid, &object);
        oid
    }

    pub fn write_loose_object(&self, oid: &str, object: &[u8]) {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(object).expect("Failed to compress object");
        let compressed = encoder.finish().expect("Failed to compress object");

        self.dir
            .child(format!(".git/objects/{}/{}", &oid[..2], &oid[2..]))
            .write_binary(&compressed)
            .expect("Failed to write object");
    }

    pub fn write_raw_object(&self, oid: &str, bytes: &[u8]) {
        self.dir
            .child(format!(".git/objects/{}/{}", &oid[..2], &oid[2..]))
            .write_binary(bytes)
            .expect("Failed to write object");
    }

    /// Point a branch at `oid`; names with a `/` become remote-tracking refs
    pub fn set_branch(&self, name: &str, oid: &str) {
        let ref_path = if name.contains('/') {
            format!(".git/refs/remotes/{name}")
        } else {
            format!(".git/refs/heads/{name}")
        };

        self.dir
            .child(ref_path)
            .write_str(&format!("{oid}\n"))
            .expect("Failed to write ref");
    }

    /// Loose commit plus branch ref in one go
    pub fn branch_at(&self, name: &str, timestamp: i64) -> String {
        let oid = self.write_commit(&format!("tip of {name}"), timestamp);
        self.set_branch(name, &oid);
        oid
    }

    /// A branch whose commit is not stored loose, as if it had been packed
    pub fn packed_branch_at(&self, name: &str, timestamp: i64) -> String {
        let (oid, _) = Self::commit_object(&format!("packed tip of {name}"), timestamp);
        self.set_branch(name, &oid);
        oid
    }

    /// A branch whose loose object is a named pipe nobody writes to, so
    /// reading it never completes
    #[cfg(unix)]
    pub fn stalled_branch_at(&self, name: &str, timestamp: i64) -> String {
        let (oid, _) = Self::commit_object(&format!("stalled tip of {name}"), timestamp);
        let object_dir = self.dir.child(format!(".git/objects/{}", &oid[..2]));
        object_dir
            .create_dir_all()
            .expect("Failed to create object dir");

        Command::new("mkfifo")
            .arg(object_dir.path().join(&oid[2..]))
            .assert()
            .success();

        self.set_branch(name, &oid);
        oid
    }

    /// Install an executable shell script standing in for `git`
    #[cfg(unix)]
    pub fn fake_git(&self, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script_path = self.dir.child("fake-git.sh");
        script_path
            .write_str(&format!("#!/bin/sh\n{script}\n"))
            .expect("Failed to write fake git");
        std::fs::set_permissions(script_path.path(), std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake git executable");

        script_path
            .path()
            .canonicalize()
            .expect("Failed to resolve fake git path")
            .to_string_lossy()
            .to_string()
    }

    pub fn resolver(&self, git_binary: &str, fallback_timeout: Duration) -> HeadResolver {
        self.resolver_with_native_timeout(git_binary, fallback_timeout, Duration::from_secs(5))
    }

    pub fn resolver_with_native_timeout(
        &self,
        git_binary: &str,
        fallback_timeout: Duration,
        native_timeout: Duration,
    ) -> HeadResolver {
        HeadResolver::new(
            Arc::new(Database::new(self.git_dir().join("objects").into_boxed_path())),
            Arc::new(Refs::new(self.git_dir().into_boxed_path())),
            Arc::new(ShellFallback::new(
                git_binary.to_string(),
                self.path().into(),
                fallback_timeout,
            )),
            native_timeout,
        )
    }
}

pub fn run_latest_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("latest-branches").expect("Failed to find binary");
    cmd.env("NO_COLOR", "1");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_COMMITTER_NAME", "fake_user"),
        ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
        ("GIT_CONFIG_NOSYSTEM", "1"),
    ]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Create an empty commit on the current branch at a fixed date
pub fn git_commit_at(dir: &Path, message: &str, timestamp: i64) {
    let date = format!("@{timestamp} +0000");
    run_git_command(dir, &["commit", "--allow-empty", "--no-gpg-sign", "-m", message])
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .assert()
        .success();
}
