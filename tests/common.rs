#![allow(dead_code)]

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use tempfile::TempDir;

pub const PASSPHRASE: &str = "7$1%0@";

/// Runs the `qed` binary against a throwaway data directory.
pub struct QedHarness {
    dir: TempDir,
}

impl QedHarness {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir().join("math_proofs_db.json")
    }

    /// Write a scratch file next to the data directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_qed"));
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--log-file")
            .arg(self.dir.path().join("qed.log"))
            .args(args)
            .env_remove("QED_DATA_DIR")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to run qed")
    }

    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn qed");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for qed")
    }

    /// Run and return stdout, failing the test if the command failed.
    pub fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "qed {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is UTF-8")
    }

    /// Run expecting failure and return stderr.
    pub fn fails(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(!output.status.success(), "qed {args:?} unexpectedly succeeded");
        String::from_utf8(output.stderr).expect("stderr is UTF-8")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
