#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Isolated plugin environment: its own staging dir and no config file.
pub struct TestContext {
    pub cmd: Command,
    pub root: TempDir,
}

impl TestContext {
    /// Fresh command sharing this context's directories
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_loopvol");
        let mut cmd = Command::new(bin_path);
        cmd.timeout(Duration::from_secs(60));
        cmd.env_remove("RUST_LOG")
            .env_remove("LOOPVOL_LOG_FILE")
            .env("LOOPVOL_CONFIG", self.root.path().join("config.json"))
            .env("LOOPVOL_STAGING_DIR", self.staging_dir());
        cmd
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.root.path().join("images")
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    /// Number of entries in the staging dir (0 if it was never created)
    pub fn staged_images(&self) -> usize {
        count_entries(&self.staging_dir())
    }
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

pub fn loopvol() -> TestContext {
    let root = TempDir::new().expect("Failed to create test root");
    let bin_path: &str = env!("CARGO_BIN_EXE_loopvol");
    let mut cmd = Command::new(bin_path);
    // You can override this with .timeout(Duration::from_secs(N))
    cmd.timeout(Duration::from_secs(60));
    cmd.env_remove("RUST_LOG")
        .env_remove("LOOPVOL_LOG_FILE")
        .env("LOOPVOL_CONFIG", root.path().join("config.json"))
        .env("LOOPVOL_STAGING_DIR", root.path().join("images"));

    TestContext { cmd, root }
}

/// Parse the single JSON response line the plugin prints.
pub fn response(stdout: &[u8]) -> serde_json::Value {
    let stdout = std::str::from_utf8(stdout).expect("stdout should be UTF-8");
    assert_eq!(
        stdout.lines().count(),
        1,
        "plugin must print exactly one line, got: {stdout}"
    );
    serde_json::from_str(stdout.trim()).expect("response should be valid JSON")
}
