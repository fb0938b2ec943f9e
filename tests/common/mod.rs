//! Shared testing utilities for stack CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Root stack `site` with a nested `wp` stack forwarding its `website` endpoint.
pub const SITE_STACK: &str = r#"name: site
components:
  wp:
    stack: ./wp
  lb:
    charm: ch:haproxy
relations:
  - provider: wp:website
    requirer: lb:reverseproxy
"#;

pub const WP_STACK: &str = r#"name: wp
components:
  app:
    charm: ch:wordpress
    units: 2
  db:
    charm: ch:mysql
    channel: 8.0/stable
    trust: true
provides:
  website:
    forward: app:website
relations:
  - provider: db:db
    requirer: app:database
"#;

/// Testing harness providing an isolated environment for CLI exercises.
///
/// `$HOME` is only overridden for the spawned binary, never for the test process.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory the CLI is invoked from.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `stack` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("stack").expect("Failed to locate stack binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.home())
            .env_remove("STACK_MODEL")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        fs::create_dir_all(path.parent().expect("file path has a parent"))
            .expect("Failed to create parent directory");
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write the `site` stack and its nested `wp` stack under the work directory.
    pub fn write_site_stack(&self) {
        self.write("site/stack.yaml", SITE_STACK);
        self.write("site/wp/stack.yaml", WP_STACK);
    }

    /// Write `~/.config/stack/config.toml`.
    pub fn write_settings(&self, content: &str) {
        let path = self.home().join(".config/stack/config.toml");
        fs::create_dir_all(path.parent().expect("settings path has a parent"))
            .expect("Failed to create settings directory");
        fs::write(path, content).expect("Failed to write settings");
    }

    /// Default location of the instance registry.
    pub fn instances_file(&self) -> PathBuf {
        self.home().join(".local/share/stack/instances.yaml")
    }
}
