//! A throwaway project directory for running sfsymbols against.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::ok_or_panic;
use crate::process::{Builder, process};

/// Variables that would let the developer's environment leak into a test.
const CLEARED_ENV: [&str; 3] = ["SFSYMBOLS_CATALOG", "SFSYMBOLS_LOGLEVEL", "CLICOLOR_FORCE"];

pub struct SandboxBuilder {
    files: Vec<(PathBuf, String)>,
    env: Vec<(String, String)>,
}

/// Starts building a sandbox.
#[must_use]
pub const fn sandbox() -> SandboxBuilder {
    SandboxBuilder {
        files: Vec::new(),
        env: Vec::new(),
    }
}

impl SandboxBuilder {
    /// (chainable) Add a file, relative to the sandbox root.
    #[must_use]
    pub fn file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((PathBuf::from(path), contents.to_string()));
        self
    }

    /// (chainable) Set an environment variable for every process run in the sandbox.
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Creates the sandbox directory and writes its files.
    ///
    /// # Panics
    ///
    /// Panics if the directory or a file cannot be created.
    #[must_use]
    pub fn build(self) -> Sandbox {
        let root = ok_or_panic! { TempDir::new() };
        for (path, contents) in &self.files {
            let path = root.path().join(path);
            if let Some(parent) = path.parent() {
                ok_or_panic! { fs::create_dir_all(parent) };
            }
            ok_or_panic! { fs::write(&path, contents) };
        }

        Sandbox {
            root,
            env: self.env,
        }
    }
}

/// A built sandbox. The directory is removed when this is dropped.
pub struct Sandbox {
    root: TempDir,
    env: Vec<(String, String)>,
}

impl Sandbox {
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    /// Reads a file in the sandbox.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, relative: &str) -> String {
        ok_or_panic! { fs::read_to_string(self.path(relative)) }
    }

    /// A process for `program`, run from the sandbox root with uncolored
    /// output and none of the caller's sfsymbols settings.
    #[must_use]
    pub fn process<T: AsRef<OsStr>>(&self, program: T) -> Builder {
        let mut builder = process(program);
        builder.cwd(self.root.path());
        for key in CLEARED_ENV {
            builder.env_remove(key);
        }
        builder.env("CLICOLOR", "0").env("NO_COLOR", "1");
        for (key, value) in &self.env {
            builder.env(key, value);
        }
        builder
    }
}
