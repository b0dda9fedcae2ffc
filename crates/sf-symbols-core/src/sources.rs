//! Collects the Swift sources to check from files and directories.

use std::fs;
use std::path::{Path, PathBuf};

use log::trace;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Context, ErrorKind, Fallible};

const SWIFT_EXTENSION: &str = "swift";

/// A Swift source file and its contents.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    /// Reads the source at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path) -> Fallible<Self> {
        let text = fs::read_to_string(path).with_context(|| ErrorKind::SourceReadError {
            file: path.to_owned(),
        })?;
        Ok(Self {
            path: dunce::simplified(path).to_owned(),
            text,
        })
    }
}

/// Expands `paths` into the Swift files to check, in a stable order.
///
/// Files are taken as given, whatever their extension. Directories are walked
/// for `*.swift` files, skipping hidden entries such as `.build` and `.git`.
///
/// # Errors
///
/// Returns an error if a directory cannot be walked or holds no Swift sources.
pub fn swift_files(paths: &[PathBuf]) -> Fallible<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let before = files.len();
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        {
            let entry = entry.with_context(|| ErrorKind::SourceReadError { file: path.clone() })?;
            if entry.file_type().is_file() && is_swift(entry.path()) {
                trace!("Found Swift source {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        if files.len() == before {
            return Err(ErrorKind::NoSwiftSources { path: path.clone() }.into());
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_swift(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SWIFT_EXTENSION))
}
