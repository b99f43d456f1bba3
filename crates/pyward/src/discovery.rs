//! Turn the paths given on the command line into the list of files to check.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directories that never contain code worth checking.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".venv",
    "__pycache__",
    "node_modules",
    "venv",
];

/// One entry of the work list, in the order the user gave the paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFile {
    Python(PathBuf),
    /// The path does not exist.
    Missing(PathBuf),
}

impl InputFile {
    pub fn path(&self) -> &Path {
        match self {
            Self::Python(path) | Self::Missing(path) => path,
        }
    }
}

pub fn has_python_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("py" | "pyi")
    )
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| DEFAULT_EXCLUDE_DIRS.contains(&name))
}

/// Files passed explicitly are kept whatever their extension. Directories
/// are walked for `.py` and `.pyi` files, sorted by name so that the output
/// is stable.
pub fn discover_python_files<P: AsRef<Path>>(paths: &[P]) -> Vec<InputFile> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();

        if !path.exists() {
            files.push(InputFile::Missing(path.to_path_buf()));
            continue;
        }

        if !path.is_dir() {
            files.push(InputFile::Python(path.to_path_buf()));
            continue;
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry));

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() && has_python_extension(entry.path()) => {
                    files.push(InputFile::Python(entry.into_path()));
                }
                Ok(_) => {}
                Err(err) => tracing::warn!("Skipping unreadable entry: {err}"),
            }
        }
    }

    files
}
