//! Directory tree rendering.
//!
//! Renders whatever is on disk under a root, not the list of files that were
//! written, so foreign files show up and re-renders reflect later edits.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldrError};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PREFIX: &str = "│  ";
const SPACE_PREFIX: &str = "   ";

/// A directory entry collected for rendering
#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Render `root` as a box-drawing tree.
///
/// The first line is the root folder name with a trailing `/`. Directories
/// come before files at every level. Directories that cannot be read are
/// left out.
pub fn render_tree(root: &Path) -> String {
    let mut lines = vec![format!("{}/", root_name(root))];
    render_dir(root, "", &mut lines);
    lines.join("\n")
}

fn render_dir(dir: &Path, prefix: &str, lines: &mut Vec<String>) {
    let entries = match read_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Skipping in tree: {}", e);
            return;
        }
    };

    let count = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let suffix = if entry.is_dir { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, connector, entry.name, suffix));

        if entry.is_dir {
            let child_prefix = format!("{}{}", prefix, if is_last { SPACE_PREFIX } else { PIPE_PREFIX });
            render_dir(&entry.path, &child_prefix, lines);
        }
    }
}

/// Folder name of `root`, resolving `.` and `..` against the filesystem.
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            fs::canonicalize(root)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| root.display().to_string())
}

/// List a directory: subdirectories first, each group sorted by name.
fn read_entries(dir: &Path) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| ScaffoldrError::TreeReadFailed {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let (mut dirs, mut files): (Vec<Entry>, Vec<Entry>) = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| Entry {
            name: entry.file_name().to_string_lossy().to_string(),
            path: entry.path(),
            // file_type does not follow symlinks, so link cycles cannot recurse
            is_dir: entry.file_type().map(|t| t.is_dir()).unwrap_or(false),
        })
        .partition(|entry| entry.is_dir);

    dirs.sort_by(|a, b| compare_names(&a.name, &b.name));
    files.sort_by(|a, b| compare_names(&a.name, &b.name));
    dirs.extend(files);
    Ok(dirs)
}

/// Case-insensitive name order, ties broken by exact bytes.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
