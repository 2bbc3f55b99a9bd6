use crate::error::ScaffoldError;
use std::fs;
use std::path::{Path, PathBuf};

/// A single row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Lists `path` with directories first, then files, each group ordered by
/// byte-wise name. Dot entries are dropped unless `show_hidden` is set.
pub fn list_directory<P: AsRef<Path>>(
    path: P,
    show_hidden: bool,
) -> Result<Vec<Entry>, ScaffoldError> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(path)? {
        let dir_entry = dir_entry?;
        let entry = Entry {
            name: dir_entry.file_name().to_string_lossy().to_string(),
            path: dir_entry.path(),
            // follows symlinks so a link to a directory can be entered
            is_dir: dir_entry.path().is_dir(),
        };
        if show_hidden || !entry.is_hidden() {
            entries.push(entry);
        }
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}
