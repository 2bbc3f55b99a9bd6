//! Directory, package and file creation.
//!
//! "Already exists" is informational for directories and packages but an
//! error for files.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Language;
use crate::core::host::{Host, Level};
use crate::error::ScaffoldError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffolder {
    language: Language,
}

impl Scaffolder {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn create_plain_directory<H: Host + ?Sized>(
        &self,
        host: &mut H,
        base_dir: &Path,
        name: &str,
    ) -> Result<(), ScaffoldError> {
        let dir = base_dir.join(name);
        if dir.exists() {
            host.notify(
                Level::Info,
                &format!("Directory already exists at {}", dir.display()),
            );
            return Ok(());
        }

        create_dir(&dir)
    }

    /// Creates the package directory if needed, then its initializer file.
    /// No rollback: the directory stays if the initializer write fails.
    pub fn create_typed_package<H: Host + ?Sized>(
        &self,
        host: &mut H,
        base_dir: &Path,
        name: &str,
    ) -> Result<(), ScaffoldError> {
        let dir = base_dir.join(name);
        if !dir.exists() {
            create_dir(&dir)?;
        }

        let initializer = dir.join(&self.language.initializer);
        if initializer.exists() || !create_empty_file(&initializer)? {
            host.notify(
                Level::Info,
                &format!(
                    "{} package already exists at {}",
                    self.language.name,
                    dir.display()
                ),
            );
        }
        Ok(())
    }

    /// Writes an empty file and opens it. An existing file is left alone and
    /// reported as an error.
    pub fn create_plain_file<H: Host + ?Sized>(
        &self,
        host: &mut H,
        base_dir: &Path,
        name: &str,
    ) -> Result<(), ScaffoldError> {
        let path = base_dir.join(name);
        if path.exists() || !create_empty_file(&path)? {
            host.notify(
                Level::Error,
                &format!("File {} already exists", path.display()),
            );
            return Ok(());
        }

        host.open_document(&path)
    }

    pub fn create_typed_file<H: Host + ?Sized>(
        &self,
        host: &mut H,
        base_dir: &Path,
        name: &str,
    ) -> Result<(), ScaffoldError> {
        let file_name = self.typed_file_name(name);
        self.create_plain_file(host, base_dir, &file_name)
    }

    /// Appends the extension unless `name` already ends with it (case
    /// sensitive).
    pub fn typed_file_name(&self, name: &str) -> String {
        if name.ends_with(&self.language.extension) {
            name.to_owned()
        } else {
            format!("{name}{}", self.language.extension)
        }
    }
}

impl Default for Scaffolder {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir(path).map_err(|source| ScaffoldError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "created directory");
    Ok(())
}

/// `Ok(false)` if something appeared at `path` after the existence check.
fn create_empty_file(path: &Path) -> Result<bool, ScaffoldError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            info!(path = %path.display(), "created file");
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(ScaffoldError::Create {
            path: PathBuf::from(path),
            source,
        }),
    }
}
