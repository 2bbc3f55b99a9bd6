//! Host driven by command line answers instead of interactive prompts.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::core::host::{Clipboard, Host, InputOptions, Level, MemoryClipboard};
use crate::error::ScaffoldError;

/// The selection comes only from `--path`; without it there is nothing a
/// copy-path action could report, so the system clipboard is never used.
pub struct ArgsHost {
    clipboard: MemoryClipboard,
    path: Option<PathBuf>,
    choice: Option<String>,
    name: Option<String>,
    errors: usize,
}

impl ArgsHost {
    pub fn new(path: Option<PathBuf>, choice: Option<String>, name: Option<String>) -> Self {
        Self {
            clipboard: MemoryClipboard::default(),
            path,
            choice,
            name,
            errors: 0,
        }
    }

    /// Number of error notices shown so far.
    pub fn errors(&self) -> usize {
        self.errors
    }
}

impl Host for ArgsHost {
    fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut self.clipboard
    }

    fn selected_resource(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn can_copy_selection(&self) -> bool {
        false
    }

    fn copy_selected_path(&mut self) -> Result<(), ScaffoldError> {
        if let Some(path) = &self.path {
            let text = path.to_string_lossy().to_string();
            self.clipboard.write_text(&text)?;
        }
        Ok(())
    }

    fn pick(&mut self, items: &[String], _placeholder: &str) -> Option<String> {
        let choice = self.choice.take()?;
        if items.contains(&choice) {
            return Some(choice);
        }
        warn!(choice = %choice, "choice not offered");
        self.notify(
            Level::Error,
            &format!("Unknown choice {choice:?}, expected one of: {}", items.join(", ")),
        );
        None
    }

    fn prompt(&mut self, _options: &InputOptions) -> Option<String> {
        self.name.take()
    }

    fn notify(&mut self, level: Level, message: &str) {
        match level {
            Level::Info => println!("{message}"),
            Level::Error => {
                self.errors += 1;
                eprintln!("error: {message}");
            }
        }
    }

    fn open_document(&mut self, path: &Path) -> Result<(), ScaffoldError> {
        println!("{}", path.display());
        Ok(())
    }
}
