//! The surface a scaffolding workflow needs from whatever is driving it.

use std::path::{Path, PathBuf};

use crate::error::ScaffoldError;

/// Host action that copies the selected item's path to the clipboard.
pub const COPY_PATH_ACTION: &str = "copyFilePath";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Options for a single-line text prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOptions {
    pub prompt: String,
    pub placeholder: Option<String>,
}

impl InputOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            placeholder: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

pub trait Clipboard {
    fn read_text(&mut self) -> Result<String, ScaffoldError>;
    fn write_text(&mut self, text: &str) -> Result<(), ScaffoldError>;
}

pub trait Host {
    fn clipboard(&mut self) -> &mut dyn Clipboard;

    /// The selected item, for hosts that can report it directly.
    fn selected_resource(&self) -> Option<PathBuf> {
        None
    }

    /// Whether [`COPY_PATH_ACTION`] can report a selection at all. Hosts
    /// without one never touch the clipboard.
    fn can_copy_selection(&self) -> bool {
        true
    }

    /// Runs [`COPY_PATH_ACTION`]. Leaves the clipboard untouched when
    /// nothing is selected.
    fn copy_selected_path(&mut self) -> Result<(), ScaffoldError>;

    /// Single-choice picker. `None` means the user dismissed it.
    fn pick(&mut self, items: &[String], placeholder: &str) -> Option<String>;

    /// Single-line input. `None` means the user dismissed it.
    fn prompt(&mut self, options: &InputOptions) -> Option<String>;

    fn notify(&mut self, level: Level, message: &str);

    fn open_document(&mut self, path: &Path) -> Result<(), ScaffoldError>;
}

/// Clipboard held in process memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ScaffoldError> {
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ScaffoldError> {
        self.text = text.to_owned();
        Ok(())
    }
}
