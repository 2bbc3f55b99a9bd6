use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid directory: {0}")]
    InvalidDirectory(String),

    #[error("No file selected in the explorer view.")]
    NoSelection,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Failed to open {}: {reason}", path.display())]
    Editor { path: PathBuf, reason: String },
}
