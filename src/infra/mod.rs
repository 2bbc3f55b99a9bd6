//! Adapters for the system clipboard and logging.

pub mod clipboard;
pub mod logging;
