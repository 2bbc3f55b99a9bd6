pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fs;
pub mod infra;
pub mod tui;

pub use config::Config;
pub use crate::core::commands::Command;
pub use crate::core::explorer::Explorer;
pub use crate::core::scaffold::Scaffolder;
pub use error::ScaffoldError;
