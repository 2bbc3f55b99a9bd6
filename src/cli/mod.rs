pub mod args;
pub mod host;
