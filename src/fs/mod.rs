pub mod listing;

pub use listing::{Entry, list_directory};
