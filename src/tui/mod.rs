pub mod app;
pub mod host;
pub mod prompt;
pub mod view;

pub use app::App;
