pub mod commands;
pub mod explorer;
pub mod host;
pub mod scaffold;
pub mod selection;
