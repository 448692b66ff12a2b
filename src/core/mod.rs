pub mod config;
pub mod dispatch;
pub mod engine;
pub mod layout;
pub mod line_editor;
pub mod loader;
pub mod markup;
pub mod session;
pub mod terminal;
