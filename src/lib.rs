pub mod api;
pub mod app;
pub mod form;
pub mod list;
pub mod logging;
pub mod realm;
pub mod settings;
pub mod types;
pub mod ui;
