pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod frame;
pub mod logging;
pub mod severity;
pub mod system;
pub mod ui;
