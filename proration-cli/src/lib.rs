pub mod config;
pub mod csv_loader;
pub mod format;
pub mod logging;
pub mod report;
