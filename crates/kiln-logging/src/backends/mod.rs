//! Backend implementations, one module per sink variant.

mod console;
mod dashboard;
mod error_file;
mod json_log;
mod profile_file;
mod time_file;

pub use console::ConsoleBackend;
pub use dashboard::DashboardBackend;
pub use error_file::ErrorFileBackend;
pub use json_log::JsonLogBackend;
pub use profile_file::{JsonProfileBackend, ProfileFileBackend};
pub use time_file::TimeFileBackend;
