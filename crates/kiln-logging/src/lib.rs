//! Kiln Logging
//!
//! Metric and profile event reporting for the iterative training loop:
//! - Resolving output file paths (`OutputPaths`)
//! - Routing events from dataset tokens to backends (`Logger`)
//! - Scoped per-iteration flushing (`IterationSession`)
//! - Rendering backends (console, error files, json log, dashboards,
//!   time/profile logs)
//! - Replaying recorded history on snapshot resume (`write_history`)
//!
//! Delivery is strictly synchronous and single-threaded: every emission
//! completes (or fails) before returning, and at most one iteration
//! session is open at a time.

pub mod align;
pub mod backend;
pub mod backends;
pub mod builders;
pub mod config;
pub mod error;
pub mod events;
pub mod meta;
pub mod paths;
pub mod registry;
pub mod report;
pub mod session;

pub use align::align_metrics;
pub use backend::{share, BackendHandle, LoggingBackend};
pub use backends::{
    ConsoleBackend, DashboardBackend, ErrorFileBackend, JsonLogBackend, JsonProfileBackend,
    ProfileFileBackend, TimeFileBackend,
};
pub use builders::{add_console_backend, add_file_backends, initialize_file_backends};
pub use config::OutputFileOptions;
pub use error::{LoggingError, LoggingResult};
pub use events::{
    learn_token, test_tokens, BestInfo, BestValueKind, LaunchMode, MetricDescriptor,
    MetricEvalResult, ProfileResult,
};
pub use meta::{build_run_meta, BestDirection, BestValueMeta, MetricMeta, RunMeta};
pub use paths::{align_file_path_and_create_dir, OutputPaths};
pub use registry::Logger;
pub use report::{log_iteration, write_history, IterationTiming, TrainingHistory};
pub use session::IterationSession;
