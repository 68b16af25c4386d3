use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output-file options recognized by the reporting layer.
///
/// With `allow_write_files` off, no path is resolved and no directory is
/// touched; every other filename option is ignored. Filenames may be
/// relative (resolved against `train_dir`) or absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFileOptions {
    pub allow_write_files: bool,
    pub train_dir: PathBuf,
    pub time_left_log_filename: String,
    pub learn_error_filename: String,
    /// Optional: empty disables the shared test error file.
    pub test_error_filename: String,
    pub meta_filename: String,
    /// Never prefixed with `names_prefix`; the json log is one shared artifact.
    pub json_log_filename: String,
    /// Never prefixed with `names_prefix`.
    pub profile_log_filename: String,
    pub save_snapshot: bool,
    pub snapshot_filename: String,
    /// Enables the plain-text and json detailed-profile backends.
    pub detailed_profile: bool,
    /// Console/json sampling interval in iterations; 1 reports every iteration.
    pub metric_period: usize,
    pub experiment_name: String,
    /// Prepended to per-run file basenames and to set names in run metadata.
    pub names_prefix: String,
}

impl Default for OutputFileOptions {
    fn default() -> Self {
        Self {
            allow_write_files: true,
            train_dir: PathBuf::new(),
            time_left_log_filename: "time_left.tsv".to_string(),
            learn_error_filename: "learn_error.tsv".to_string(),
            test_error_filename: "test_error.tsv".to_string(),
            meta_filename: "meta.tsv".to_string(),
            json_log_filename: "kiln_training.json".to_string(),
            profile_log_filename: "profile.log".to_string(),
            save_snapshot: false,
            snapshot_filename: "experiment.snapshot".to_string(),
            detailed_profile: false,
            metric_period: 1,
            experiment_name: String::new(),
            names_prefix: String::new(),
        }
    }
}
