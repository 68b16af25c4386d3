use crate::config::OutputFileOptions;
use crate::error::{LoggingError, LoggingResult};
use std::path::{Path, PathBuf};

/// Resolved output paths for one run.
///
/// Computed once from [`OutputFileOptions`] at startup. An empty path
/// means the corresponding artifact is not written; when
/// `allow_write_files` is off every field stays empty and no directory is
/// created.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub time_left_log: PathBuf,
    pub learn_error_log: PathBuf,
    pub test_error_log: Option<PathBuf>,
    pub meta_file: PathBuf,
    pub json_log: PathBuf,
    pub profile_log: PathBuf,
    pub snapshot_file: Option<PathBuf>,
    pub train_dir: PathBuf,
    pub names_prefix: String,
    pub experiment_name: String,
}

/// Resolve `file_name` against `base_dir` and make sure its parent
/// directory exists.
///
/// Absolute filenames ignore `base_dir`: the prefix is applied to the
/// basename and the file stays in its own directory. Relative filenames
/// are prefixed as a whole and joined onto `base_dir`. Directory creation
/// is recursive and idempotent.
pub fn align_file_path_and_create_dir(
    base_dir: &Path,
    file_name: &str,
    names_prefix: &str,
) -> LoggingResult<PathBuf> {
    let file_path = Path::new(file_name);
    let result = if file_path.is_absolute() {
        let parent = file_path.parent().unwrap_or_else(|| Path::new("/"));
        let base_name = file_path
            .file_name()
            .ok_or_else(|| LoggingError::Config(format!("not a file path: {file_name}")))?;
        let mut prefixed = names_prefix.to_string();
        prefixed.push_str(&base_name.to_string_lossy());
        parent.join(prefixed)
    } else {
        base_dir.join(format!("{names_prefix}{file_name}"))
    };

    if let Some(parent) = result.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(result)
}

fn require_filename<'a>(name: &'a str, what: &str) -> LoggingResult<&'a str> {
    if name.is_empty() {
        return Err(LoggingError::Config(format!("empty {what} filename")));
    }
    Ok(name)
}

impl OutputPaths {
    /// Resolve every configured output path, creating `train_dir` and any
    /// missing parent directories.
    ///
    /// Required filenames (time-left, learn-error, meta, json, profile)
    /// must be non-empty while writing is enabled; the test-error file is
    /// optional and the snapshot file only checked when `save_snapshot` is
    /// set.
    pub fn initialize(options: &OutputFileOptions) -> LoggingResult<Self> {
        if !options.allow_write_files {
            return Ok(Self::default());
        }

        let train_dir = &options.train_dir;
        if !train_dir.as_os_str().is_empty() && !train_dir.exists() {
            std::fs::create_dir_all(train_dir)?;
        }
        let prefix = options.names_prefix.as_str();

        let time_left_log = align_file_path_and_create_dir(
            train_dir,
            require_filename(&options.time_left_log_filename, "time_left")?,
            prefix,
        )?;
        let learn_error_log = align_file_path_and_create_dir(
            train_dir,
            require_filename(&options.learn_error_filename, "learn_error")?,
            prefix,
        )?;
        let test_error_log = if options.test_error_filename.is_empty() {
            None
        } else {
            Some(align_file_path_and_create_dir(train_dir, &options.test_error_filename, prefix)?)
        };
        let meta_file = align_file_path_and_create_dir(
            train_dir,
            require_filename(&options.meta_filename, "meta")?,
            prefix,
        )?;
        let snapshot_file = if options.save_snapshot {
            Some(align_file_path_and_create_dir(
                train_dir,
                require_filename(&options.snapshot_filename, "snapshot")?,
                prefix,
            )?)
        } else {
            None
        };

        // The json log and profile log are shared artifacts; the names
        // prefix never applies to them.
        let json_log = align_file_path_and_create_dir(
            train_dir,
            require_filename(&options.json_log_filename, "json_log")?,
            "",
        )?;
        let profile_log = align_file_path_and_create_dir(
            train_dir,
            require_filename(&options.profile_log_filename, "profile_log")?,
            "",
        )?;

        tracing::debug!(train_dir = %train_dir.display(), "resolved output paths");

        Ok(Self {
            time_left_log,
            learn_error_log,
            test_error_log,
            meta_file,
            json_log,
            profile_log,
            snapshot_file,
            train_dir: train_dir.clone(),
            names_prefix: options.names_prefix.clone(),
            experiment_name: options.experiment_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_path_ignores_base_dir() {
        let temp = TempDir::new().unwrap();
        let abs = temp.path().join("abs").join("f.txt");
        let resolved =
            align_file_path_and_create_dir(Path::new("/base"), abs.to_str().unwrap(), "p_").unwrap();

        assert_eq!(resolved, temp.path().join("abs").join("p_f.txt"));
        assert!(temp.path().join("abs").exists());
    }

    #[test]
    fn test_relative_path_joins_base_dir() {
        let temp = TempDir::new().unwrap();
        let resolved =
            align_file_path_and_create_dir(temp.path(), "f.txt", "p_").unwrap();
        assert_eq!(resolved, temp.path().join("p_f.txt"));
    }

    #[test]
    fn test_directory_creation_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("base");
        align_file_path_and_create_dir(&base, "sub/f.txt", "").unwrap();
        // second call must not fail
        align_file_path_and_create_dir(&base, "sub/f.txt", "").unwrap();
        assert!(base.join("sub").exists());
    }

    #[test]
    fn test_write_disabled_leaves_everything_empty() {
        let temp = TempDir::new().unwrap();
        let options = OutputFileOptions {
            allow_write_files: false,
            train_dir: temp.path().join("never_created"),
            ..Default::default()
        };

        let paths = OutputPaths::initialize(&options).unwrap();
        assert!(paths.time_left_log.as_os_str().is_empty());
        assert!(paths.learn_error_log.as_os_str().is_empty());
        assert!(paths.test_error_log.is_none());
        assert!(paths.meta_file.as_os_str().is_empty());
        assert!(paths.json_log.as_os_str().is_empty());
        assert!(paths.profile_log.as_os_str().is_empty());
        assert!(paths.snapshot_file.is_none());
        assert!(!temp.path().join("never_created").exists());
    }

    #[test]
    fn test_empty_required_filename_is_config_error() {
        let temp = TempDir::new().unwrap();
        let options = OutputFileOptions {
            train_dir: temp.path().to_path_buf(),
            learn_error_filename: String::new(),
            ..Default::default()
        };

        let err = OutputPaths::initialize(&options).unwrap_err();
        assert!(matches!(err, LoggingError::Config(_)));
    }

    #[test]
    fn test_names_prefix_skips_shared_artifacts() {
        let temp = TempDir::new().unwrap();
        let options = OutputFileOptions {
            train_dir: temp.path().to_path_buf(),
            names_prefix: "run1_".to_string(),
            save_snapshot: true,
            ..Default::default()
        };

        let paths = OutputPaths::initialize(&options).unwrap();
        assert_eq!(paths.learn_error_log, temp.path().join("run1_learn_error.tsv"));
        assert_eq!(paths.test_error_log, Some(temp.path().join("run1_test_error.tsv")));
        assert_eq!(paths.snapshot_file, Some(temp.path().join("run1_experiment.snapshot")));
        assert_eq!(paths.json_log, temp.path().join("kiln_training.json"));
        assert_eq!(paths.profile_log, temp.path().join("profile.log"));
    }

    #[test]
    fn test_missing_test_error_filename_is_allowed() {
        let temp = TempDir::new().unwrap();
        let options = OutputFileOptions {
            train_dir: temp.path().to_path_buf(),
            test_error_filename: String::new(),
            ..Default::default()
        };

        let paths = OutputPaths::initialize(&options).unwrap();
        assert!(paths.test_error_log.is_none());
    }

    #[test]
    fn test_train_dir_is_created() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("train");
        let options =
            OutputFileOptions { train_dir: dir.clone(), ..Default::default() };

        OutputPaths::initialize(&options).unwrap();
        assert!(dir.exists());
    }
}
