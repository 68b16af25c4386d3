use crate::backend::LoggingBackend;
use crate::error::LoggingResult;
use crate::events::{MetricEvalResult, ProfileResult};
use crate::meta::RunMeta;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Structured-log sink: accumulates the whole run as one json artifact,
/// seeded with run metadata at construction and rewritten incrementally.
///
/// The artifact has the shape
/// `{"meta": {...}, "iterations": [{"iteration": 0, "learn": [..],
/// "test": [..], "passed_time": .., "remaining_time": ..}, ..]}` where
/// per-token arrays hold metric values in delivery order. The file is
/// rewritten every `metric_period`-th iteration and once more on drop, so
/// a crash loses at most one sampling window.
pub struct JsonLogBackend {
    path: PathBuf,
    meta: Value,
    iterations: Vec<Value>,
    current: serde_json::Map<String, Value>,
    metric_period: usize,
    iteration: usize,
    dirty: bool,
}

impl JsonLogBackend {
    pub fn new(path: &Path, meta: &RunMeta, metric_period: usize) -> LoggingResult<Self> {
        let mut backend = Self {
            path: path.to_path_buf(),
            meta: serde_json::to_value(meta)?,
            iterations: Vec::new(),
            current: serde_json::Map::new(),
            metric_period: metric_period.max(1),
            iteration: 0,
            dirty: false,
        };
        // Seed the artifact with metadata before any events arrive.
        backend.save()?;
        Ok(backend)
    }

    fn save(&mut self) -> LoggingResult<()> {
        let document = serde_json::json!({
            "meta": self.meta,
            "iterations": self.iterations,
        });
        let mut file = File::create(&self.path)?;
        file.write_all(serde_json::to_string(&document)?.as_bytes())?;
        self.dirty = false;
        Ok(())
    }
}

impl LoggingBackend for JsonLogBackend {
    fn on_metric(&mut self, token: &str, metric: &MetricEvalResult) -> LoggingResult<()> {
        let values = self
            .current
            .entry(token.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(values) = values {
            values.push(metric.value.into());
        }
        Ok(())
    }

    fn on_profile(&mut self, profile: &ProfileResult) -> LoggingResult<()> {
        self.current.insert("passed_time".to_string(), profile.passed_time_seconds.into());
        self.current.insert("remaining_time".to_string(), profile.remaining_time_seconds.into());
        Ok(())
    }

    fn on_iteration_end(&mut self) -> LoggingResult<()> {
        self.current.insert("iteration".to_string(), self.iteration.into());
        let entry = std::mem::take(&mut self.current);
        self.iterations.push(Value::Object(entry));
        self.dirty = true;

        if self.iteration % self.metric_period == 0 {
            self.save()?;
        }
        self.iteration += 1;
        Ok(())
    }
}

impl Drop for JsonLogBackend {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save() {
                tracing::error!(error = %e, path = %self.path.display(), "final json log write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{BestValueKind, LaunchMode, MetricDescriptor};
    use crate::meta::build_run_meta;
    use tempfile::TempDir;

    fn meta() -> RunMeta {
        let metrics = vec![MetricDescriptor::new("Logloss", true, false, BestValueKind::Min)];
        build_run_meta(
            2,
            "exp",
            &metrics,
            &["learn".to_string()],
            &["test".to_string()],
            LaunchMode::Train,
        )
    }

    #[test]
    fn test_artifact_is_seeded_with_meta_before_events() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("training.json");
        let _backend = JsonLogBackend::new(&path, &meta(), 1).unwrap();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["meta"]["name"], "exp");
        assert_eq!(doc["meta"]["iteration_count"], 2);
        assert_eq!(doc["iterations"], serde_json::json!([]));
    }

    #[test]
    fn test_iterations_accumulate_token_values_and_timing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("training.json");
        let mut backend = JsonLogBackend::new(&path, &meta(), 1).unwrap();

        backend.on_metric("learn", &MetricEvalResult::new("Logloss", 0.6, true)).unwrap();
        backend.on_metric("test", &MetricEvalResult::new("Logloss", 0.5, true)).unwrap();
        backend.on_profile(&ProfileResult::new(1.0, 9.0, 1)).unwrap();
        backend.on_iteration_end().unwrap();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let iterations = doc["iterations"].as_array().unwrap();
        assert_eq!(iterations.len(), 1);
        assert_eq!(iterations[0]["iteration"], 0);
        assert_eq!(iterations[0]["learn"], serde_json::json!([0.6]));
        assert_eq!(iterations[0]["test"], serde_json::json!([0.5]));
        assert_eq!(iterations[0]["passed_time"], 1.0);
        assert_eq!(iterations[0]["remaining_time"], 9.0);
    }

    #[test]
    fn test_metric_period_defers_rewrite_until_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("training.json");
        let mut backend = JsonLogBackend::new(&path, &meta(), 10).unwrap();

        backend.on_metric("learn", &MetricEvalResult::new("Logloss", 0.6, true)).unwrap();
        backend.on_iteration_end().unwrap(); // iteration 0 saves (0 % 10 == 0)
        backend.on_metric("learn", &MetricEvalResult::new("Logloss", 0.5, true)).unwrap();
        backend.on_iteration_end().unwrap(); // iteration 1 deferred

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["iterations"].as_array().unwrap().len(), 1);

        drop(backend);
        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["iterations"].as_array().unwrap().len(), 2);
    }
}
