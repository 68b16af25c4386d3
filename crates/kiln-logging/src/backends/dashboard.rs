use crate::backend::LoggingBackend;
use crate::error::LoggingResult;
use crate::events::MetricEvalResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Dashboard-summary sink: one physical destination per token, a
/// directory under `train_dir/<token>` holding a `scalars.jsonl` stream
/// of per-iteration scalar events.
pub struct DashboardBackend {
    file: File,
    iteration: usize,
    pending: Vec<(String, f64)>,
}

impl DashboardBackend {
    pub fn new(dir: &Path) -> LoggingResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            file: File::create(dir.join("scalars.jsonl"))?,
            iteration: 0,
            pending: Vec::new(),
        })
    }
}

impl LoggingBackend for DashboardBackend {
    fn on_metric(&mut self, _token: &str, metric: &MetricEvalResult) -> LoggingResult<()> {
        self.pending.push((metric.name.clone(), metric.value));
        Ok(())
    }

    fn on_iteration_end(&mut self) -> LoggingResult<()> {
        for (name, value) in self.pending.drain(..) {
            let event = serde_json::json!({
                "iteration": self.iteration,
                "name": name,
                "value": value,
            });
            writeln!(self.file, "{event}")?;
        }
        self.iteration += 1;
        Ok(())
    }
}
