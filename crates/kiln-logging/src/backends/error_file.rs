use crate::backend::LoggingBackend;
use crate::error::LoggingResult;
use crate::events::MetricEvalResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Plain-text error log: one TSV line per iteration, one column per
/// metric, with a header row written before the first data line.
///
/// A single instance may be shared across several test tokens; their
/// metrics land as additional columns of the same line, in delivery
/// order. The iteration counter advances on every session, including ones
/// where this file received no values.
pub struct ErrorFileBackend {
    file: File,
    iteration: usize,
    wrote_header: bool,
    pending: Vec<(String, f64)>,
}

impl ErrorFileBackend {
    pub fn new(path: &Path) -> LoggingResult<Self> {
        Ok(Self {
            file: File::create(path)?,
            iteration: 0,
            wrote_header: false,
            pending: Vec::new(),
        })
    }
}

impl LoggingBackend for ErrorFileBackend {
    fn on_metric(&mut self, _token: &str, metric: &MetricEvalResult) -> LoggingResult<()> {
        self.pending.push((metric.name.clone(), metric.value));
        Ok(())
    }

    fn on_iteration_end(&mut self) -> LoggingResult<()> {
        if self.pending.is_empty() {
            self.iteration += 1;
            return Ok(());
        }

        if !self.wrote_header {
            write!(self.file, "iter")?;
            for (name, _) in &self.pending {
                write!(self.file, "\t{name}")?;
            }
            writeln!(self.file)?;
            self.wrote_header = true;
        }

        write!(self.file, "{}", self.iteration)?;
        for (_, value) in &self.pending {
            write!(self.file, "\t{value}")?;
        }
        writeln!(self.file)?;

        self.pending.clear();
        self.iteration += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_header_then_one_line_per_iteration() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("learn_error.tsv");
        let mut backend = ErrorFileBackend::new(&path).unwrap();

        backend.on_metric("learn", &MetricEvalResult::new("Logloss", 0.6, true)).unwrap();
        backend.on_metric("learn", &MetricEvalResult::new("AUC", 0.9, false)).unwrap();
        backend.on_iteration_end().unwrap();
        backend.on_metric("learn", &MetricEvalResult::new("Logloss", 0.5, true)).unwrap();
        backend.on_metric("learn", &MetricEvalResult::new("AUC", 0.95, false)).unwrap();
        backend.on_iteration_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "iter\tLogloss\tAUC\n0\t0.6\t0.9\n1\t0.5\t0.95\n");
    }

    #[test]
    fn test_empty_iteration_still_advances_counter() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_error.tsv");
        let mut backend = ErrorFileBackend::new(&path).unwrap();

        backend.on_iteration_end().unwrap();
        backend.on_metric("test", &MetricEvalResult::new("Logloss", 0.5, true)).unwrap();
        backend.on_iteration_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "iter\tLogloss\n1\t0.5\n");
    }

    #[test]
    fn test_shared_instance_merges_token_columns() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_error.tsv");
        let mut backend = ErrorFileBackend::new(&path).unwrap();

        backend.on_metric("test", &MetricEvalResult::new("Logloss", 0.5, true)).unwrap();
        backend.on_metric("test1", &MetricEvalResult::new("Logloss:1", 0.7, true)).unwrap();
        backend.on_iteration_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "iter\tLogloss\tLogloss:1\n0\t0.5\t0.7\n");
    }
}
