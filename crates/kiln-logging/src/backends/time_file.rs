use crate::backend::LoggingBackend;
use crate::error::LoggingResult;
use crate::events::ProfileResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Plain-text time-remaining log: `iter\tpassed\tremaining`, one line per
/// profile event, in seconds.
pub struct TimeFileBackend {
    file: File,
}

impl TimeFileBackend {
    pub fn new(path: &Path) -> LoggingResult<Self> {
        let mut file = File::create(path)?;
        writeln!(file, "iter\tPassed\tRemaining")?;
        Ok(Self { file })
    }
}

impl LoggingBackend for TimeFileBackend {
    fn on_profile(&mut self, profile: &ProfileResult) -> LoggingResult<()> {
        let iteration = profile.passed_iterations.saturating_sub(1);
        writeln!(
            self.file,
            "{iteration}\t{}\t{}",
            profile.passed_time_seconds, profile.remaining_time_seconds
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_one_line_per_profile_event() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("time_left.tsv");
        let mut backend = TimeFileBackend::new(&path).unwrap();

        backend.on_profile(&ProfileResult::new(1.5, 8.5, 1)).unwrap();
        backend.on_profile(&ProfileResult::new(3.0, 7.0, 2)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "iter\tPassed\tRemaining\n0\t1.5\t8.5\n1\t3\t7\n");
    }
}
