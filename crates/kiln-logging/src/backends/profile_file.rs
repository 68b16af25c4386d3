use crate::backend::LoggingBackend;
use crate::error::LoggingResult;
use crate::events::ProfileResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Detailed-profile sink, plain-text variant. Active only when the
/// detailed-profile flag is set.
pub struct ProfileFileBackend {
    file: File,
}

impl ProfileFileBackend {
    pub fn new(path: &Path) -> LoggingResult<Self> {
        Ok(Self { file: File::create(path)? })
    }
}

impl LoggingBackend for ProfileFileBackend {
    fn on_profile(&mut self, profile: &ProfileResult) -> LoggingResult<()> {
        let iteration = profile.passed_iterations.saturating_sub(1);
        writeln!(self.file, "profile for iteration {iteration}:")?;
        writeln!(self.file, "  passed time: {:.2}s", profile.passed_time_seconds)?;
        writeln!(self.file, "  remaining time: {:.2}s", profile.remaining_time_seconds)?;
        Ok(())
    }
}

/// Detailed-profile sink, structured variant: one json object per profile
/// event, line-delimited.
pub struct JsonProfileBackend {
    file: File,
}

impl JsonProfileBackend {
    pub fn new(path: &Path) -> LoggingResult<Self> {
        Ok(Self { file: File::create(path)? })
    }
}

impl LoggingBackend for JsonProfileBackend {
    fn on_profile(&mut self, profile: &ProfileResult) -> LoggingResult<()> {
        writeln!(self.file, "{}", serde_json::to_string(profile)?)?;
        Ok(())
    }
}
