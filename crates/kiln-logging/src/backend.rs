use crate::error::LoggingResult;
use crate::events::{MetricEvalResult, ProfileResult};
use std::cell::RefCell;
use std::rc::Rc;

/// A sink rendering metric and profile events to one output medium.
///
/// Backends only override the operations they care about: metric-only
/// sinks (error files, dashboards) ignore profile events, profile-only
/// sinks (time log) ignore metrics. `on_iteration_end` is delivered once
/// per backend instance when a session flushes, so line-oriented sinks
/// know where one iteration stops and the next begins.
pub trait LoggingBackend {
    fn on_metric(&mut self, _token: &str, _metric: &MetricEvalResult) -> LoggingResult<()> {
        Ok(())
    }

    fn on_profile(&mut self, _profile: &ProfileResult) -> LoggingResult<()> {
        Ok(())
    }

    fn on_iteration_end(&mut self) -> LoggingResult<()> {
        Ok(())
    }
}

/// Shared handle to a backend.
///
/// One instance commonly serves several tokens (a combined json log, the
/// shared test error file), so handles are reference-counted rather than
/// cloned per token. Reporting is strictly single-threaded with at most
/// one open session at a time, hence `Rc<RefCell<..>>` rather than a lock.
pub type BackendHandle = Rc<RefCell<dyn LoggingBackend>>;

/// Wrap a backend into a shareable handle.
pub fn share<B: LoggingBackend + 'static>(backend: B) -> BackendHandle {
    Rc::new(RefCell::new(backend))
}
