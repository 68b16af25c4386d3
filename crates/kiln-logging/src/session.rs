use crate::error::LoggingResult;
use crate::events::{MetricEvalResult, ProfileResult};
use crate::registry::Logger;

/// Scoped per-iteration emitter.
///
/// A session is valid for exactly one iteration: record metric events per
/// token, record exactly one profile event, then call [`finish`] to flush
/// everything to the registered backends. Backends observe the whole
/// iteration as one coherent unit: metric events in emission order (each
/// fanned out to that token's backends in registration order), then the
/// profile event, then a single end-of-iteration signal per backend
/// instance.
///
/// If a session is dropped without `finish` (early return, propagated
/// error, panic unwinding) the flush still runs, so no iteration is left
/// half-reported to some backends and not others. Flush errors on the
/// drop path cannot be returned and are reported via `tracing::error!`;
/// call `finish` to observe them.
///
/// [`finish`]: IterationSession::finish
pub struct IterationSession<'a> {
    logger: &'a Logger,
    metrics: Vec<(String, MetricEvalResult)>,
    profile: Option<ProfileResult>,
    flushed: bool,
}

impl<'a> IterationSession<'a> {
    #[must_use]
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger, metrics: Vec::new(), profile: None, flushed: false }
    }

    /// Record one metric event for `token`.
    pub fn output_metric(&mut self, token: &str, metric: MetricEvalResult) {
        self.metrics.push((token.to_string(), metric));
    }

    /// Record the iteration's profile event. Must be called exactly once
    /// per session; a second call replaces the first.
    pub fn output_profile(&mut self, profile: ProfileResult) {
        self.profile = Some(profile);
    }

    /// Flush the iteration to every registered backend and consume the
    /// session.
    ///
    /// A backend write failure propagates immediately; remaining backends
    /// are not attempted and no retry occurs.
    pub fn finish(mut self) -> LoggingResult<()> {
        self.flush()
    }

    fn flush(&mut self) -> LoggingResult<()> {
        if self.flushed {
            return Ok(());
        }
        self.flushed = true;

        for (token, metric) in &self.metrics {
            for backend in self.logger.backends_for(token) {
                backend.borrow_mut().on_metric(token, metric)?;
            }
        }
        if let Some(profile) = &self.profile {
            for backend in self.logger.profile_backends() {
                backend.borrow_mut().on_profile(profile)?;
            }
        }
        for backend in self.logger.unique_backends() {
            backend.borrow_mut().on_iteration_end()?;
        }
        Ok(())
    }
}

impl Drop for IterationSession<'_> {
    fn drop(&mut self) {
        if !self.flushed {
            if let Err(e) = self.flush() {
                tracing::error!(error = %e, "iteration flush failed during session drop");
            }
        }
    }
}
