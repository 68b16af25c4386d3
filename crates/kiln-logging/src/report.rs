use crate::align::align_metrics;
use crate::error::LoggingResult;
use crate::events::{MetricDescriptor, MetricEvalResult, ProfileResult};
use crate::registry::Logger;
use crate::session::IterationSession;
use serde::{Deserialize, Serialize};

/// Timing record for one completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationTiming {
    pub passed_seconds: f64,
    pub remaining_seconds: f64,
}

/// Full recorded history of a run, as stored in a snapshot.
///
/// `test_metrics` is indexed `[iteration][test][metric]`; learn rows hold
/// one value per descriptor (history rows are not skip-compacted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub timings: Vec<IterationTiming>,
    pub learn_metrics: Vec<Vec<f64>>,
    pub test_metrics: Vec<Vec<Vec<f64>>>,
}

fn test_metric_result(
    description: &MetricDescriptor,
    test_idx: usize,
    value: f64,
    best: Option<(f64, usize)>,
) -> MetricEvalResult {
    if test_idx == 0 {
        // Only the primary test token carries best-value tracking.
        match best {
            Some((best_value, best_iteration)) => MetricEvalResult::with_best(
                description.name.clone(),
                value,
                best_value,
                best_iteration,
                description.is_main_metric,
            ),
            None => MetricEvalResult::new(description.name.clone(), value, description.is_main_metric),
        }
    } else {
        // Secondary test tokens are disambiguated by index instead.
        MetricEvalResult::new(
            format!("{}:{}", description.name, test_idx),
            value,
            description.is_main_metric,
        )
    }
}

/// Report one live iteration through a single session.
///
/// The iteration index is derived from `profile.passed_iterations - 1`;
/// with `passed_iterations == 0` no metric rows exist yet and only the
/// profile event is emitted. Learn values are skip-aligned against the
/// full description list; test values are positional. With
/// `output_errors` off, metric emission is suppressed but the profile
/// event still goes out.
#[allow(clippy::too_many_arguments)]
pub fn log_iteration(
    metrics_description: &[MetricDescriptor],
    learn_errors_history: &[Vec<f64>],
    test_errors_history: &[Vec<Vec<f64>>],
    best_error_value: f64,
    best_iteration: usize,
    profile: &ProfileResult,
    learn_token: &str,
    test_tokens: &[String],
    output_errors: bool,
    logger: &Logger,
) -> LoggingResult<()> {
    let mut session = IterationSession::new(logger);
    let iteration = profile.passed_iterations.checked_sub(1);

    if let Some(iteration) = iteration.filter(|_| output_errors) {
        if let Some(learn_errors) = learn_errors_history.get(iteration) {
            for (description, value) in align_metrics(metrics_description, learn_errors) {
                session.output_metric(
                    learn_token,
                    MetricEvalResult::new(description.name.clone(), value, description.is_main_metric),
                );
            }
        }
        if let Some(test_errors) = test_errors_history.get(iteration) {
            for (test_idx, token) in test_tokens.iter().enumerate() {
                let Some(values) = test_errors.get(test_idx) else {
                    break;
                };
                for (metric_idx, &value) in values.iter().enumerate() {
                    let Some(description) = metrics_description.get(metric_idx) else {
                        break;
                    };
                    session.output_metric(
                        token,
                        test_metric_result(
                            description,
                            test_idx,
                            value,
                            Some((best_error_value, best_iteration)),
                        ),
                    );
                }
            }
        }
    }

    session.output_profile(profile.clone());
    session.finish()
}

/// Replay a recorded history through fresh sessions, one per iteration.
///
/// Used on snapshot resume to reconstruct the exact backend-visible event
/// sequence the run would have produced without interruption: per
/// iteration, learn metrics, then test metrics per token, then exactly
/// one profile event. History carries no best-value data, so replayed
/// test results omit it.
pub fn write_history(
    metrics_description: &[MetricDescriptor],
    history: &TrainingHistory,
    learn_token: &str,
    test_tokens: &[String],
    logger: &Logger,
) -> LoggingResult<()> {
    for (iteration, timing) in history.timings.iter().enumerate() {
        let mut session = IterationSession::new(logger);

        if let Some(learn_values) = history.learn_metrics.get(iteration) {
            for (metric_idx, &value) in learn_values.iter().enumerate() {
                let Some(description) = metrics_description.get(metric_idx) else {
                    break;
                };
                session.output_metric(
                    learn_token,
                    MetricEvalResult::new(description.name.clone(), value, description.is_main_metric),
                );
            }
        }
        if let Some(test_values) = history.test_metrics.get(iteration) {
            for (test_idx, token) in test_tokens.iter().enumerate() {
                let Some(values) = test_values.get(test_idx) else {
                    break;
                };
                for (metric_idx, &value) in values.iter().enumerate() {
                    let Some(description) = metrics_description.get(metric_idx) else {
                        break;
                    };
                    session.output_metric(token, test_metric_result(description, test_idx, value, None));
                }
            }
        }

        session.output_profile(ProfileResult::new(
            timing.passed_seconds,
            timing.remaining_seconds,
            iteration + 1,
        ));
        session.finish()?;
    }
    Ok(())
}
