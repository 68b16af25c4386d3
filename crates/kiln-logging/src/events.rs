use serde::{Deserialize, Serialize};

/// How "best value so far" is defined for a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BestValueKind {
    /// The metric targets a known numeric value (e.g. an exact-match score of 1.0).
    FixedValue(f64),
    /// Lower is better.
    Min,
    /// Higher is better.
    Max,
}

/// Full description of one metric as declared by the metric library.
///
/// The descriptor list is positional: descriptor 0 is the main metric
/// (used for best-value tracking and early-stopping display), and the
/// order matches the order values arrive in per-iteration arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub name: String,
    /// True only for the descriptor at position 0.
    pub is_main_metric: bool,
    /// Metric is not computed on the learn set; learn value arrays never
    /// contain an entry for it.
    pub skip_on_train: bool,
    pub best_value: BestValueKind,
}

impl MetricDescriptor {
    pub fn new(name: impl Into<String>, is_main_metric: bool, skip_on_train: bool, best_value: BestValueKind) -> Self {
        Self { name: name.into(), is_main_metric, skip_on_train, best_value }
    }
}

/// Best value observed so far for a metric, with the iteration it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestInfo {
    pub value: f64,
    pub iteration: usize,
}

/// One evaluated metric value for one dataset stream at one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEvalResult {
    pub name: String,
    pub value: f64,
    pub is_main_metric: bool,
    /// Present only when reporting against the primary test token.
    pub best: Option<BestInfo>,
}

impl MetricEvalResult {
    pub fn new(name: impl Into<String>, value: f64, is_main_metric: bool) -> Self {
        Self { name: name.into(), value, is_main_metric, best: None }
    }

    pub fn with_best(
        name: impl Into<String>,
        value: f64,
        best_value: f64,
        best_iteration: usize,
        is_main_metric: bool,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            is_main_metric,
            best: Some(BestInfo { value: best_value, iteration: best_iteration }),
        }
    }
}

/// Timing snapshot delivered once per iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub passed_time_seconds: f64,
    pub remaining_time_seconds: f64,
    /// Number of iterations completed so far, including the current one.
    pub passed_iterations: usize,
}

impl ProfileResult {
    pub fn new(passed_time_seconds: f64, remaining_time_seconds: f64, passed_iterations: usize) -> Self {
        Self { passed_time_seconds, remaining_time_seconds, passed_iterations }
    }
}

/// How the run was launched; recorded in run metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchMode {
    Train,
    Eval,
    CV,
}

/// Token identifying the learn dataset stream.
#[must_use]
pub fn learn_token() -> &'static str {
    "learn"
}

/// Tokens identifying the test dataset streams: `test`, `test1`, `test2`, ...
///
/// Test token 0 is the primary one and the only one carrying best-value
/// tracking.
#[must_use]
pub fn test_tokens(test_count: usize) -> Vec<String> {
    (0..test_count)
        .map(|idx| if idx == 0 { "test".to_string() } else { format!("test{idx}") })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_naming() {
        assert_eq!(learn_token(), "learn");
        assert_eq!(test_tokens(0), Vec::<String>::new());
        assert_eq!(test_tokens(3), vec!["test", "test1", "test2"]);
    }

    #[test]
    fn test_metric_eval_result_best() {
        let plain = MetricEvalResult::new("Loss", 0.5, true);
        assert!(plain.best.is_none());

        let with_best = MetricEvalResult::with_best("Loss", 0.5, 0.42, 7, true);
        assert_eq!(with_best.best, Some(BestInfo { value: 0.42, iteration: 7 }));
    }
}
