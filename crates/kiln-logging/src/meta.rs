use crate::events::{BestValueKind, LaunchMode, MetricDescriptor};
use serde::{Deserialize, Serialize};

/// Best-value target as it appears in run metadata.
///
/// A fixed target serializes as a json number, a directional target as
/// the string `"Min"` or `"Max"`; consumers must be able to tell the two
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BestValueMeta {
    Fixed(f64),
    Direction(BestDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestDirection {
    Min,
    Max,
}

impl From<BestValueKind> for BestValueMeta {
    fn from(kind: BestValueKind) -> Self {
        match kind {
            BestValueKind::FixedValue(value) => Self::Fixed(value),
            BestValueKind::Min => Self::Direction(BestDirection::Min),
            BestValueKind::Max => Self::Direction(BestDirection::Max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricMeta {
    pub name: String,
    pub best_value: BestValueMeta,
}

/// Run metadata handed to the json log backend once, at construction,
/// before any per-iteration events arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub iteration_count: usize,
    pub name: String,
    pub learn_sets: Vec<String>,
    pub test_sets: Vec<String>,
    pub learn_metrics: Vec<MetricMeta>,
    pub test_metrics: Vec<MetricMeta>,
    pub launch_mode: LaunchMode,
}

/// Assemble run metadata from the full metric description list.
///
/// A metric lands in `learn_metrics` only when learn sets exist and it is
/// not flagged skip-on-train; it lands in `test_metrics` whenever test
/// sets exist, regardless of that flag.
pub fn build_run_meta(
    iteration_count: usize,
    experiment_name: &str,
    metrics: &[MetricDescriptor],
    learn_set_names: &[String],
    test_set_names: &[String],
    launch_mode: LaunchMode,
) -> RunMeta {
    let mut learn_metrics = Vec::new();
    let mut test_metrics = Vec::new();
    for metric in metrics {
        let meta = MetricMeta {
            name: metric.name.clone(),
            best_value: metric.best_value.into(),
        };
        if !learn_set_names.is_empty() && !metric.skip_on_train {
            learn_metrics.push(meta.clone());
        }
        if !test_set_names.is_empty() {
            test_metrics.push(meta);
        }
    }

    RunMeta {
        iteration_count,
        name: experiment_name.to_string(),
        learn_sets: learn_set_names.to_vec(),
        test_sets: test_set_names.to_vec(),
        learn_metrics,
        test_metrics,
        launch_mode,
    }
}
