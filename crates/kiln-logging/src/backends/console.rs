use crate::backend::LoggingBackend;
use crate::error::LoggingResult;
use crate::events::{MetricEvalResult, ProfileResult};

/// Line-oriented console sink.
///
/// Buffers one segment per token for the current iteration (main metric
/// only) and prints a single line when the profile event arrives, rate
/// limited to every `metric_period`-th iteration plus the final one.
pub struct ConsoleBackend {
    detailed_profile: bool,
    metric_period: usize,
    iteration_count: usize,
    segments: Vec<String>,
}

impl ConsoleBackend {
    #[must_use]
    pub fn new(detailed_profile: bool, metric_period: usize, iteration_count: usize) -> Self {
        Self {
            detailed_profile,
            metric_period: metric_period.max(1),
            iteration_count,
            segments: Vec::new(),
        }
    }

    fn should_print(&self, iteration: usize) -> bool {
        iteration % self.metric_period == 0 || iteration + 1 == self.iteration_count
    }

    fn render_line(&self, iteration: usize, profile: &ProfileResult) -> String {
        let mut line = format!("{iteration}:");
        for segment in &self.segments {
            line.push('\t');
            line.push_str(segment);
        }
        line.push_str(&format!(
            "\ttotal: {}\tremaining: {}",
            format_seconds(profile.passed_time_seconds),
            format_seconds(profile.remaining_time_seconds)
        ));
        line
    }
}

impl LoggingBackend for ConsoleBackend {
    fn on_metric(&mut self, token: &str, metric: &MetricEvalResult) -> LoggingResult<()> {
        if !metric.is_main_metric {
            return Ok(());
        }
        let mut segment = format!("{token}: {:.7}", metric.value);
        if let Some(best) = metric.best {
            segment.push_str(&format!("\tbest: {:.7} ({})", best.value, best.iteration));
        }
        self.segments.push(segment);
        Ok(())
    }

    fn on_profile(&mut self, profile: &ProfileResult) -> LoggingResult<()> {
        if let Some(iteration) = profile.passed_iterations.checked_sub(1) {
            if self.should_print(iteration) {
                println!("{}", self.render_line(iteration, profile));
                if self.detailed_profile {
                    println!("profile: passed {:.2}s", profile.passed_time_seconds);
                }
            }
        }
        self.segments.clear();
        Ok(())
    }
}

fn format_seconds(seconds: f64) -> String {
    if seconds >= 3600.0 {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds - hours * 3600.0) / 60.0).floor();
        format!("{hours}h {minutes}m")
    } else if seconds >= 60.0 {
        let minutes = (seconds / 60.0).floor();
        format!("{minutes}m {:.0}s", seconds - minutes * 60.0)
    } else {
        format!("{seconds:.2}s")
    }
}
