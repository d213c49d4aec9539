use std::collections::HashMap;

use log::debug;

/// In-memory scalar metric logger.
///
/// Keeps the latest `(step, value)` pair per metric name. The logger is plain
/// owned state: whoever drives training holds it, nothing is shared globally.
#[derive(Debug, Default)]
pub struct MetricLogger {
    entries: HashMap<String, (usize, f64)>,
}

impl MetricLogger {
    /// Creates an empty metric logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scalar value for the metric at the given step, replacing any
    /// previous entry for that metric.
    pub fn scalar(&mut self, name: &str, value: f64, step: usize) {
        debug!("metric `{name}` = {value} at step {step}");
        self.entries.insert(name.to_string(), (step, value));
    }

    /// Returns the latest `(step, value)` recorded for the metric, if any.
    pub fn latest(&self, name: &str) -> Option<(usize, f64)> {
        self.entries.get(name).copied()
    }

    /// Returns the names of all recorded metrics.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_latest_value() {
        let mut logger = MetricLogger::new();
        logger.scalar("loss", 0.9, 1);
        logger.scalar("loss", 0.4, 2);

        assert_eq!(logger.latest("loss"), Some((2, 0.4)));
    }

    #[test]
    fn unknown_metric_is_none() {
        let logger = MetricLogger::new();

        assert_eq!(logger.latest("accuracy"), None);
    }

    #[test]
    fn tracks_metrics_independently() {
        let mut logger = MetricLogger::new();
        logger.scalar("loss", 0.5, 10);
        logger.scalar("map", 0.7, 10);

        assert_eq!(logger.latest("loss"), Some((10, 0.5)));
        assert_eq!(logger.latest("map"), Some((10, 0.7)));
        assert_eq!(logger.names().count(), 2);
    }
}
