//! Counters describing layout and render activity, snapshottable into the
//! structured log.

use std::time::Duration;

use serde_json::json;

use crate::layout::SolveReport;
use crate::logging::{LogEvent, LogFields, LogLevel};

#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    builds: u64,
    solves: u64,
    grow_rounds: u64,
    renders: u64,
    dirty_boxes: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree was rebuilt (startup or resize).
    pub fn record_build(&mut self) {
        self.builds = self.builds.saturating_add(1);
    }

    pub fn record_solve(&mut self, report: &SolveReport) {
        self.solves = self.solves.saturating_add(1);
        self.grow_rounds = self.grow_rounds.saturating_add(report.grow_rounds);
    }

    pub fn record_render(&mut self, dirty_count: usize) {
        self.renders = self.renders.saturating_add(1);
        self.dirty_boxes = self.dirty_boxes.saturating_add(dirty_count as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            builds: self.builds,
            solves: self.solves,
            grow_rounds: self.grow_rounds,
            renders: self.renders,
            dirty_boxes: self.dirty_boxes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub builds: u64,
    pub solves: u64,
    pub grow_rounds: u64,
    pub renders: u64,
    pub dirty_boxes: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("builds".to_string(), json!(self.builds));
        map.insert("solves".to_string(), json!(self.solves));
        map.insert("grow_rounds".to_string(), json!(self.grow_rounds));
        map.insert("renders".to_string(), json!(self.renders));
        map.insert("dirty_boxes".to_string(), json!(self.dirty_boxes));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_frames() {
        let mut metrics = LayoutMetrics::new();
        metrics.record_build();
        metrics.record_solve(&SolveReport {
            boxes: 7,
            grow_rounds: 3,
        });
        metrics.record_solve(&SolveReport {
            boxes: 7,
            grow_rounds: 1,
        });
        metrics.record_render(4);

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.builds, 1);
        assert_eq!(snapshot.solves, 2);
        assert_eq!(snapshot.grow_rounds, 4);
        assert_eq!(snapshot.renders, 1);
        assert_eq!(snapshot.dirty_boxes, 4);
        assert_eq!(snapshot.uptime_ms, 1500);
    }

    #[test]
    fn snapshot_becomes_a_log_event() {
        let metrics = LayoutMetrics::new();
        let event = metrics
            .snapshot(Duration::from_secs(2))
            .to_log_event("boxflow::metrics");
        assert_eq!(event.message, "layout_metrics");
        assert_eq!(event.fields.get("uptime_ms"), Some(&json!(2000)));
    }
}
