use super::MetricsCollector;

pub struct PipelineMonitor {
    collector: MetricsCollector,
}

impl PipelineMonitor {
    pub fn new(collector: MetricsCollector) -> Self {
        Self { collector }
    }

    pub fn generate_report(&self) -> String {
        let snapshot = self.collector.snapshot();

        if snapshot.is_empty() {
            return "No nodes registered".to_string();
        }

        let mut ids: Vec<_> = snapshot.keys().collect();
        ids.sort();

        let mut report = String::from("=== Node Metrics ===\n");
        for id in ids {
            let metrics = &snapshot[id];
            report.push_str(&format!(
                "\n[{}]\n  Frames: {} processed, {} dropped\n  Errors: {}\n  Avg Runtime: {}μs\n  Call Rate: {:.1} Hz\n",
                id,
                metrics.frames_processed,
                metrics.frames_dropped,
                plural(metrics.errors_count, "error"),
                metrics.avg_latency_us,
                metrics.call_frequency_hz,
            ));
        }

        report
    }
}

fn plural(count: u64, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}
