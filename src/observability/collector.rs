use super::NodeMetrics;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub node_id: String,
    pub frames_processed: u64,
    pub frames_dropped: u64,
    pub errors_count: u64,
    pub avg_latency_us: u64,
    pub call_frequency_hz: f64,
}

impl MetricsSnapshot {
    pub fn of(metrics: &NodeMetrics) -> Self {
        Self {
            node_id: metrics.node_id().to_string(),
            frames_processed: metrics.frames_processed(),
            frames_dropped: metrics.frames_dropped(),
            errors_count: metrics.errors_count(),
            avg_latency_us: metrics.avg_latency_us(),
            call_frequency_hz: metrics.call_frequency_hz(),
        }
    }
}

/// Shared handles to the metrics of every node a runtime has built
#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: HashMap<String, Arc<NodeMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
        }
    }

    pub fn register(&mut self, metrics: Arc<NodeMetrics>) {
        self.metrics.insert(metrics.node_id().to_string(), metrics);
    }

    pub fn snapshot(&self) -> HashMap<String, MetricsSnapshot> {
        self.metrics
            .iter()
            .map(|(id, metrics)| (id.clone(), MetricsSnapshot::of(metrics)))
            .collect()
    }

    pub fn get_node_metrics(&self, node_id: &str) -> Option<Arc<NodeMetrics>> {
        self.metrics.get(node_id).cloned()
    }
}
