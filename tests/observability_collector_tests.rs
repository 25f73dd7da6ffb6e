use sonotab::observability::{MetricsCollector, NodeMetrics, PipelineMonitor};
use std::sync::Arc;

#[test]
fn test_collector_registration() {
    let mut collector = MetricsCollector::new();

    let metrics1 = Arc::new(NodeMetrics::new("srad_a"));
    let metrics2 = Arc::new(NodeMetrics::new("srad_b"));

    collector.register(metrics1.clone());
    collector.register(metrics2.clone());

    metrics1.record_frame_processed();
    metrics2.record_frame_dropped();
    metrics2.record_error();

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["srad_a"].frames_processed, 1);
    assert_eq!(snapshot["srad_b"].frames_dropped, 1);
    assert_eq!(snapshot["srad_b"].errors_count, 1);
    assert!(collector.get_node_metrics("srad_a").is_some());
    assert!(collector.get_node_metrics("missing").is_none());
}

#[test]
fn test_snapshot_serializes() {
    let mut collector = MetricsCollector::new();
    collector.register(Arc::new(NodeMetrics::new("srad")));

    let json = serde_json::to_value(&collector.snapshot()["srad"]).unwrap();
    assert_eq!(json["node_id"], "srad");
    assert_eq!(json["frames_processed"], 0);
    assert_eq!(json["call_frequency_hz"], 0.0);
}

#[test]
fn test_monitor_report() {
    let mut collector = MetricsCollector::new();
    let metrics = Arc::new(NodeMetrics::new("srad"));
    collector.register(metrics.clone());

    metrics.record_frame_processed();
    metrics.record_frame_dropped();
    metrics.record_error();

    let report = PipelineMonitor::new(collector).generate_report();
    assert!(report.contains("[srad]"));
    assert!(report.contains("1 processed, 1 dropped"));
    assert!(report.contains("1 error\n"));
}

#[test]
fn test_monitor_without_nodes() {
    let monitor = PipelineMonitor::new(MetricsCollector::new());
    assert_eq!(monitor.generate_report(), "No nodes registered");
}
