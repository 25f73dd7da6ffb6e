pub mod collector;
pub mod metrics;
pub mod monitor;
pub mod sink;

pub use collector::{MetricsCollector, MetricsSnapshot};
pub use metrics::NodeMetrics;
pub use monitor::PipelineMonitor;
pub use sink::{ChannelSink, FailureReport, FailureSink, LogSink};
