use super::error::ConfigError;
use super::message::Message;
use crate::engine::BackpressurePolicy;
use crate::observability::NodeMetrics;
use crate::registry::{ConfigSource, ParameterRegistry};
use std::sync::Arc;

/// Base trait for processing stages driven by the pipeline runtime
pub trait ProcessingNode: Send + Sync {
    fn node_id(&self) -> &str;

    /// Backpressure behaviour chosen when the node was built
    fn policy(&self) -> BackpressurePolicy;

    fn parameters(&self) -> &ParameterRegistry;

    /// Processes one message. Per-frame failures are absorbed here and
    /// come back as `None`.
    fn submit(&self, message: Option<Message>) -> Option<Message>;

    /// Re-reads every parameter from `source`
    fn configuration_changed(&self, source: &dyn ConfigSource) -> Result<(), ConfigError>;

    /// Re-reads a single parameter after an external change
    fn configuration_entry_changed(&self, key: &str, source: &dyn ConfigSource);

    fn metrics(&self) -> Arc<NodeMetrics>;
}
