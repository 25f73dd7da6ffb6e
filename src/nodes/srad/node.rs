use super::config::{parameter_registry, SradConfig};
use super::dispatch::dispatch;
use super::transform::FrameTransform;
use crate::core::{ConfigError, Image, Message, NodeError, ProcessingNode};
use crate::engine::{Admission, BackpressurePolicy, GateState, ProcessingGate};
use crate::observability::{FailureSink, LogSink, NodeMetrics};
use crate::registry::{ConfigDictionary, ConfigSource, ParameterRegistry};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

/// Speckle-reducing filter stage.
///
/// Receives images of any supported element type, runs the external
/// transform with the configured output type and parameters, and emits a
/// new image that shares the input's properties and timestamps.
pub struct SradNode<T: FrameTransform> {
    id: String,
    admission: Admission,
    registry: ParameterRegistry,
    gate: ProcessingGate<SradConfig>,
    transform: T,
    metrics: Arc<NodeMetrics>,
    sink: Arc<dyn FailureSink>,
}

impl<T: FrameTransform> SradNode<T> {
    /// Builds the node and applies every parameter from `source`.
    /// Fails if `source` is missing any declared parameter.
    pub fn new(
        id: impl Into<String>,
        policy: BackpressurePolicy,
        transform: T,
        source: &dyn ConfigSource,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let config = SradConfig::load(source)?;
        log::debug!("{}: built with {:?}, {:?}", id, policy, config);

        Ok(Self {
            metrics: Arc::new(NodeMetrics::new(id.clone())),
            id,
            admission: Admission::new(policy),
            registry: parameter_registry(),
            gate: ProcessingGate::new(config),
            transform,
            sink: Arc::new(LogSink),
        })
    }

    /// Builds the node from parameter defaults overridden by a JSON object
    pub fn from_json(id: impl Into<String>, policy: BackpressurePolicy, transform: T, config: &Value) -> Result<Self> {
        let registry = parameter_registry();
        let mut source = ConfigDictionary::with_defaults(&registry);
        source.apply_json(&registry, config)?;
        Ok(Self::new(id, policy, transform, &source)?)
    }

    pub fn with_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Current configuration as of the last completed update
    pub fn config(&self) -> SradConfig {
        self.gate.snapshot()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Replaces the whole configuration in one critical section
    pub fn apply_all(&self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        let fresh = SradConfig::load(source)?;
        self.gate.reconfigure(|config| *config = fresh);
        Ok(())
    }

    /// Re-reads one parameter. Unknown keys are ignored; a known key that
    /// cannot be read keeps its previous value.
    pub fn apply_one(&self, key: &str, source: &dyn ConfigSource) {
        match self.gate.reconfigure(|config| config.apply_key(key, source)) {
            Ok(true) => log::debug!("{}: '{}' updated", self.id, key),
            Ok(false) => {}
            Err(e) => log::error!("{}: could not apply '{}': {}", self.id, key, e),
        }
    }

    pub fn submit(&self, message: Option<Message>) -> Option<Message> {
        let image = match message {
            Some(Message::Image(image)) => image,
            Some(other) => return self.fail(NodeError::NotAnImage(other.kind())),
            None => return self.fail(NodeError::MissingInput),
        };

        let Some(_permit) = self.admission.admit() else {
            self.metrics.record_frame_dropped();
            log::debug!("{}: busy, discarding frame at {}", self.id, image.sync_timestamp());
            return None;
        };

        let result = self.gate.process(|config| {
            let start = self.metrics.start_processing();
            let buffer = dispatch(&self.transform, &image, config);
            self.metrics.finish_processing(start);

            buffer.map(|buffer| {
                Image::new(
                    image.extent(),
                    buffer,
                    Arc::clone(image.properties()),
                    image.receive_timestamp(),
                    image.sync_timestamp(),
                )
            })
        });

        match result {
            Ok(output) => {
                self.metrics.record_frame_processed();
                Some(Message::from(output))
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&self, error: NodeError) -> Option<Message> {
        self.metrics.record_error();
        self.sink.report(&self.id, &error);
        None
    }
}

impl<T: FrameTransform> ProcessingNode for SradNode<T> {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn policy(&self) -> BackpressurePolicy {
        self.admission.policy()
    }

    fn parameters(&self) -> &ParameterRegistry {
        &self.registry
    }

    fn submit(&self, message: Option<Message>) -> Option<Message> {
        SradNode::submit(self, message)
    }

    fn configuration_changed(&self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        self.apply_all(source)
    }

    fn configuration_entry_changed(&self, key: &str, source: &dyn ConfigSource) {
        self.apply_one(key, source)
    }

    fn metrics(&self) -> Arc<NodeMetrics> {
        Arc::clone(&self.metrics)
    }
}
