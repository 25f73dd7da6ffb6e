use crate::core::NodeError;
use crossbeam_channel::{Receiver, Sender};

/// Destination for per-frame failures. Fire-and-forget.
pub trait FailureSink: Send + Sync {
    fn report(&self, node_id: &str, error: &NodeError);
}

/// Writes failures to the `log` facade at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl FailureSink for LogSink {
    fn report(&self, node_id: &str, error: &NodeError) {
        log::error!("{}: {}", node_id, error);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport {
    pub node_id: String,
    pub error: NodeError,
}

/// Logs failures and also forwards them to a channel for external monitoring
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<FailureReport>,
}

impl ChannelSink {
    pub fn unbounded() -> (Self, Receiver<FailureReport>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl FailureSink for ChannelSink {
    fn report(&self, node_id: &str, error: &NodeError) {
        LogSink.report(node_id, error);
        // Nobody listening is fine
        let _ = self.tx.send(FailureReport {
            node_id: node_id.to_string(),
            error: error.clone(),
        });
    }
}
