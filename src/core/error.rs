use super::element::ElementType;
use super::message::MessageKind;
use thiserror::Error;

/// Per-frame failures. These never leave the node: the frame is dropped and
/// the error goes to the node's failure sink.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("no input message")]
    MissingInput,

    #[error("expected an image message, got {0}")]
    NotAnImage(MessageKind),

    #[error("input image type not supported: {0}")]
    UnsupportedInput(ElementType),

    #[error("output image type not supported: {0}")]
    UnsupportedOutput(ElementType),

    #[error("buffer does not hold {expected} data (tagged {found})")]
    BufferMismatch {
        expected: ElementType,
        found: ElementType,
    },

    #[error("transform produced no output for {input} -> {output}")]
    TransformFailed {
        input: ElementType,
        output: ElementType,
    },
}

/// Configuration failures. Fatal when they happen while building a node.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing configuration value for '{0}'")]
    MissingKey(String),

    #[error("configuration value for '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("configuration value for '{key}' is out of range: {value}")]
    OutOfRange { key: String, value: String },

    #[error("unknown parameter '{0}'")]
    UnknownKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
