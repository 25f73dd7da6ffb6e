pub mod buffer;
pub mod element;
pub mod error;
pub mod message;
pub mod node;

pub use buffer::{Buffer, TypedBuffer};
pub use element::{Element, ElementType, SupportedType};
pub use error::{ConfigError, NodeError};
pub use message::{Extent3, Image, ImageProperties, Message, MessageKind, RawData, TrackerSample, TrackingSet};
pub use node::ProcessingNode;
