pub mod config;
pub mod dispatch;
pub mod node;
pub mod transform;

pub use config::{parameter_registry, SradConfig};
pub use dispatch::dispatch;
pub use node::SradNode;
pub use transform::{ConvertTransform, FilterParams, FrameTransform, SRAD_EPSILON};
