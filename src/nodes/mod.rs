pub mod srad;

pub use srad::{ConvertTransform, FrameTransform, SradConfig, SradNode};
