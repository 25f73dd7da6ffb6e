use super::buffer::Buffer;
use super::element::ElementType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Spatial extent of an image or volume, in elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent3 {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Extent3 {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Single 2D frame
    pub fn plane(x: usize, y: usize) -> Self {
        Self { x, y, z: 1 }
    }

    /// Number of samples the extent spans, or `None` if it overflows `usize`
    pub fn element_count(&self) -> Option<usize> {
        self.x.checked_mul(self.y)?.checked_mul(self.z)
    }
}

/// Geometry and acquisition properties attached to an image.
///
/// Treated as immutable once attached to a message, so it is shared between
/// an input image and the images derived from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageProperties {
    pub num_scanlines: usize,
    pub num_samples: usize,
    pub depth_mm: f64,
    pub entries: HashMap<String, String>,
}

impl ImageProperties {
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

/// One frame
#[derive(Debug, Clone)]
pub struct Image {
    extent: Extent3,
    buffer: Buffer,
    properties: Arc<ImageProperties>,
    /// Seconds, when the frame was received by the pipeline
    receive_timestamp: f64,
    /// Seconds, on the pipeline's synchronization clock
    sync_timestamp: f64,
}

impl Image {
    pub fn new(
        extent: Extent3,
        buffer: Buffer,
        properties: Arc<ImageProperties>,
        receive_timestamp: f64,
        sync_timestamp: f64,
    ) -> Self {
        Self {
            extent,
            buffer,
            properties,
            receive_timestamp,
            sync_timestamp,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.buffer.element_type()
    }

    pub fn extent(&self) -> Extent3 {
        self.extent
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn properties(&self) -> &Arc<ImageProperties> {
        &self.properties
    }

    pub fn receive_timestamp(&self) -> f64 {
        self.receive_timestamp
    }

    pub fn sync_timestamp(&self) -> f64 {
        self.sync_timestamp
    }
}

/// Unbeamformed channel data
#[derive(Debug, Clone)]
pub struct RawData {
    pub num_channels: usize,
    pub num_samples: usize,
    pub buffer: Buffer,
    pub receive_timestamp: f64,
    pub sync_timestamp: f64,
}

/// One pose reported by a tracking system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSample {
    pub tracker_id: String,
    /// Row-major 4x4 homogeneous transform
    pub matrix: [f64; 16],
    pub quality: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSet {
    pub samples: Vec<TrackerSample>,
    pub receive_timestamp: f64,
    pub sync_timestamp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    Image,
    RawData,
    Tracking,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::RawData => "raw data",
            Self::Tracking => "tracking",
        };
        f.write_str(name)
    }
}

/// Unit of pipeline traffic
#[derive(Debug, Clone)]
pub enum Message {
    Image(Arc<Image>),
    RawData(Arc<RawData>),
    Tracking(Arc<TrackingSet>),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Image(_) => MessageKind::Image,
            Self::RawData(_) => MessageKind::RawData,
            Self::Tracking(_) => MessageKind::Tracking,
        }
    }

    pub fn receive_timestamp(&self) -> f64 {
        match self {
            Self::Image(image) => image.receive_timestamp(),
            Self::RawData(raw) => raw.receive_timestamp,
            Self::Tracking(tracking) => tracking.receive_timestamp,
        }
    }

    pub fn sync_timestamp(&self) -> f64 {
        match self {
            Self::Image(image) => image.sync_timestamp(),
            Self::RawData(raw) => raw.sync_timestamp,
            Self::Tracking(tracking) => tracking.sync_timestamp,
        }
    }

    pub fn as_image(&self) -> Option<&Arc<Image>> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn into_image(self) -> Option<Arc<Image>> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }
}

impl From<Image> for Message {
    fn from(image: Image) -> Self {
        Self::Image(Arc::new(image))
    }
}
