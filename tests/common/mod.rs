#![allow(dead_code)]

use sonotab::core::{
    Buffer, Element, ElementType, Extent3, Image, ImageProperties, NodeError, TypedBuffer,
};
use sonotab::engine::BackpressurePolicy;
use sonotab::nodes::srad::{parameter_registry, FilterParams};
use sonotab::nodes::{ConvertTransform, FrameTransform, SradNode};
use sonotab::observability::FailureSink;
use sonotab::registry::ConfigDictionary;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ALL_TYPES: [ElementType; 8] = [
    ElementType::Uint8,
    ElementType::Int8,
    ElementType::Uint16,
    ElementType::Int16,
    ElementType::Uint32,
    ElementType::Int32,
    ElementType::Float32,
    ElementType::Float64,
];

pub const SUPPORTED_TYPES: [ElementType; 3] = [ElementType::Uint8, ElementType::Int16, ElementType::Float32];

/// Keeps every reported failure
#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<(String, NodeError)>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<(String, NodeError)> {
        self.reports.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl FailureSink for RecordingSink {
    fn report(&self, node_id: &str, error: &NodeError) {
        self.reports
            .lock()
            .unwrap()
            .push((node_id.to_string(), error.clone()));
    }
}

/// Converts like `ConvertTransform`, sleeping first and recording the first
/// input sample and the parameters of every call
#[derive(Default)]
pub struct SpyTransform {
    pub delay: Duration,
    pub first_samples: Mutex<Vec<f64>>,
    pub params: Mutex<Vec<FilterParams>>,
}

impl SpyTransform {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn first_samples(&self) -> Vec<f64> {
        self.first_samples.lock().unwrap().clone()
    }

    pub fn params(&self) -> Vec<FilterParams> {
        self.params.lock().unwrap().clone()
    }
}

impl FrameTransform for SpyTransform {
    fn process<I: Element, O: Element>(
        &self,
        input: &TypedBuffer<I>,
        extent: Extent3,
        params: &FilterParams,
    ) -> Option<TypedBuffer<O>> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if let Some(first) = input.as_slice().first() {
            self.first_samples.lock().unwrap().push(first.to_f64());
        }
        self.params.lock().unwrap().push(*params);
        ConvertTransform.process(input, extent, params)
    }
}

pub fn defaults() -> ConfigDictionary {
    ConfigDictionary::with_defaults(&parameter_registry())
}

pub fn filled_buffer(element_type: ElementType, len: usize, value: f64) -> Buffer {
    fn make<T: Element>(len: usize, value: f64) -> Buffer {
        Buffer::from_typed(TypedBuffer::filled(len, T::from_f64(value)))
    }

    match element_type {
        ElementType::Uint8 => make::<u8>(len, value),
        ElementType::Int8 => make::<i8>(len, value),
        ElementType::Uint16 => make::<u16>(len, value),
        ElementType::Int16 => make::<i16>(len, value),
        ElementType::Uint32 => make::<u32>(len, value),
        ElementType::Int32 => make::<i32>(len, value),
        ElementType::Float32 => make::<f32>(len, value),
        ElementType::Float64 => make::<f64>(len, value),
    }
}

pub fn image_of(element_type: ElementType, extent: Extent3, receive: f64, sync: f64) -> Image {
    image_with_value(element_type, extent, 7.0, receive, sync)
}

pub fn image_with_value(element_type: ElementType, extent: Extent3, value: f64, receive: f64, sync: f64) -> Image {
    let properties = ImageProperties {
        num_scanlines: extent.x,
        num_samples: extent.y,
        depth_mm: 60.0,
        ..ImageProperties::default()
    }
    .with_entry("transducer", "linear");

    Image::new(
        extent,
        filled_buffer(element_type, extent.element_count().expect("extent fits in memory"), value),
        Arc::new(properties),
        receive,
        sync,
    )
}

pub fn output_dictionary(output_type: ElementType) -> ConfigDictionary {
    let mut source = defaults();
    source.set("outputType", sonotab::registry::ParamValue::Element(output_type));
    source
}

pub fn convert_node(
    output_type: ElementType,
    policy: BackpressurePolicy,
) -> (SradNode<ConvertTransform>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let node = SradNode::new("srad", policy, ConvertTransform, &output_dictionary(output_type))
        .unwrap()
        .with_sink(sink.clone());
    (node, sink)
}
