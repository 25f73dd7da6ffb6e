use crate::core::{Element, Extent3, TypedBuffer};

/// Numerical tolerance handed to the filter on every call
pub const SRAD_EPSILON: f64 = 1e-6;

/// Scalar arguments of one filter invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub eps: f64,
    pub iterations: u32,
    pub lambda: f64,
    pub speckle_scale: f64,
    pub speckle_scale_decay: f64,
}

/// Per-frame speckle-reducing filter, generic over the input and output
/// element types.
///
/// Implementations must be deterministic for identical inputs and
/// parameters. `None` signals a failed frame.
pub trait FrameTransform: Send + Sync {
    fn process<I: Element, O: Element>(
        &self,
        input: &TypedBuffer<I>,
        extent: Extent3,
        params: &FilterParams,
    ) -> Option<TypedBuffer<O>>;
}

/// Converts element storage without filtering. Fails on buffers whose
/// length disagrees with the extent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertTransform;

impl FrameTransform for ConvertTransform {
    fn process<I: Element, O: Element>(
        &self,
        input: &TypedBuffer<I>,
        extent: Extent3,
        _params: &FilterParams,
    ) -> Option<TypedBuffer<O>> {
        if extent.element_count() != Some(input.len()) {
            return None;
        }
        let data = input
            .as_slice()
            .iter()
            .map(|v| O::from_f64(v.to_f64()))
            .collect();
        Some(TypedBuffer::new(data))
    }
}
