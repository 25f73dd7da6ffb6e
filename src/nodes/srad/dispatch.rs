//! Runtime element types to statically typed filter calls.
//!
//! Resolution happens in two stages: the input image's element type picks
//! the typed input view, then the configured output type picks the output
//! storage. Both stages match exhaustively on [`SupportedType`], so the set
//! of instantiated `(input, output)` pairs is closed at compile time.

use super::config::SradConfig;
use super::transform::{FilterParams, FrameTransform};
use crate::core::{Buffer, Element, Extent3, Image, NodeError, SupportedType, TypedBuffer};

/// Runs the transform on `image` with the output type and parameters from `config`
pub fn dispatch<T: FrameTransform>(transform: &T, image: &Image, config: &SradConfig) -> Result<Buffer, NodeError> {
    let input = SupportedType::try_from(image.element_type()).map_err(NodeError::UnsupportedInput)?;
    let params = config.filter_params();

    match input {
        SupportedType::Uint8 => select_output::<u8, T>(transform, image, config, &params),
        SupportedType::Int16 => select_output::<i16, T>(transform, image, config, &params),
        SupportedType::Float32 => select_output::<f32, T>(transform, image, config, &params),
    }
}

fn select_output<I: Element, T: FrameTransform>(
    transform: &T,
    image: &Image,
    config: &SradConfig,
    params: &FilterParams,
) -> Result<Buffer, NodeError> {
    let data = image.buffer().typed::<I>()?;
    let output = SupportedType::try_from(config.output_type).map_err(NodeError::UnsupportedOutput)?;
    let extent = image.extent();

    match output {
        SupportedType::Uint8 => run::<I, u8, T>(transform, data, extent, params),
        SupportedType::Int16 => run::<I, i16, T>(transform, data, extent, params),
        SupportedType::Float32 => run::<I, f32, T>(transform, data, extent, params),
    }
}

fn run<I: Element, O: Element, T: FrameTransform>(
    transform: &T,
    data: &TypedBuffer<I>,
    extent: Extent3,
    params: &FilterParams,
) -> Result<Buffer, NodeError> {
    transform
        .process::<I, O>(data, extent, params)
        .map(Buffer::from_typed)
        .ok_or(NodeError::TransformFailed {
            input: I::TYPE,
            output: O::TYPE,
        })
}
