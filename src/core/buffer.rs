use super::element::{Element, ElementType};
use super::error::NodeError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Contiguous block of elements of a single known type
#[derive(Debug, Clone, PartialEq)]
pub struct TypedBuffer<T: Element> {
    data: Vec<T>,
}

impl<T: Element> TypedBuffer<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn filled(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    pub fn element_type(&self) -> ElementType {
        T::TYPE
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Reference-counted, type-erased handle to image data.
///
/// The tag says what the handle is supposed to hold; [`Buffer::typed`]
/// checks both the tag and the actual contents before handing out a view.
#[derive(Clone)]
pub struct Buffer {
    element_type: ElementType,
    len: usize,
    data: Arc<dyn Any + Send + Sync>,
}

impl Buffer {
    pub fn new<T: Element>(data: Vec<T>) -> Self {
        Self::from_typed(TypedBuffer::new(data))
    }

    pub fn from_typed<T: Element>(typed: TypedBuffer<T>) -> Self {
        Self {
            element_type: T::TYPE,
            len: typed.len(),
            data: Arc::new(typed),
        }
    }

    /// Wraps a foreign handle under an explicit tag. Nothing is checked here;
    /// a handle whose contents disagree with the tag fails at [`Buffer::typed`].
    pub fn from_raw(element_type: ElementType, len: usize, data: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            element_type,
            len,
            data,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn typed<T: Element>(&self) -> Result<&TypedBuffer<T>, NodeError> {
        if self.element_type != T::TYPE {
            return Err(NodeError::BufferMismatch {
                expected: T::TYPE,
                found: self.element_type,
            });
        }
        self.data
            .downcast_ref::<TypedBuffer<T>>()
            .ok_or(NodeError::BufferMismatch {
                expected: T::TYPE,
                found: self.element_type,
            })
    }

    /// True when both handles point at the same allocation
    pub fn ptr_eq(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("element_type", &self.element_type)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
