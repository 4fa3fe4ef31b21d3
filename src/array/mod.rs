//! Dtype-tagged n-dimensional arrays over shared, immutable byte storage.
//!
//! Storage is kept in 8-byte words so that any element type can be read
//! in place. Clones and [`Array::view`] share the same storage.

pub mod layout;

use std::sync::Arc;

use crate::dtype::{DType, Element};
use crate::error::CastError;
use crate::value::Scalar;

pub use layout::Order;

#[derive(Debug)]
struct Storage {
    words: Vec<u64>,
    len: usize,
}

impl Storage {
    fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(8)],
            len,
        }
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut storage = Self::zeroed(bytes.len());
        storage.bytes_mut().copy_from_slice(bytes);
        storage
    }

    fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.words)[..self.len]
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut::<u64, u8>(&mut self.words)[..self.len]
    }
}

#[derive(Clone, Debug)]
pub struct Array {
    dtype: DType,
    shape: Vec<usize>,
    order: Order,
    storage: Arc<Storage>,
}

impl Array {
    /// One-dimensional array holding `data`.
    pub fn from_vec<T: Element>(data: Vec<T>) -> Array {
        let shape = vec![data.len()];
        Self::from_elements(shape, Order::C, &data)
    }

    /// Array of the given shape whose storage, in `order`, is `data`.
    pub fn from_shape_vec<T: Element>(
        shape: Vec<usize>,
        order: Order,
        data: Vec<T>,
    ) -> Result<Array, CastError> {
        if layout::element_count(&shape) != data.len() {
            return Err(CastError::InvalidInput(format!(
                "cannot reshape array of size {} into shape {:?}",
                data.len(),
                shape
            )));
        }
        Ok(Self::from_elements(shape, order, &data))
    }

    fn from_elements<T: Element>(shape: Vec<usize>, order: Order, data: &[T]) -> Array {
        Array {
            dtype: T::DTYPE,
            shape,
            order,
            storage: Arc::new(Storage::from_bytes(bytemuck::cast_slice(data))),
        }
    }

    /// Build an array from elements given in row-major logical order,
    /// casting each one to `dtype` and laying it out in `order`.
    pub(crate) fn from_scalars(
        dtype: DType,
        shape: Vec<usize>,
        order: Order,
        values: &[Scalar],
    ) -> Array {
        debug_assert_eq!(layout::element_count(&shape), values.len());
        let size = dtype.size();
        let mut storage = Storage::zeroed(values.len() * size);
        let bytes = storage.bytes_mut();
        for (value, pos) in values.iter().zip(layout::physical_positions(&shape, order)) {
            dtype.write(*value, &mut bytes[pos * size..(pos + 1) * size]);
        }
        Array {
            dtype,
            shape,
            order,
            storage: Arc::new(storage),
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        layout::element_count(&self.shape)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw storage bytes, in memory order.
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.bytes()
    }

    /// Whether both arrays are backed by the same allocation.
    pub fn shares_storage(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Elements in memory order, read in place.
    pub fn as_slice<T: Element>(&self) -> Result<&[T], CastError> {
        if T::DTYPE.num() != self.dtype.num() {
            return Err(CastError::Access {
                expected: T::DTYPE,
                actual: self.dtype,
            });
        }
        bytemuck::try_cast_slice(self.as_bytes()).map_err(|_| self.layout_error(T::DTYPE))
    }

    /// Elements in row-major logical order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, CastError> {
        let data = self.as_slice::<T>()?;
        Ok(layout::physical_positions(&self.shape, self.order)
            .into_iter()
            .map(|pos| data[pos])
            .collect())
    }

    /// Elements in row-major logical order, decoded according to the dtype.
    pub fn values(&self) -> Vec<Scalar> {
        let size = self.dtype.size();
        let bytes = self.as_bytes();
        layout::physical_positions(&self.shape, self.order)
            .into_iter()
            .map(|pos| self.dtype.read(&bytes[pos * size..(pos + 1) * size]))
            .collect()
    }

    /// Reinterpret the storage as `dtype` without copying or converting.
    ///
    /// When the element widths agree only the tag changes. Otherwise the
    /// contiguous axis (last for C order, first for F order) is rescaled so
    /// that it covers the same bytes; this fails for 0-d arrays and when the
    /// axis length in bytes is not a multiple of the new width.
    pub fn view(self, dtype: DType) -> Result<Array, CastError> {
        let (from, to) = (self.dtype.size(), dtype.size());
        if from == to {
            return Ok(Array { dtype, ..self });
        }

        let axis = match self.order {
            Order::C => self.shape.len().checked_sub(1),
            Order::F => (!self.shape.is_empty()).then_some(0),
        };
        let Some(axis) = axis else {
            return Err(self.layout_error(dtype));
        };
        let axis_bytes = self.shape[axis] * from;
        if axis_bytes % to != 0 {
            return Err(self.layout_error(dtype));
        }

        let mut shape = self.shape;
        shape[axis] = axis_bytes / to;
        Ok(Array {
            dtype,
            shape,
            order: self.order,
            storage: self.storage,
        })
    }

    fn layout_error(&self, to: DType) -> CastError {
        CastError::Layout {
            from: self.dtype,
            to,
            shape: self.shape.clone(),
        }
    }
}

/// Logical equality: same element type, shape and values, regardless of
/// memory order.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.dtype.num() == other.dtype.num()
            && self.shape == other.shape
            && self.values() == other.values()
    }
}
