//! The array-conversion primitive.

use crate::array::{Array, Order};
use crate::dtype::DType;
use crate::error::CastError;
use crate::value::Value;

/// Builds an array of a given element type from an array-like value.
///
/// Implementations are expected to honor `dtype`, but callers must not rely
/// on it: the returned array's dtype is what was actually produced.
pub trait Converter {
    fn asarray(&self, value: &Value, dtype: DType, order: Option<Order>)
        -> Result<Array, CastError>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn asarray(
        &self,
        value: &Value,
        dtype: DType,
        order: Option<Order>,
    ) -> Result<Array, CastError> {
        (**self).asarray(value, dtype, order)
    }
}

/// Converter that casts element by element in pure Rust.
///
/// An existing array that already has the requested type and layout is
/// returned as a clone sharing its storage. Everything else is cast without
/// range checks into fresh storage laid out in `order` (C when absent, or the
/// source array's own order).
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeConverter;

impl Converter for NativeConverter {
    fn asarray(
        &self,
        value: &Value,
        dtype: DType,
        order: Option<Order>,
    ) -> Result<Array, CastError> {
        if let Value::Array(array) = value {
            return Ok(convert_array(array, dtype, order));
        }

        let shape = value.shape()?;
        let values = value.flatten();
        Ok(Array::from_scalars(
            dtype,
            shape,
            order.unwrap_or_default(),
            &values,
        ))
    }
}

fn convert_array(array: &Array, dtype: DType, order: Option<Order>) -> Array {
    let target_order = order.unwrap_or(array.order());
    // C and F layouts coincide below two dimensions
    let same_layout = target_order == array.order() || array.ndim() <= 1;
    if array.dtype().num() == dtype.num() && same_layout {
        return array.clone();
    }
    Array::from_scalars(
        dtype,
        array.shape().to_vec(),
        target_order,
        &array.values(),
    )
}
