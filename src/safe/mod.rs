//! Type-safe array conversion.
//!
//! Some array-construction primitives do not reliably tag their output with
//! the signed integer type that was asked for: a request for `int32` or
//! `int64` can come back as a different descriptor (typically the platform
//! `long`) even though the data is already laid out for the requested width.
//! [`asarray`] checks the produced type by canonical id and repairs exactly
//! those two cases with a no-copy [`Array::view`]. Any other mismatch is
//! reported as [`CastError::TypeMismatch`].

use crate::array::{Array, Order};
use crate::config::Config;
use crate::convert::{Converter, NativeConverter};
use crate::dtype::{DType, TypeRequest};
use crate::error::CastError;
use crate::value::Value;

/// Requested types whose mismatches are corrected by reinterpretation.
const SILENTLY_FIXED: [DType; 2] = [DType::Int32, DType::Int64];

/// Convert `value` into an array of the requested element type using the
/// [`NativeConverter`].
///
/// `floatX` resolves to `config.floatx`. `order` is passed through to the
/// converter. The input is only borrowed.
pub fn asarray(
    value: &Value,
    request: impl Into<TypeRequest>,
    order: Option<Order>,
    config: &Config,
) -> Result<Array, CastError> {
    asarray_with(&NativeConverter, value, request, order, config)
}

/// Same as [`asarray`] with an explicit conversion primitive.
pub fn asarray_with<C: Converter + ?Sized>(
    converter: &C,
    value: &Value,
    request: impl Into<TypeRequest>,
    order: Option<Order>,
    config: &Config,
) -> Result<Array, CastError> {
    let request: TypeRequest = request.into();
    let dtype = request.resolve(config);
    let rval = converter.asarray(value, dtype, order)?;

    // Compare ids: equal types need not be the same descriptor.
    if rval.dtype().num() == dtype.num() {
        return Ok(rval);
    }
    if SILENTLY_FIXED.iter().any(|fixed| fixed.num() == dtype.num()) {
        return rval.view(dtype);
    }
    Err(CastError::TypeMismatch {
        requested: dtype,
        requested_num: dtype.num(),
        produced: rval.dtype(),
        produced_num: rval.dtype().num(),
    })
}

#[cfg(test)]
mod tests;
