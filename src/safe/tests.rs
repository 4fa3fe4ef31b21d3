use std::cell::RefCell;

use super::*;
use crate::config::FloatX;
use crate::value::Scalar;

/// Converts correctly, then hands the storage back under another dtype, the
/// way a defective primitive would. Remembers what it returned.
struct Mistagging {
    produced: fn(DType) -> DType,
    last: RefCell<Option<Array>>,
}

impl Mistagging {
    fn new(produced: fn(DType) -> DType) -> Self {
        Self {
            produced,
            last: RefCell::new(None),
        }
    }

    fn last(&self) -> Array {
        self.last.borrow().clone().expect("converter was not called")
    }
}

impl Converter for Mistagging {
    fn asarray(
        &self,
        value: &Value,
        dtype: DType,
        order: Option<Order>,
    ) -> Result<Array, CastError> {
        let array = NativeConverter
            .asarray(value, dtype, order)?
            .view((self.produced)(dtype))?;
        *self.last.borrow_mut() = Some(array.clone());
        Ok(array)
    }
}

/// Same-width signed integer descriptor that is not the requested one:
/// the platform `long` where it fits, the unsigned twin otherwise.
fn same_width_alias(dtype: DType) -> DType {
    if DType::Long.size() == dtype.size() {
        DType::Long
    } else if dtype.size() == 4 {
        DType::UInt32
    } else {
        DType::UInt64
    }
}

fn float32_config() -> Config {
    Config {
        floatx: FloatX::Float32,
    }
}

#[test]
fn test_int64_list() {
    let value = Value::from(vec![1, 2, 3]);
    let array = asarray(&value, DType::Int64, None, &Config::default()).unwrap();
    assert_eq!(array.dtype().num(), DType::Int64.num());
    assert_eq!(array.to_vec::<i64>().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_floatx_resolves_to_configured_type() {
    let value = Value::from(vec![1.5, 2.5]);
    let array = asarray(&value, TypeRequest::FloatX, None, &float32_config()).unwrap();
    assert_eq!(array.dtype(), DType::Float32);
    assert_eq!(array.to_vec::<f32>().unwrap(), vec![1.5, 2.5]);

    let array = asarray(&value, TypeRequest::FloatX, None, &Config::default()).unwrap();
    assert_eq!(array.dtype(), DType::Float64);
}

#[test]
fn test_every_dtype_is_honored() {
    let value = Value::from(vec![vec![1, 0], vec![1, 1]]);
    for dtype in DType::ALL {
        for order in [None, Some(Order::C), Some(Order::F)] {
            let array = asarray(&value, dtype, order, &Config::default()).unwrap();
            assert_eq!(array.dtype().num(), dtype.num(), "{}", dtype);
            assert_eq!(array.shape(), &[2, 2]);
        }
    }
}

#[test]
fn test_order_is_passed_through() {
    let value = Value::from(vec![vec![1, 2], vec![3, 4]]);
    let array = asarray(&value, DType::Int32, Some(Order::F), &Config::default()).unwrap();
    assert_eq!(array.order(), Order::F);
    assert_eq!(array.as_slice::<i32>().unwrap(), &[1, 3, 2, 4]);
}

#[test]
fn test_mistagged_int32_is_reinterpreted() {
    let converter = Mistagging::new(same_width_alias);
    let value = Value::from(vec![-1, 2, i32::MAX as i64]);
    let array = asarray_with(&converter, &value, DType::Int32, None, &Config::default()).unwrap();

    let raw = converter.last();
    assert_ne!(raw.dtype().num(), DType::Int32.num());
    assert_eq!(array.dtype(), DType::Int32);
    assert_eq!(array.as_bytes(), raw.as_bytes());
    assert!(array.shares_storage(&raw));
    assert_eq!(array.to_vec::<i32>().unwrap(), vec![-1, 2, i32::MAX]);
}

#[test]
fn test_mistagged_int64_is_reinterpreted() {
    let converter = Mistagging::new(same_width_alias);
    let value = Value::from(vec![vec![-7i64, 8], vec![i64::MIN, 0]]);
    let array =
        asarray_with(&converter, &value, DType::Int64, Some(Order::F), &Config::default()).unwrap();

    let raw = converter.last();
    assert_eq!(array.dtype(), DType::Int64);
    assert_eq!(array.shape(), raw.shape());
    assert_eq!(array.order(), Order::F);
    assert!(array.shares_storage(&raw));
    assert_eq!(array.to_vec::<i64>().unwrap(), vec![-7, 8, i64::MIN, 0]);
}

#[test]
fn test_mistagged_width_is_reinterpreted_back() {
    // storage for four int32 values comes back tagged as two int64 values
    let converter = Mistagging::new(|_| DType::Int64);
    let value = Value::from(vec![1, 2, 3, 4]);
    let array = asarray_with(&converter, &value, DType::Int32, None, &Config::default()).unwrap();

    assert_eq!(converter.last().shape(), &[2]);
    assert_eq!(array.shape(), &[4]);
    assert_eq!(array.to_vec::<i32>().unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn test_other_mismatch_is_an_error() {
    let converter = Mistagging::new(|_| DType::Float64);
    let value = Value::from(vec![1.5, 2.5]);
    let err = asarray_with(&converter, &value, TypeRequest::FloatX, None, &float32_config())
        .unwrap_err();

    assert_eq!(
        err,
        CastError::TypeMismatch {
            requested: DType::Float32,
            requested_num: 11,
            produced: DType::Float64,
            produced_num: 12,
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"conversion did not return the data type we asked for (float32 #11), instead it returned type float64 #12: asarray may need to be extended to handle this data type as well"
    );
}

#[test]
fn test_long_request_is_not_silently_fixed() {
    let converter = Mistagging::new(|_| DType::Int64);
    let value = Value::from(vec![1, 2]);
    let err = asarray_with(&converter, &value, DType::Long, None, &Config::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("long #7"), "{}", message);
    assert!(message.contains("int64 #9"), "{}", message);
}

#[test]
fn test_unsigned_request_is_not_silently_fixed() {
    let converter = Mistagging::new(|_| DType::Int32);
    let value = Value::from(vec![1u32, 2]);
    assert!(matches!(
        asarray_with(&converter, &value, DType::UInt32, None, &Config::default()),
        Err(CastError::TypeMismatch {
            requested_num: 6,
            produced_num: 5,
            ..
        })
    ));
}

#[test]
fn test_input_is_not_mutated() {
    let source = Array::from_vec(vec![1.25f64, -3.0]);
    let value = Value::List(vec![Value::from(source.clone()), Value::from(source.clone())]);
    let before = value.clone();

    let array = asarray(&value, DType::Int8, Some(Order::F), &Config::default()).unwrap();
    assert_eq!(
        array.values(),
        vec![Scalar::Int(1), Scalar::Int(-3), Scalar::Int(1), Scalar::Int(-3)]
    );
    assert_eq!(value, before);
    assert_eq!(source.to_vec::<f64>().unwrap(), vec![1.25, -3.0]);
}

#[test]
fn test_matching_array_is_returned_as_is() {
    let source = Array::from_vec(vec![4i64, 5]);
    let value = Value::from(source.clone());
    let array = asarray(&value, DType::Int64, None, &Config::default()).unwrap();
    assert!(array.shares_storage(&source));
}

#[test]
fn test_converter_errors_propagate() {
    let value = Value::from(vec![vec![1, 2], vec![3]]);
    assert!(matches!(
        asarray(&value, DType::Int32, None, &Config::default()),
        Err(CastError::Ragged { .. })
    ));
}
