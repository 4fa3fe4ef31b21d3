//! Type-safe conversion of array-like values into dtype-tagged arrays.
//!
//! ```
//! use safe_asarray::{asarray, Config, DType, Value};
//!
//! let value = Value::from(vec![1, 2, 3]);
//! let array = asarray(&value, DType::Int64, None, &Config::default()).unwrap();
//! assert_eq!(array.to_vec::<i64>().unwrap(), vec![1, 2, 3]);
//! ```

pub mod array;
pub mod config;
pub mod convert;
pub mod dtype;
pub mod error;
pub mod safe;
pub mod value;

pub use array::{Array, Order};
pub use config::{Config, FloatX};
pub use convert::{Converter, NativeConverter};
pub use dtype::{DType, Element, TypeRequest};
pub use error::{CastError, ConfigError};
pub use safe::{asarray, asarray_with};
pub use value::{Scalar, Value};
