//! Array-like input values.

use serde::Serialize;

use crate::array::Array;
use crate::error::CastError;

/// A single element, before it is committed to a storage type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Scalar {
    /// Signed integer value; floats truncate toward zero, NaN becomes 0.
    pub fn as_i64(self) -> i64 {
        match self {
            Scalar::Bool(b) => b as i64,
            Scalar::Int(v) => v,
            Scalar::UInt(v) => v as i64,
            Scalar::Float(f) => f as i64,
        }
    }

    /// Unsigned integer value; negative values wrap.
    pub fn as_u64(self) -> u64 {
        match self {
            Scalar::Bool(b) => b as u64,
            Scalar::Int(v) => v as u64,
            Scalar::UInt(v) => v,
            Scalar::Float(f) if f < 0.0 => (f as i64) as u64,
            Scalar::Float(f) => f as u64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Bool(b) => b as u8 as f64,
            Scalar::Int(v) => v as f64,
            Scalar::UInt(v) => v as f64,
            Scalar::Float(f) => f,
        }
    }

    pub fn as_bool(self) -> bool {
        match self {
            Scalar::Bool(b) => b,
            Scalar::Int(v) => v != 0,
            Scalar::UInt(v) => v != 0,
            Scalar::Float(f) => f != 0.0,
        }
    }
}

/// Anything that can be turned into a homogeneous array: a scalar, a
/// (nested) sequence, or an existing array.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Value>),
    Array(Array),
}

impl Value {
    /// Parse a JSON document made of numbers, booleans and nested arrays.
    pub fn from_json_str(s: &str) -> Result<Value, CastError> {
        let json: serde_json::Value =
            serde_json::from_str(s).map_err(|e| CastError::InvalidInput(e.to_string()))?;
        Value::from_json(&json)
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Value, CastError> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Scalar(Scalar::Bool(*b))),
            serde_json::Value::Number(n) => {
                let scalar = if let Some(v) = n.as_i64() {
                    Scalar::Int(v)
                } else if let Some(v) = n.as_u64() {
                    Scalar::UInt(v)
                } else {
                    Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
                };
                Ok(Value::Scalar(scalar))
            }
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Err(CastError::InvalidInput(format!("unsupported JSON value {}", other))),
        }
    }

    /// Shape of the array this value converts into.
    pub fn shape(&self) -> Result<Vec<usize>, CastError> {
        match self {
            Value::Scalar(_) => Ok(Vec::new()),
            Value::Array(array) => Ok(array.shape().to_vec()),
            Value::List(items) => {
                let Some((first, rest)) = items.split_first() else {
                    return Ok(vec![0]);
                };
                let inner = first.shape()?;
                for item in rest {
                    let found = item.shape()?;
                    if found != inner {
                        return Err(CastError::Ragged {
                            expected: inner,
                            found,
                        });
                    }
                }
                let mut shape = Vec::with_capacity(inner.len() + 1);
                shape.push(items.len());
                shape.extend(inner);
                Ok(shape)
            }
        }
    }

    /// Elements in row-major order.
    pub fn flatten(&self) -> Vec<Scalar> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<Scalar>) {
        match self {
            Value::Scalar(s) => out.push(*s),
            Value::Array(array) => out.extend(array.values()),
            Value::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v as $conv)
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
