//! Element-type descriptors.
//!
//! Every [`DType`] carries a canonical numeric id. Two descriptors denote the
//! same element type exactly when their ids match; code that needs to know
//! whether an array "is" a given type compares ids, never variants obtained
//! from different sources.
//!
//! `long` and `ulong` mirror the platform C `long`: 4 bytes on LLP64
//! targets, 8 bytes on LP64 targets. They are distinct element types from
//! `int32`/`int64` even when their widths agree.

use std::ffi::{c_long, c_ulong};
use std::fmt;
use std::str::FromStr;

use crate::config::{Config, FloatX};
use crate::error::CastError;
use crate::value::Scalar;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    /// C `int`.
    Int32,
    UInt32,
    /// C `long`, platform width.
    Long,
    /// C `unsigned long`, platform width.
    ULong,
    /// C `long long`.
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl DType {
    /// All element types, ordered by canonical id.
    pub const ALL: [DType; 13] = [
        DType::Bool,
        DType::Int8,
        DType::UInt8,
        DType::Int16,
        DType::UInt16,
        DType::Int32,
        DType::UInt32,
        DType::Long,
        DType::ULong,
        DType::Int64,
        DType::UInt64,
        DType::Float32,
        DType::Float64,
    ];

    /// Canonical numeric identifier.
    pub fn num(self) -> u8 {
        match self {
            DType::Bool => 0,
            DType::Int8 => 1,
            DType::UInt8 => 2,
            DType::Int16 => 3,
            DType::UInt16 => 4,
            DType::Int32 => 5,
            DType::UInt32 => 6,
            DType::Long => 7,
            DType::ULong => 8,
            DType::Int64 => 9,
            DType::UInt64 => 10,
            DType::Float32 => 11,
            DType::Float64 => 12,
        }
    }

    pub fn from_num(num: u8) -> Option<DType> {
        DType::ALL.get(num as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::UInt8 => "uint8",
            DType::Int16 => "int16",
            DType::UInt16 => "uint16",
            DType::Int32 => "int32",
            DType::UInt32 => "uint32",
            DType::Long => "long",
            DType::ULong => "ulong",
            DType::Int64 => "int64",
            DType::UInt64 => "uint64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
        }
    }

    /// Width of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Long => std::mem::size_of::<c_long>(),
            DType::ULong => std::mem::size_of::<c_ulong>(),
            DType::Int64 | DType::UInt64 | DType::Float64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    /// Encode `value` into `out` (exactly `self.size()` bytes), casting
    /// without range checks.
    pub(crate) fn write(self, value: Scalar, out: &mut [u8]) {
        match self {
            DType::Bool => out[0] = value.as_bool() as u8,
            DType::Int8 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_i64() as i8))),
            DType::UInt8 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_u64() as u8))),
            DType::Int16 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_i64() as i16))),
            DType::UInt16 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_u64() as u16))),
            DType::Int32 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_i64() as i32))),
            DType::UInt32 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_u64() as u32))),
            DType::Long => out.copy_from_slice(bytemuck::bytes_of(&(value.as_i64() as c_long))),
            DType::ULong => out.copy_from_slice(bytemuck::bytes_of(&(value.as_u64() as c_ulong))),
            DType::Int64 => out.copy_from_slice(bytemuck::bytes_of(&value.as_i64())),
            DType::UInt64 => out.copy_from_slice(bytemuck::bytes_of(&value.as_u64())),
            DType::Float32 => out.copy_from_slice(bytemuck::bytes_of(&(value.as_f64() as f32))),
            DType::Float64 => out.copy_from_slice(bytemuck::bytes_of(&value.as_f64())),
        }
    }

    /// Decode one element from `bytes` (exactly `self.size()` bytes).
    pub(crate) fn read(self, bytes: &[u8]) -> Scalar {
        use bytemuck::pod_read_unaligned as rd;
        match self {
            DType::Bool => Scalar::Bool(bytes[0] != 0),
            DType::Int8 => Scalar::Int(rd::<i8>(bytes) as i64),
            DType::UInt8 => Scalar::UInt(rd::<u8>(bytes) as u64),
            DType::Int16 => Scalar::Int(rd::<i16>(bytes) as i64),
            DType::UInt16 => Scalar::UInt(rd::<u16>(bytes) as u64),
            DType::Int32 => Scalar::Int(rd::<i32>(bytes) as i64),
            DType::UInt32 => Scalar::UInt(rd::<u32>(bytes) as u64),
            DType::Long => Scalar::Int(rd::<c_long>(bytes) as i64),
            DType::ULong => Scalar::UInt(rd::<c_ulong>(bytes) as u64),
            DType::Int64 => Scalar::Int(rd::<i64>(bytes)),
            DType::UInt64 => Scalar::UInt(rd::<u64>(bytes)),
            DType::Float32 => Scalar::Float(rd::<f32>(bytes) as f64),
            DType::Float64 => Scalar::Float(rd::<f64>(bytes)),
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = CastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dtype = match s {
            "bool" | "bool_" | "?" => DType::Bool,
            "int8" | "i1" | "byte" => DType::Int8,
            "uint8" | "u1" | "ubyte" => DType::UInt8,
            "int16" | "i2" | "short" => DType::Int16,
            "uint16" | "u2" | "ushort" => DType::UInt16,
            "int32" | "i4" | "intc" => DType::Int32,
            "uint32" | "u4" | "uintc" => DType::UInt32,
            "long" | "l" => DType::Long,
            "ulong" | "L" => DType::ULong,
            "int64" | "i8" | "longlong" | "q" => DType::Int64,
            "uint64" | "u8" | "ulonglong" | "Q" => DType::UInt64,
            "float32" | "f4" | "single" => DType::Float32,
            "float64" | "f8" | "double" | "float" => DType::Float64,
            _ => return Err(CastError::UnknownDType(s.to_string())),
        };
        Ok(dtype)
    }
}

impl From<FloatX> for DType {
    fn from(floatx: FloatX) -> Self {
        match floatx {
            FloatX::Float32 => DType::Float32,
            FloatX::Float64 => DType::Float64,
        }
    }
}

/// A requested element type: either concrete, or the configured default
/// float type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRequest {
    Concrete(DType),
    /// `floatX`: resolved against [`Config::floatx`] at call time.
    FloatX,
}

impl TypeRequest {
    pub fn resolve(self, config: &Config) -> DType {
        match self {
            TypeRequest::Concrete(dtype) => dtype,
            TypeRequest::FloatX => config.floatx.into(),
        }
    }
}

impl From<DType> for TypeRequest {
    fn from(dtype: DType) -> Self {
        TypeRequest::Concrete(dtype)
    }
}

impl From<FloatX> for TypeRequest {
    fn from(floatx: FloatX) -> Self {
        TypeRequest::Concrete(floatx.into())
    }
}

impl fmt::Display for TypeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRequest::Concrete(dtype) => write!(f, "{}", dtype),
            TypeRequest::FloatX => f.write_str("floatX"),
        }
    }
}

impl FromStr for TypeRequest {
    type Err = CastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "floatX" {
            return Ok(TypeRequest::FloatX);
        }
        s.parse().map(TypeRequest::Concrete)
    }
}

/// Rust scalar types that can be read from and written to array storage
/// directly.
pub trait Element: bytemuck::Pod {
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(impl Element for $ty {
            const DTYPE: DType = DType::$dtype;
        })*
    };
}

impl_element! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}
