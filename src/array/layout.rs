use std::fmt;
use std::str::FromStr;

use crate::error::CastError;

/// Memory order of a multi-dimensional array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    /// Row-major: the last axis varies fastest.
    #[default]
    C,
    /// Column-major: the first axis varies fastest.
    F,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::C => f.write_str("C"),
            Order::F => f.write_str("F"),
        }
    }
}

impl FromStr for Order {
    type Err = CastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" | "c" => Ok(Order::C),
            "F" | "f" => Ok(Order::F),
            _ => Err(CastError::InvalidInput(format!(
                "order must be one of 'C' or 'F', got '{}'",
                s
            ))),
        }
    }
}

/// Number of elements in an array of this shape (1 for a 0-d array).
pub fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Element strides for a contiguous array.
pub fn strides(shape: &[usize], order: Order) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut acc = 1;
    match order {
        Order::C => {
            for axis in (0..shape.len()).rev() {
                strides[axis] = acc;
                acc *= shape[axis];
            }
        }
        Order::F => {
            for (axis, &dim) in shape.iter().enumerate() {
                strides[axis] = acc;
                acc *= dim;
            }
        }
    }
    strides
}

/// Storage position of every element, listed in row-major logical order.
pub fn physical_positions(shape: &[usize], order: Order) -> Vec<usize> {
    let count = element_count(shape);
    if order == Order::C || shape.len() <= 1 {
        return (0..count).collect();
    }

    let strides = strides(shape, order);
    let mut index = vec![0usize; shape.len()];
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(index.iter().zip(&strides).map(|(i, s)| i * s).sum());
        // odometer increment, last axis fastest
        for axis in (0..shape.len()).rev() {
            index[axis] += 1;
            if index[axis] < shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
    out
}
