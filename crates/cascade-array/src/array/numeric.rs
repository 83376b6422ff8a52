//! Flat numeric buffers.

use crate::ArrayError;

/// Primitive element type of a numeric buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Primitive {
    Int64,
    Float64,
}

impl Primitive {
    /// Type name used in the serialized form contract.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
        }
    }

    /// One-character format code.
    pub fn format(self) -> &'static str {
        match self {
            Self::Int64 => "l",
            Self::Float64 => "d",
        }
    }

    /// Element width in bytes.
    pub fn itemsize(self) -> u8 {
        8
    }
}

/// Flat numeric buffer: the leaf of every jagged structure.
///
/// Index buffers are contractually `Int64`; downcasting an index operand
/// with any other primitive is a [`WidthMismatch`].
///
/// [`WidthMismatch`]: ArrayError::WidthMismatch
#[derive(Clone, Debug, PartialEq)]
pub enum NumericArray {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl NumericArray {
    pub fn len(&self) -> usize {
        match self {
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn primitive(&self) -> Primitive {
        match self {
            Self::Int64(_) => Primitive::Int64,
            Self::Float64(_) => Primitive::Float64,
        }
    }

    /// Borrow as an index buffer, enforcing the fixed-width contract.
    pub fn as_int64(&self) -> Result<&[i64], ArrayError> {
        match self {
            Self::Int64(v) => Ok(v),
            Self::Float64(_) => Err(ArrayError::WidthMismatch {
                found: Primitive::Float64.name(),
            }),
        }
    }

    pub fn as_float64(&self) -> Result<&[f64], ArrayError> {
        match self {
            Self::Float64(v) => Ok(v),
            Self::Int64(_) => Err(ArrayError::WidthMismatch {
                found: Primitive::Int64.name(),
            }),
        }
    }

    /// Read element `i` widened to f64, for value gathers that accept
    /// either primitive.
    pub fn get_as_f64(&self, i: usize) -> Option<f64> {
        match self {
            Self::Int64(v) => v.get(i).map(|&x| x as f64),
            Self::Float64(v) => v.get(i).copied(),
        }
    }
}
