//! The jagged array model.
//!
//! An array is a closed set of variants behind one capability interface:
//! flat numeric buffers, offset-encoded lists of a nested array, records of
//! equal-length named fields, and tagged unions. Variants own their buffers
//! exclusively; operations materialize fresh buffers rather than views.

mod list;
mod numeric;
mod offsets;
mod record;
mod union;

#[cfg(test)]
mod array_tests;

pub use list::ListArray;
pub use numeric::{NumericArray, Primitive};
pub use offsets::Offsets;
pub use record::RecordArray;
pub use union::UnionArray;

use crate::ArrayError;

/// Structural class of an array or form.
///
/// The canonical closed set; operands are resolved to a class once at the
/// boundary, not per element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ArrayClass {
    /// Flat numeric buffer.
    Numeric,
    /// Offset-delimited list of a nested array.
    List,
    /// Record with named, equal-length fields.
    Record,
    /// Tagged union selecting among variant contents.
    Union,
}

impl ArrayClass {
    /// Stable name used in the serialized form contract and in errors.
    pub fn name(self) -> &'static str {
        match self {
            Self::Numeric => "NumericArray",
            Self::List => "ListOffsetArray",
            Self::Record => "RecordArray",
            Self::Union => "UnionArray",
        }
    }
}

/// A value in the transform engine: one of the supported array
/// representations.
#[derive(Clone, Debug, PartialEq)]
pub enum Array {
    Numeric(NumericArray),
    List(ListArray),
    Record(RecordArray),
    Union(UnionArray),
}

impl Array {
    /// Structural class of this value.
    pub fn class(&self) -> ArrayClass {
        match self {
            Self::Numeric(_) => ArrayClass::Numeric,
            Self::List(_) => ArrayClass::List,
            Self::Record(_) => ArrayClass::Record,
            Self::Union(_) => ArrayClass::Union,
        }
    }

    /// Outer length: elements for a numeric buffer, sublists for a list,
    /// rows for a record, entries for a union.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(a) => a.len(),
            Self::List(a) => a.len(),
            Self::Record(a) => a.len(),
            Self::Union(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Downcast to a flat numeric buffer.
    pub fn as_numeric(&self) -> Result<&NumericArray, ArrayError> {
        match self {
            Self::Numeric(a) => Ok(a),
            other => Err(other.mismatch(ArrayClass::Numeric)),
        }
    }

    /// Downcast to an offset-encoded list.
    pub fn as_list(&self) -> Result<&ListArray, ArrayError> {
        match self {
            Self::List(a) => Ok(a),
            other => Err(other.mismatch(ArrayClass::List)),
        }
    }

    /// Downcast to a record.
    pub fn as_record(&self) -> Result<&RecordArray, ArrayError> {
        match self {
            Self::Record(a) => Ok(a),
            other => Err(other.mismatch(ArrayClass::Record)),
        }
    }

    /// Downcast to a tagged union.
    pub fn as_union(&self) -> Result<&UnionArray, ArrayError> {
        match self {
            Self::Union(a) => Ok(a),
            other => Err(other.mismatch(ArrayClass::Union)),
        }
    }

    /// Consume into a list, or fail with the same contract as [`as_list`].
    ///
    /// [`as_list`]: Array::as_list
    pub fn into_list(self) -> Result<ListArray, ArrayError> {
        match self {
            Self::List(a) => Ok(a),
            other => Err(other.mismatch(ArrayClass::List)),
        }
    }

    fn mismatch(&self, expected: ArrayClass) -> ArrayError {
        ArrayError::StructuralMismatch {
            expected: expected.name(),
            found: self.class().name(),
        }
    }
}

impl From<NumericArray> for Array {
    fn from(a: NumericArray) -> Self {
        Self::Numeric(a)
    }
}

impl From<ListArray> for Array {
    fn from(a: ListArray) -> Self {
        Self::List(a)
    }
}

impl From<RecordArray> for Array {
    fn from(a: RecordArray) -> Self {
        Self::Record(a)
    }
}

impl From<UnionArray> for Array {
    fn from(a: UnionArray) -> Self {
        Self::Union(a)
    }
}

impl From<Vec<i64>> for Array {
    fn from(values: Vec<i64>) -> Self {
        Self::Numeric(NumericArray::Int64(values))
    }
}

impl From<Vec<f64>> for Array {
    fn from(values: Vec<f64>) -> Self {
        Self::Numeric(NumericArray::Float64(values))
    }
}
