//! Record arrays with named, equal-length fields.

use indexmap::IndexMap;

use super::Array;
use crate::ArrayError;

/// Array of structured records, stored field-major.
///
/// Fields keep insertion order. All fields must have equal outer length;
/// a fieldless record has length zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordArray {
    fields: IndexMap<String, Array>,
    length: usize,
}

impl RecordArray {
    pub fn new(fields: IndexMap<String, Array>) -> Result<Self, ArrayError> {
        let length = fields.values().next().map(Array::len).unwrap_or(0);
        if fields.values().any(|field| field.len() != length) {
            return Err(ArrayError::ShapeMismatch {
                context: "record fields have unequal lengths",
            });
        }
        Ok(Self { fields, length })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the record declares any fields at all.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Project one field by name.
    pub fn field(&self, name: &str) -> Result<&Array, ArrayError> {
        self.fields.get(name).ok_or_else(|| ArrayError::MissingField {
            field: name.to_owned(),
        })
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Array)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
