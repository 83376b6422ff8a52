//! Offset-encoded list arrays.

use super::{Array, Offsets};
use crate::ArrayError;

/// A jagged array: boundary offsets over a nested content array.
///
/// The offsets and content are independently allocated and exclusively
/// owned; the final boundary must equal the content's outer length.
#[derive(Clone, Debug, PartialEq)]
pub struct ListArray {
    offsets: Offsets,
    content: Box<Array>,
}

impl ListArray {
    pub fn new(offsets: Offsets, content: Array) -> Result<Self, ArrayError> {
        if offsets.total() != content.len() as i64 {
            return Err(ArrayError::LengthMismatch {
                end: offsets.total(),
                len: content.len(),
            });
        }
        Ok(Self {
            offsets,
            content: Box::new(content),
        })
    }

    /// Build from per-sublist counts.
    pub fn from_counts(counts: &[i64], content: Array) -> Result<Self, ArrayError> {
        Self::new(Offsets::from_counts(counts)?, content)
    }

    /// Number of sublists.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    /// The next nesting level.
    pub fn content(&self) -> &Array {
        &self.content
    }

    /// Content range of sublist `i`.
    pub fn range(&self, i: usize) -> std::ops::Range<usize> {
        self.offsets.range(i)
    }

    pub fn into_parts(self) -> (Offsets, Array) {
        (self.offsets, *self.content)
    }
}
