//! Tagged union arrays.

use super::Array;
use crate::ArrayError;

/// Array whose entries each select one of several variant contents.
///
/// `tags[i]` names the variant for entry i; `index[i]` is the entry's
/// position within that variant's content.
#[derive(Clone, Debug, PartialEq)]
pub struct UnionArray {
    tags: Vec<i8>,
    index: Vec<i64>,
    contents: Vec<Array>,
}

impl UnionArray {
    pub fn new(tags: Vec<i8>, index: Vec<i64>, contents: Vec<Array>) -> Result<Self, ArrayError> {
        if tags.len() != index.len() {
            return Err(ArrayError::ShapeMismatch {
                context: "union tags and index have unequal lengths",
            });
        }
        if let Some(&tag) = tags.iter().find(|&&t| t < 0 || t as usize >= contents.len()) {
            return Err(ArrayError::BoundsViolation {
                context: "union tag outside variant contents",
                index: tag as i64,
                len: contents.len(),
            });
        }
        Ok(Self {
            tags,
            index,
            contents,
        })
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Which variant each entry selects.
    pub fn tags(&self) -> &[i8] {
        &self.tags
    }

    /// Position of each entry within its variant.
    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn contents(&self) -> &[Array] {
        &self.contents
    }
}
