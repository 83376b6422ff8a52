//! Data-free schema descriptors.
//!
//! A form mirrors an array's nesting structure without holding content.
//! Each node carries an opaque parameter map and a `form_key`: the
//! content-addressed identity an outer deferred-execution cache uses to
//! memoize the value the form describes. Keys are derived with
//! [`crate::key::concat`] from the keys of an operation's inputs plus the
//! operation's own token, in operand order — the same order the data
//! kernel pops its operands. That correspondence is the contract that keeps
//! cached results attached to their true inputs.
//!
//! Forms serialize as JSON objects tagged by `"class"`; this shape is the
//! stable boundary with the scheduling layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::array::{ArrayClass, Primitive};
use crate::ArrayError;

/// Opaque per-node parameter map, preserved verbatim through operations
/// that copy structure.
pub type Parameters = IndexMap<String, serde_json::Value>;

/// Shape descriptor for a flat numeric buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericForm {
    /// Element width in bytes.
    pub itemsize: u8,
    /// One-character format code.
    pub format: String,
    /// Primitive type name.
    pub primitive: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: Parameters,
    pub form_key: String,
}

impl NumericForm {
    /// Standard descriptor for a primitive, keyed.
    pub fn of(primitive: Primitive, form_key: impl Into<String>) -> Self {
        Self {
            itemsize: primitive.itemsize(),
            format: primitive.format().to_owned(),
            primitive: primitive.name().to_owned(),
            parameters: Parameters::new(),
            form_key: form_key.into(),
        }
    }

    /// Fixed-width signed index descriptor.
    pub fn int64(form_key: impl Into<String>) -> Self {
        Self::of(Primitive::Int64, form_key)
    }

    pub fn float64(form_key: impl Into<String>) -> Self {
        Self::of(Primitive::Float64, form_key)
    }
}

/// Shape descriptor for an offset-encoded list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListForm {
    /// Offset width tag.
    pub offsets: String,
    pub content: Box<Form>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: Parameters,
    pub form_key: String,
}

impl ListForm {
    pub fn new(content: Form, form_key: impl Into<String>) -> Self {
        Self {
            offsets: "i64".to_owned(),
            content: Box::new(content),
            parameters: Parameters::new(),
            form_key: form_key.into(),
        }
    }
}

/// Shape descriptor for a record of named fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordForm {
    pub contents: IndexMap<String, Form>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: Parameters,
    pub form_key: String,
}

/// Shape descriptor for a tagged union.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnionForm {
    /// Tag width tag.
    pub tags: String,
    /// Index width tag.
    pub index: String,
    pub contents: Vec<Form>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: Parameters,
    pub form_key: String,
}

/// A schema node: structurally isomorphic to [`crate::Array`] but holding
/// no data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum Form {
    #[serde(rename = "NumericArray")]
    Numeric(NumericForm),
    #[serde(rename = "ListOffsetArray")]
    List(ListForm),
    #[serde(rename = "RecordArray")]
    Record(RecordForm),
    #[serde(rename = "UnionArray")]
    Union(UnionForm),
}

impl Form {
    pub fn class(&self) -> ArrayClass {
        match self {
            Self::Numeric(_) => ArrayClass::Numeric,
            Self::List(_) => ArrayClass::List,
            Self::Record(_) => ArrayClass::Record,
            Self::Union(_) => ArrayClass::Union,
        }
    }

    /// The content-addressed key of the value this form describes.
    pub fn form_key(&self) -> &str {
        match self {
            Self::Numeric(f) => &f.form_key,
            Self::List(f) => &f.form_key,
            Self::Record(f) => &f.form_key,
            Self::Union(f) => &f.form_key,
        }
    }

    pub fn set_form_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        match self {
            Self::Numeric(f) => f.form_key = key,
            Self::List(f) => f.form_key = key,
            Self::Record(f) => f.form_key = key,
            Self::Union(f) => f.form_key = key,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        match self {
            Self::Numeric(f) => &f.parameters,
            Self::List(f) => &f.parameters,
            Self::Record(f) => &f.parameters,
            Self::Union(f) => &f.parameters,
        }
    }

    /// Downcast to a numeric descriptor.
    pub fn as_numeric(&self) -> Result<&NumericForm, ArrayError> {
        match self {
            Self::Numeric(f) => Ok(f),
            other => Err(other.mismatch(ArrayClass::Numeric)),
        }
    }

    /// Downcast to a list descriptor.
    pub fn as_list(&self) -> Result<&ListForm, ArrayError> {
        match self {
            Self::List(f) => Ok(f),
            other => Err(other.mismatch(ArrayClass::List)),
        }
    }

    /// Downcast to a record descriptor.
    pub fn as_record(&self) -> Result<&RecordForm, ArrayError> {
        match self {
            Self::Record(f) => Ok(f),
            other => Err(other.mismatch(ArrayClass::Record)),
        }
    }

    /// Downcast to a union descriptor.
    pub fn as_union(&self) -> Result<&UnionForm, ArrayError> {
        match self {
            Self::Union(f) => Ok(f),
            other => Err(other.mismatch(ArrayClass::Union)),
        }
    }

    fn mismatch(&self, expected: ArrayClass) -> ArrayError {
        ArrayError::StructuralMismatch {
            expected: expected.name(),
            found: self.class().name(),
        }
    }
}
