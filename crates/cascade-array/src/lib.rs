#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Jagged array and form (schema) model for cascade.
//!
//! Two layers:
//! - **Array layer**: offset/content representations of variable-length
//!   nested data (`Array` and its variants), with validated construction
//!   and read-only structural projections.
//! - **Form layer**: data-free schema descriptors (`Form`) mirroring array
//!   shapes, carrying the content-addressed keys consumed by a deferred
//!   execution cache.
//!
//! Kernels operating on these types live in `cascade-kernels`; the
//! instruction engine driving them lives in `cascade-engine`.

pub mod array;
pub mod form;
pub mod key;

mod error;

#[cfg(test)]
mod form_tests;

pub use array::{
    Array, ArrayClass, ListArray, NumericArray, Offsets, Primitive, RecordArray, UnionArray,
};
pub use error::ArrayError;
pub use form::{Form, ListForm, NumericForm, Parameters, RecordForm, UnionForm};
