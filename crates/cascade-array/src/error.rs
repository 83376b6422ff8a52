//! Errors shared by the array model and the kernels operating on it.

/// Errors raised by array construction, projection, and kernels.
///
/// Every variant signals a logic or schema inconsistency upstream, never a
/// transient condition: callers abort the whole evaluation and re-derive
/// their inputs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArrayError {
    /// An operand does not have the structural class an operation expects.
    #[error("structural mismatch: expected {expected}, found {found}")]
    StructuralMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A computed index buffer has a width other than the fixed
    /// 64-bit signed contract.
    #[error("index width mismatch: expected int64, found {found}")]
    WidthMismatch { found: &'static str },

    /// A traversal or index write exceeded a preallocated buffer.
    #[error("{context}: index {index} outside preallocated length {len}")]
    BoundsViolation {
        context: &'static str,
        index: i64,
        len: usize,
    },

    /// An offsets sequence violates the boundary invariants
    /// (non-empty, starts at zero, monotonically non-decreasing).
    #[error("invalid offsets: {reason}")]
    InvalidOffsets { reason: &'static str },

    /// Offsets and content disagree about the flattened length.
    #[error("offsets end at {end} but content has length {len}")]
    LengthMismatch { end: i64, len: usize },

    /// Two operands that must share a shape do not.
    #[error("operand shapes differ: {context}")]
    ShapeMismatch { context: &'static str },

    /// A record projection named a field that does not exist.
    #[error("record has no field `{field}`")]
    MissingField { field: String },
}
