//! Errors that can occur while compiling or evaluating a sequence.

use cascade_array::ArrayError;

/// Errors from sequence compilation, registration, and evaluation.
///
/// All failures abort the whole evaluation; there is no per-operation
/// retry and no partial output.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// An apply token names no registered operation.
    #[error("unknown operation `{name}`")]
    UnknownOperation { name: String },

    /// A push token names no provided input.
    #[error("unknown input `{name}`")]
    UnknownInput { name: String },

    /// Registering an operation under a name already taken.
    #[error("operation `{name}` is already registered")]
    DuplicateOperation { name: String },

    /// An empty token in the instruction sequence.
    #[error("empty instruction token")]
    EmptyToken,

    /// An operation would pop more operands than the stack holds at
    /// that point in the sequence.
    #[error("operation `{op}` needs {arity} operands but the stack holds {depth}")]
    StackUnderflow {
        op: String,
        arity: usize,
        depth: usize,
    },

    /// The sequence does not leave exactly one value on the stack.
    #[error("instruction sequence leaves {count} operands on the stack, expected 1")]
    Unbalanced { count: usize },

    /// A kernel rejected its operands.
    #[error(transparent)]
    Kernel(#[from] ArrayError),
}
