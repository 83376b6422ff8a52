//! Operation registry.

use indexmap::IndexMap;

use cascade_array::{Array, ArrayError, Form};

use super::EngineError;
use super::stack::OperandStack;

/// Kernel executing an operation against data operands.
pub type DataKernel = fn(&mut OperandStack<Array>) -> Result<(), ArrayError>;

/// Twin kernel deriving the result form from operand forms.
///
/// Form kernels validate structural-class preconditions and derive the
/// output key from the operand keys plus the operation name, in the same
/// order the data kernel pops its operands. They never look at content.
pub type FormKernel = fn(&mut OperandStack<Form>) -> Result<(), ArrayError>;

/// Identifier of a registered operation, valid for the registry that
/// issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OpId(pub(crate) usize);

/// A named operation: fixed arity plus paired data/form kernels.
///
/// Operations are free functions over the operand stack; they carry no
/// state and no identity beyond their name.
pub struct Operation {
    name: String,
    arity: usize,
    data: DataKernel,
    form: FormKernel,
}

impl Operation {
    pub fn new(name: impl Into<String>, arity: usize, data: DataKernel, form: FormKernel) -> Self {
        Self {
            name: name.into(),
            arity,
            data,
            form,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many operands the kernels pop.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn data_kernel(&self) -> DataKernel {
        self.data
    }

    pub fn form_kernel(&self) -> FormKernel {
        self.form
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name-keyed operation table consumed by the engine.
///
/// Insertion-ordered; external callers register and look up by name only.
#[derive(Debug, Default)]
pub struct Registry {
    ops: IndexMap<String, Operation>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under its own name.
    pub fn register(&mut self, op: Operation) -> Result<OpId, EngineError> {
        if self.ops.contains_key(op.name()) {
            return Err(EngineError::DuplicateOperation {
                name: op.name().to_owned(),
            });
        }
        let (index, _) = self.ops.insert_full(op.name().to_owned(), op);
        Ok(OpId(index))
    }

    /// Look up an operation by name.
    pub fn get(&self, name: &str) -> Option<(OpId, &Operation)> {
        self.ops
            .get_full(name)
            .map(|(index, _, op)| (OpId(index), op))
    }

    /// Resolve an id issued by this registry.
    ///
    /// # Panics
    /// Panics if the id came from a different registry.
    pub fn resolve(&self, id: OpId) -> &Operation {
        self.ops
            .get_index(id.0)
            .map(|(_, op)| op)
            .expect("OpId from a different registry")
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }
}
