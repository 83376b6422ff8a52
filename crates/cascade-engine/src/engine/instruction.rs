//! Compiled instruction sequences.
//!
//! Token lists (and form keys, which are the same thing) compile once into
//! tagged instructions, with unknown operations, stack underflow, and an
//! unbalanced final stack all rejected at construction time rather than
//! per evaluation.

use cascade_array::key;

use super::registry::{OpId, Registry};
use super::EngineError;

/// Prefix distinguishing apply tokens from input names.
pub const APPLY_PREFIX: char = '!';

/// One step of a compiled sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Push the named runtime input.
    Push(String),
    /// Apply a registered operation: pop its arity, push one result.
    Apply(OpId),
}

/// A validated instruction sequence.
///
/// Guarantees established at construction: every apply resolves in the
/// registry it was compiled against, no operation underflows the stack,
/// and exactly one value remains at the end.
#[derive(Clone, Debug)]
pub struct Sequence {
    instructions: Vec<Instruction>,
}

impl Sequence {
    /// Compile a token list against a registry.
    pub fn parse<I>(tokens: I, registry: &Registry) -> Result<Self, EngineError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut instructions = Vec::new();
        let mut depth = 0usize;

        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                return Err(EngineError::EmptyToken);
            }
            if let Some(name) = token.strip_prefix(APPLY_PREFIX) {
                let Some((id, op)) = registry.get(name) else {
                    return Err(EngineError::UnknownOperation {
                        name: name.to_owned(),
                    });
                };
                if depth < op.arity() {
                    return Err(EngineError::StackUnderflow {
                        op: name.to_owned(),
                        arity: op.arity(),
                        depth,
                    });
                }
                depth = depth - op.arity() + 1;
                instructions.push(Instruction::Apply(id));
            } else {
                depth += 1;
                instructions.push(Instruction::Push(token.to_owned()));
            }
        }

        if depth != 1 {
            return Err(EngineError::Unbalanced { count: depth });
        }
        Ok(Self { instructions })
    }

    /// Compile a form key: keys are comma-joined token lists, so replaying
    /// one re-derives the value it addresses.
    pub fn from_key(form_key: &str, registry: &Registry) -> Result<Self, EngineError> {
        Self::parse(key::split(form_key), registry)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
