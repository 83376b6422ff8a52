//! The evaluator: one interpreter loop for both passes.
//!
//! The loop is written once, generic over a [`Pass`] that selects which
//! kernel of each operation runs and what value type flows on the stack.
//! Data and form evaluations of the same sequence visit the same
//! instructions in the same order with the same operand discipline.

use indexmap::IndexMap;

use cascade_array::{Array, ArrayError, Form};

use super::instruction::{Instruction, Sequence};
use super::registry::{Operation, Registry};
use super::stack::OperandStack;
use super::trace::{NoopTracer, Tracer};
use super::EngineError;

/// Selects the value type and kernel for one evaluation pass.
pub trait Pass {
    /// What flows on the operand stack.
    type Value: Clone;

    /// Which of the operation's twin kernels runs.
    fn kernel(op: &Operation) -> fn(&mut OperandStack<Self::Value>) -> Result<(), ArrayError>;
}

/// Evaluation over materialized arrays.
pub struct DataPass;

impl Pass for DataPass {
    type Value = Array;

    fn kernel(op: &Operation) -> fn(&mut OperandStack<Array>) -> Result<(), ArrayError> {
        op.data_kernel()
    }
}

/// Evaluation over forms: predicts the output shape and key without
/// materializing data.
pub struct FormPass;

impl Pass for FormPass {
    type Value = Form;

    fn kernel(op: &Operation) -> fn(&mut OperandStack<Form>) -> Result<(), ArrayError> {
        op.form_kernel()
    }
}

/// Evaluate a sequence with a custom tracer.
///
/// Inputs are consulted by name for push instructions and cloned onto the
/// stack; the engine holds no other state, so independent evaluations are
/// fully isolated from one another.
pub fn evaluate_with<P: Pass, T: Tracer>(
    sequence: &Sequence,
    registry: &Registry,
    inputs: &IndexMap<String, P::Value>,
    tracer: &mut T,
) -> Result<P::Value, EngineError> {
    let mut stack = OperandStack::new();

    for instruction in sequence.instructions() {
        match instruction {
            Instruction::Push(name) => {
                let value = inputs
                    .get(name)
                    .ok_or_else(|| EngineError::UnknownInput { name: name.clone() })?;
                stack.push(value.clone());
                tracer.trace_push(name, stack.len());
            }
            Instruction::Apply(id) => {
                let op = registry.resolve(*id);
                tracer.trace_apply(op.name(), op.arity(), stack.len());
                P::kernel(op)(&mut stack)?;
            }
        }
    }

    // Guaranteed by sequence validation; kept as a cheap final check.
    if stack.len() != 1 {
        return Err(EngineError::Unbalanced { count: stack.len() });
    }
    Ok(stack.pop())
}

/// Evaluate a sequence against data arrays.
pub fn evaluate_data(
    sequence: &Sequence,
    registry: &Registry,
    inputs: &IndexMap<String, Array>,
) -> Result<Array, EngineError> {
    evaluate_with::<DataPass, _>(sequence, registry, inputs, &mut NoopTracer)
}

/// Evaluate a sequence against forms, yielding the output form.
pub fn evaluate_form(
    sequence: &Sequence,
    registry: &Registry,
    inputs: &IndexMap<String, Form>,
) -> Result<Form, EngineError> {
    evaluate_with::<FormPass, _>(sequence, registry, inputs, &mut NoopTracer)
}
