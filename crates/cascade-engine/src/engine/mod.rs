//! Engine internals: instructions, registry, operand stack, evaluator.

mod error;
mod evaluator;
mod instruction;
mod registry;
mod stack;
mod trace;


pub use error::EngineError;
pub use evaluator::{DataPass, FormPass, Pass, evaluate_data, evaluate_form, evaluate_with};
pub use instruction::{Instruction, Sequence};
pub use registry::{DataKernel, FormKernel, OpId, Operation, Registry};
pub use stack::OperandStack;
pub use trace::{NoopTracer, PrintTracer, Tracer};
