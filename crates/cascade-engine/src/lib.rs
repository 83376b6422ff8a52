#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Stack-based transform engine for cascade.
//!
//! An instruction sequence is a flat list of tokens: a bare token pushes a
//! named runtime input, a `!`-prefixed token applies a registered operation.
//! Sequences compile once into validated [`Sequence`] values; the evaluator
//! then runs them against either data arrays or forms, with a single
//! interpreter loop shared by both passes.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    DataKernel, DataPass, EngineError, FormKernel, FormPass, Instruction, NoopTracer, OpId,
    OperandStack, Operation, Pass, PrintTracer, Registry, Sequence, Tracer, evaluate_data,
    evaluate_form, evaluate_with,
};
