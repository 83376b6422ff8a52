//! Evaluation tracing.
//!
//! The tracer is a generic parameter, so `NoopTracer` calls are optimized
//! away entirely while `PrintTracer` collects a step-by-step account of an
//! evaluation for debugging.

/// Hooks invoked by the evaluator.
///
/// All methods default to no-ops; implement only what you need.
pub trait Tracer {
    /// A named input was pushed.
    fn trace_push(&mut self, _name: &str, _depth: usize) {}

    /// An operation is about to run against the top of the stack.
    fn trace_apply(&mut self, _op: &str, _arity: usize, _depth: usize) {}
}

/// Tracer that does nothing; compiles to nothing.
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer that prints each step to stderr.
#[derive(Default)]
pub struct PrintTracer {
    step: usize,
}

impl PrintTracer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tracer for PrintTracer {
    fn trace_push(&mut self, name: &str, depth: usize) {
        eprintln!("[{:>4}] push {name} (depth {depth})", self.step);
        self.step += 1;
    }

    fn trace_apply(&mut self, op: &str, arity: usize, depth: usize) {
        eprintln!("[{:>4}] !{op}/{arity} (depth {depth})", self.step);
        self.step += 1;
    }
}
