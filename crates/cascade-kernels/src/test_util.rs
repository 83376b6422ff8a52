//! Shared fixtures for kernel tests.

use cascade_array::{key, Array, ArrayError, Form, ListArray, ListForm, NumericForm};
use cascade_engine::{DataKernel, FormKernel, OperandStack};

/// Jagged int64 array from per-event counts and flat values.
pub fn jagged_i64(counts: &[i64], values: Vec<i64>) -> Array {
    Array::from(ListArray::from_counts(counts, Array::from(values)).unwrap())
}

/// Jagged float64 array from per-event counts and flat values.
pub fn jagged_f64(counts: &[i64], values: Vec<f64>) -> Array {
    Array::from(ListArray::from_counts(counts, Array::from(values)).unwrap())
}

/// Flat int64 view of a numeric result.
pub fn flat_i64(array: &Array) -> Vec<i64> {
    array.as_numeric().unwrap().as_int64().unwrap().to_vec()
}

/// Materialize a single-level jagged int64 result as nested vecs.
pub fn sublists_i64(array: &Array) -> Vec<Vec<i64>> {
    let list = array.as_list().unwrap();
    let content = list.content().as_numeric().unwrap().as_int64().unwrap();
    (0..list.len())
        .map(|i| content[list.range(i)].to_vec())
        .collect()
}

/// Materialize a doubly-jagged int64 result as nested vecs.
pub fn nested_i64(array: &Array) -> Vec<Vec<Vec<i64>>> {
    let outer = array.as_list().unwrap();
    let inner = outer.content().as_list().unwrap();
    let content = inner.content().as_numeric().unwrap().as_int64().unwrap();
    (0..outer.len())
        .map(|e| {
            outer
                .range(e)
                .map(|j| content[inner.range(j)].to_vec())
                .collect()
        })
        .collect()
}

/// Materialize a doubly-jagged float64 result as nested vecs.
pub fn nested_f64(array: &Array) -> Vec<Vec<Vec<f64>>> {
    let outer = array.as_list().unwrap();
    let inner = outer.content().as_list().unwrap();
    let content = inner.content().as_numeric().unwrap().as_float64().unwrap();
    (0..outer.len())
        .map(|e| {
            outer
                .range(e)
                .map(|j| content[inner.range(j)].to_vec())
                .collect()
        })
        .collect()
}

/// Jagged int64 form whose content is keyed `<name>,!content`.
pub fn jagged_form(name: &str) -> Form {
    let content = NumericForm::int64(key::concat([name, "!content"]));
    Form::List(ListForm::new(Form::Numeric(content), name))
}

/// Flat int64 form.
pub fn numeric_form(name: &str) -> Form {
    Form::Numeric(NumericForm::int64(name))
}

/// Run a data kernel over operands pushed left to right.
pub fn run_data(kernel: DataKernel, operands: Vec<Array>) -> Result<Array, ArrayError> {
    let mut stack = OperandStack::new();
    for operand in operands {
        stack.push(operand);
    }
    kernel(&mut stack)?;
    assert_eq!(stack.len(), 1, "kernel must push exactly one result");
    Ok(stack.pop())
}

/// Run a form kernel over operands pushed left to right.
pub fn run_form(kernel: FormKernel, operands: Vec<Form>) -> Result<Form, ArrayError> {
    let mut stack = OperandStack::new();
    for operand in operands {
        stack.push(operand);
    }
    kernel(&mut stack)?;
    assert_eq!(stack.len(), 1, "kernel must push exactly one result");
    Ok(stack.pop())
}
