//! Structural projections.
//!
//! Read-only reinterpretations of an operand's own buffers: the outer
//! boundaries of a list (as offsets or as start/stop pairs), its content,
//! and the tag/index buffers of a union. Projecting a class that does not
//! carry the requested view is a structural mismatch.

use cascade_array::{key, Array, ArrayError, Form, NumericArray, NumericForm};
use cascade_engine::OperandStack;

/// `array,!offsets` — outer boundary sequence of a list.
pub fn offsets(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let list = array.as_list()?;
    stack.push(Array::from(list.offsets().values().to_vec()));
    Ok(())
}

pub fn offsets_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let form = stack.pop();
    form.as_list()?;
    let out = NumericForm::int64(key::concat([form.form_key(), "!offsets"]));
    stack.push(Form::Numeric(out));
    Ok(())
}

/// `array,!starts` — begin boundary of every sublist.
pub fn starts(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let list = array.as_list()?;
    stack.push(Array::from(list.offsets().starts().to_vec()));
    Ok(())
}

pub fn starts_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let form = stack.pop();
    form.as_list()?;
    let out = NumericForm::int64(key::concat([form.form_key(), "!starts"]));
    stack.push(Form::Numeric(out));
    Ok(())
}

/// `array,!stops` — end boundary of every sublist.
pub fn stops(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let list = array.as_list()?;
    stack.push(Array::from(list.offsets().stops().to_vec()));
    Ok(())
}

pub fn stops_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let form = stack.pop();
    form.as_list()?;
    let out = NumericForm::int64(key::concat([form.form_key(), "!stops"]));
    stack.push(Form::Numeric(out));
    Ok(())
}

/// `array,!content` — the next nesting level of a list.
pub fn content(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let content = array.as_list()?.content().clone();
    stack.push(content);
    Ok(())
}

/// The content form keeps its own key: list-producing operations already
/// key each level when they build the form.
pub fn content_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let form = stack.pop();
    let content = (*form.as_list()?.content).clone();
    stack.push(content);
    Ok(())
}

/// `array,!tags` — which variant each union entry selects.
pub fn tags(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let union = array.as_union()?;
    let widened: Vec<i64> = union.tags().iter().map(|&t| t as i64).collect();
    stack.push(Array::Numeric(NumericArray::Int64(widened)));
    Ok(())
}

pub fn tags_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let form = stack.pop();
    form.as_union()?;
    let out = NumericForm::int64(key::concat([form.form_key(), "!tags"]));
    stack.push(Form::Numeric(out));
    Ok(())
}

/// `array,!index` — position of each union entry within its variant.
pub fn index(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let union = array.as_union()?;
    stack.push(Array::from(union.index().to_vec()));
    Ok(())
}

pub fn index_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let form = stack.pop();
    form.as_union()?;
    let out = NumericForm::int64(key::concat([form.form_key(), "!index"]));
    stack.push(Form::Numeric(out));
    Ok(())
}
