//! Index-space translation.
//!
//! Kernels converting between local (per-event) and global (flat)
//! addressing, and between count and offset encodings of the same
//! boundaries. Out-of-range local indices and entries already marked
//! absent upstream both collapse to the `-1` sentinel; the two cases are
//! not distinguished downstream.

use cascade_array::{key, Array, ArrayError, Form, ListArray, ListForm, NumericForm, Offsets};
use cascade_engine::OperandStack;

/// `counts,!counts_to_offsets` — prefix-sum counts into boundaries.
///
/// Output is one longer than the input; an empty input yields `[0]`.
pub fn counts_to_offsets(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let counts = stack.pop();
    let counts = counts.as_numeric()?.as_int64()?;
    let offsets = Offsets::from_counts(counts)?;
    stack.push(Array::from(offsets.into_inner()));
    Ok(())
}

pub fn counts_to_offsets_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let counts = stack.pop();
    let counts = counts.as_numeric()?;
    let mut out = NumericForm::int64(key::concat([
        counts.form_key.as_str(),
        "!counts_to_offsets",
    ]));
    out.parameters = counts.parameters.clone();
    stack.push(Form::Numeric(out));
    Ok(())
}

/// `index,target_offsets,!local_to_global` — translate a jagged local
/// index into the target's flat address space.
///
/// For event e, a local value v maps to `v + target_offsets[e]` when
/// `0 <= v < target_offsets[e+1] - target_offsets[e]`, else `-1`. The
/// result is the translated content, flat and fixed-width.
pub fn local_to_global(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target_offsets = stack.pop();
    let index = stack.pop();

    let target = Offsets::new(target_offsets.as_numeric()?.as_int64()?.to_vec())?;
    let index = index.as_list()?;
    if index.len() != target.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "local index and target offsets cover different event counts",
        });
    }

    let local = index.content().as_numeric()?.as_int64()?;
    let mut out = Vec::with_capacity(local.len());
    for event in 0..index.len() {
        let start = target.values()[event];
        let stop = target.values()[event + 1];
        for position in index.range(event) {
            let value = local[position];
            let global = value + start;
            if value >= 0 && global < stop {
                out.push(global);
            } else {
                out.push(-1);
            }
        }
    }
    stack.push(Array::from(out));
    Ok(())
}

pub fn local_to_global_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target_offsets = stack.pop();
    let index = stack.pop();

    target_offsets.as_numeric()?;
    let index = index.as_list()?;

    let content_key = key::concat([
        index.form_key.as_str(),
        target_offsets.form_key(),
        "!local_to_global",
    ]);
    let mut content = NumericForm::int64(content_key);
    if let Ok(old) = index.content.as_numeric() {
        content.parameters = old.parameters.clone();
    }

    let mut out = ListForm::new(Form::Numeric(content), index.form_key.clone());
    out.parameters = index.parameters.clone();
    stack.push(Form::List(out));
    Ok(())
}

/// `local_counts,target_offsets,!counts_to_nested_index` — partition the
/// sequential ids `0..target_offsets[last]` into groups sized by the
/// flattened local counts.
///
/// This is a re-partitioning of a freshly generated id space, not a
/// local-to-global translation.
pub fn counts_to_nested_index(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target_offsets = stack.pop();
    let local_counts = stack.pop();

    let target = Offsets::new(target_offsets.as_numeric()?.as_int64()?.to_vec())?;
    let local_counts = local_counts.as_list()?;
    let counts = local_counts.content().as_numeric()?.as_int64()?;

    let sequential: Vec<i64> = (0..target.total()).collect();
    let out = ListArray::from_counts(counts, Array::from(sequential))?;
    stack.push(Array::from(out));
    Ok(())
}

pub fn counts_to_nested_index_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target_offsets = stack.pop();
    let local_counts = stack.pop();

    target_offsets.as_numeric()?;
    let local_counts = local_counts.as_list()?;

    let op_key = key::concat([
        local_counts.form_key.as_str(),
        target_offsets.form_key(),
        "!counts_to_nested_index",
    ]);
    let leaf = NumericForm::int64(key::concat([op_key.as_str(), "!content"]));
    let mut middle = local_counts.clone();
    middle.content = Box::new(Form::Numeric(leaf));
    middle.form_key = op_key;

    // The outer level reuses the counts array's own boundaries.
    let out = ListForm::new(Form::List(middle), local_counts.form_key.clone());
    stack.push(Form::List(out));
    Ok(())
}

/// `index,target,!grow_local_index` — grow a sparse per-event index list
/// to the target's dense per-event domain.
///
/// For each event, every value of `0..count_e` is emitted if present in
/// the sparse list, else `-1`; the target's ordering and length are
/// preserved.
pub fn grow_local_index(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let index = stack.pop();

    let target = target.as_list()?;
    let index = index.as_list()?;
    if index.len() != target.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "sparse index and target cover different event counts",
        });
    }
    let sparse = index.content().as_numeric()?.as_int64()?;

    let mut counts = Vec::with_capacity(target.len());
    let mut out = Vec::with_capacity(target.offsets().total() as usize);
    for event in 0..target.len() {
        let present = &sparse[index.range(event)];
        let count = target.offsets().count(event);
        counts.push(count);
        for dense in 0..count {
            if present.contains(&dense) {
                out.push(dense);
            } else {
                out.push(-1);
            }
        }
    }

    let grown = ListArray::from_counts(&counts, Array::from(out))?;
    stack.push(Array::from(grown));
    Ok(())
}

pub fn grow_local_index_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let index = stack.pop();

    target.as_list()?;
    let index = index.as_list()?;

    let op_key = key::concat([
        index.form_key.as_str(),
        target.form_key(),
        "!grow_local_index",
    ]);
    let content = NumericForm::int64(key::concat([op_key.as_str(), "!content"]));
    let mut out = index.clone();
    out.content = Box::new(Form::Numeric(content));
    out.form_key = op_key;
    stack.push(Form::List(out));
    Ok(())
}

/// `array,target_offsets,!nested_local_to_global` — doubly-jagged variant
/// of `local_to_global`.
///
/// The inner level is flattened, translated against one shared target
/// boundary sequence, then re-nested with the original per-level counts.
/// An entirely empty inner level short-circuits to the input unchanged.
pub fn nested_local_to_global(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target_offsets = stack.pop();
    let array = stack.pop();

    let target = Offsets::new(target_offsets.as_numeric()?.as_int64()?.to_vec())?;
    let outer = array.as_list()?;
    let middle = outer.content().as_list()?;

    if middle.offsets().total() == 0 {
        // Empty nested structure needs no translation.
        stack.push(array.clone());
        return Ok(());
    }

    if outer.len() != target.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "nested index and target offsets cover different event counts",
        });
    }
    let local = middle.content().as_numeric()?.as_int64()?;

    let mut translated = Vec::with_capacity(local.len());
    for event in 0..outer.len() {
        let start = target.values()[event];
        let stop = target.values()[event + 1];
        // All inner sublists of this event translate against one segment.
        for sublist in outer.range(event) {
            for position in middle.range(sublist) {
                let value = local[position];
                let global = value + start;
                if value >= 0 && global < stop {
                    translated.push(global);
                } else {
                    translated.push(-1);
                }
            }
        }
    }

    let inner_counts: Vec<i64> = middle.offsets().counts().collect();
    let outer_counts: Vec<i64> = outer.offsets().counts().collect();
    let inner = ListArray::from_counts(&inner_counts, Array::from(translated))?;
    let out = ListArray::from_counts(&outer_counts, Array::from(inner))?;
    stack.push(Array::from(out));
    Ok(())
}

pub fn nested_local_to_global_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target_offsets = stack.pop();
    let array = stack.pop();

    target_offsets.as_numeric()?;
    let outer = array.as_list()?;
    let middle = outer.content.as_list()?;

    let op_key = key::concat([
        outer.form_key.as_str(),
        target_offsets.form_key(),
        "!nested_local_to_global",
    ]);
    let leaf_key = key::concat([op_key.as_str(), "!content", "!content"]);
    let mut leaf = NumericForm::int64(leaf_key);
    if let Ok(old) = middle.content.as_numeric() {
        leaf.parameters = old.parameters.clone();
    }

    let mut middle = middle.clone();
    middle.content = Box::new(Form::Numeric(leaf));
    let mut out = outer.clone();
    out.content = Box::new(Form::List(middle));
    stack.push(Form::List(out));
    Ok(())
}

/// `first,second,!nested_index` — interleave two equal-length flat index
/// columns into per-element pairs.
pub fn nested_index(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let second = stack.pop();
    let first = stack.pop();

    let second = second.as_numeric()?.as_int64()?;
    let first = first.as_numeric()?.as_int64()?;
    if first.len() != second.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "index columns have unequal lengths",
        });
    }

    let mut out = Vec::with_capacity(first.len() * 2);
    for (&a, &b) in first.iter().zip(second) {
        out.push(a);
        out.push(b);
    }
    let counts = vec![2i64; first.len()];
    let paired = ListArray::from_counts(&counts, Array::from(out))?;
    stack.push(Array::from(paired));
    Ok(())
}

pub fn nested_index_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let second = stack.pop();
    let first = stack.pop();

    let second = second.as_list()?;
    let first = first.as_list()?;

    let op_key = key::concat([
        first.content.form_key(),
        second.content.form_key(),
        "!nested_index",
    ]);
    let leaf = NumericForm::int64(key::concat([op_key.as_str(), "!content"]));
    let mut middle = first.clone();
    middle.content = Box::new(Form::Numeric(leaf));
    middle.form_key = op_key;

    // Outer boundaries are the first column's own.
    let out = ListForm::new(Form::List(middle), first.form_key.clone());
    stack.push(Form::List(out));
    Ok(())
}

/// `array,!event_index` — broadcast each event's ordinal over that
/// event's elements.
pub fn event_index(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let array = stack.pop();
    let list = array.as_list()?;

    let mut out = Vec::with_capacity(list.offsets().total() as usize);
    let mut counts = Vec::with_capacity(list.len());
    for event in 0..list.len() {
        let count = list.offsets().count(event);
        counts.push(count);
        out.extend(std::iter::repeat_n(event as i64, count as usize));
    }
    let broadcast = ListArray::from_counts(&counts, Array::from(out))?;
    stack.push(Array::from(broadcast));
    Ok(())
}

pub fn event_index_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let array = stack.pop();
    array.as_list()?;

    let op_key = key::concat([array.form_key(), "!event_index"]);
    let content = NumericForm::int64(key::concat([op_key.as_str(), "!content"]));
    let out = ListForm::new(Form::Numeric(content), op_key);
    stack.push(Form::List(out));
    Ok(())
}
