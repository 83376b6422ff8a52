//! Decay graph traversal.
//!
//! All kernels walk flattened parent-index and species-tag buffers bounded
//! by per-event offset segments; traversal never crosses an event boundary.
//! Outputs are preallocated at a conservative upper bound (segment length
//! for fan-out) and truncated at the end; exceeding a bound means the
//! input graph is inconsistent and is a fatal [`BoundsViolation`].
//!
//! [`BoundsViolation`]: ArrayError::BoundsViolation

use cascade_array::{key, Array, ArrayError, Form, ListArray, ListForm, NumericForm, Offsets};
use cascade_engine::OperandStack;

fn parent_out_of_range(parent: i64, len: usize) -> ArrayError {
    ArrayError::BoundsViolation {
        context: "parent link outside flattened buffer",
        index: parent,
        len,
    }
}

fn output_overflow(context: &'static str, index: usize, len: usize) -> ArrayError {
    ArrayError::BoundsViolation {
        context,
        index: index as i64,
        len,
    }
}

fn distinct_parent_kernel(parents: &[i64], species: &[i64]) -> Result<Vec<i64>, ArrayError> {
    let len = species.len();
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let mut parent = parents[i];
        if parent < 0 {
            out.push(-1);
            continue;
        }
        let this = species[i];
        while parent >= 0 {
            if parent as usize >= len {
                return Err(parent_out_of_range(parent, len));
            }
            if species[parent as usize] != this {
                break;
            }
            parent = parents[parent as usize];
        }
        out.push(parent);
    }
    Ok(out)
}

/// `parents,species,!distinct_parent` — first ancestor with a different
/// species tag.
///
/// Expects flat, globally-indexed buffers of equal length. A particle with
/// no parent, or whose same-species chain terminates without a
/// different-species ancestor, yields `-1`.
pub fn distinct_parent(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let species = stack.pop();
    let parents = stack.pop();

    let species = species.as_numeric()?.as_int64()?;
    let parents = parents.as_numeric()?.as_int64()?;
    if parents.len() != species.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "parent and species buffers have unequal lengths",
        });
    }

    let out = distinct_parent_kernel(parents, species)?;
    stack.push(Array::from(out));
    Ok(())
}

pub fn distinct_parent_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let species = stack.pop();
    let parents = stack.pop();

    let species = species.as_list()?;
    let parents = parents.as_list()?;

    let content_key = key::concat([
        parents.content.form_key(),
        species.content.form_key(),
        "!distinct_parent",
    ]);
    let content = NumericForm::int64(content_key);

    // Boundaries are the parent array's own.
    let out = ListForm::new(Form::Numeric(content), parents.form_key.clone());
    stack.push(Form::List(out));
    Ok(())
}

fn children_kernel(events: &Offsets, parents: &[i64]) -> Result<(Vec<i64>, Vec<i64>), ArrayError> {
    let len = parents.len();
    let mut offsets_out = Vec::with_capacity(len + 1);
    offsets_out.push(0i64);
    // One parent per particle bounds total fan-out by the buffer length.
    let mut content = vec![0i64; len];
    let mut filled = 0usize;

    for event in 0..events.len() {
        let segment = events.range(event);
        for index in segment.clone() {
            // Forward-only: a child can only appear at a later position
            // within the same event.
            for candidate in index..segment.end {
                if parents[candidate] == index as i64 {
                    if filled >= content.len() {
                        return Err(output_overflow("children content", filled, content.len()));
                    }
                    content[filled] = candidate as i64;
                    filled += 1;
                }
            }
            offsets_out.push(filled as i64);
        }
    }

    content.truncate(filled);
    Ok((offsets_out, content))
}

/// `offsets,parents,!children` — direct children of every particle.
///
/// One sublist per position in each event segment, listing the positions
/// whose parent link points back at it, in increasing order. Quadratic per
/// event by design: child counts are small and the forward-only scan is
/// part of the contract.
pub fn children(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let parents = stack.pop();
    let offsets = stack.pop();

    let events = Offsets::new(offsets.as_numeric()?.as_int64()?.to_vec())?;
    let parents = parents.as_numeric()?.as_int64()?;
    if events.total() != parents.len() as i64 {
        return Err(ArrayError::LengthMismatch {
            end: events.total(),
            len: parents.len(),
        });
    }

    let (offsets_out, content) = children_kernel(&events, parents)?;
    let out = ListArray::new(Offsets::new(offsets_out)?, Array::from(content))?;
    stack.push(Array::from(out));
    Ok(())
}

pub fn children_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let parents = stack.pop();
    let offsets = stack.pop();

    offsets.as_numeric()?;
    let parents = parents.as_list()?;

    let op_key = key::concat([offsets.form_key(), parents.content.form_key(), "!children"]);
    let leaf = NumericForm::int64(key::concat([op_key.as_str(), "!content"]));
    let inner = ListForm::new(Form::Numeric(leaf), op_key);
    let out = ListForm::new(Form::List(inner), offsets.form_key());
    stack.push(Form::List(out));
    Ok(())
}

fn distinct_children_deep_kernel(
    events: &Offsets,
    parents: &[i64],
    species: &[i64],
) -> Result<(Vec<i64>, Vec<i64>), ArrayError> {
    let len = parents.len();
    let mut offsets_out = Vec::with_capacity(len + 1);
    offsets_out.push(0i64);
    let mut content = vec![0i64; len];
    let mut filled = 0usize;

    for event in 0..events.len() {
        let segment = events.range(event);
        for index in segment.clone() {
            let this = species[index];
            let parent = parents[index];
            if parent >= 0 {
                if parent as usize >= len {
                    return Err(parent_out_of_range(parent, len));
                }
                // Only start the deep scan at the head of a lineage:
                // repeating it for every relay in the chain would emit the
                // same descendants once per relay.
                if species[parent as usize] != this {
                    let bound = segment.end - index;
                    // Same-species relay ancestors reachable from here.
                    let mut relays = vec![0i64; bound];
                    relays[0] = index as i64;
                    let mut relay_count = 1usize;
                    // Relays seen with at least one child.
                    let mut with_children = vec![0i64; bound];
                    let mut with_children_count = 0usize;

                    for candidate in index..segment.end {
                        let candidate_parent = parents[candidate];
                        for relay in 0..relay_count {
                            if relays[relay] != candidate_parent {
                                continue;
                            }
                            if with_children_count >= with_children.len() {
                                return Err(output_overflow(
                                    "deep children relay bookkeeping",
                                    with_children_count,
                                    with_children.len(),
                                ));
                            }
                            with_children[with_children_count] = candidate_parent;
                            with_children_count += 1;

                            if species[candidate] == this {
                                // Same species: a relay, scan its children too.
                                if relay_count >= relays.len() {
                                    return Err(output_overflow(
                                        "deep children relay set",
                                        relay_count,
                                        relays.len(),
                                    ));
                                }
                                relays[relay_count] = candidate as i64;
                                relay_count += 1;
                            } else {
                                if filled >= content.len() {
                                    return Err(output_overflow(
                                        "deep children content",
                                        filled,
                                        content.len(),
                                    ));
                                }
                                content[filled] = candidate as i64;
                                filled += 1;
                            }
                            break;
                        }
                    }

                    // Relays that never had a child are dead-end leaves of
                    // the same-species chain; emit them after the scan, in
                    // discovery order.
                    for relay in 1..relay_count {
                        let leaf = relays[relay];
                        if !with_children[..with_children_count].contains(&leaf) {
                            if filled >= content.len() {
                                return Err(output_overflow(
                                    "deep children content",
                                    filled,
                                    content.len(),
                                ));
                            }
                            content[filled] = leaf;
                            filled += 1;
                        }
                    }
                }
            }
            offsets_out.push(filled as i64);
        }
    }

    content.truncate(filled);
    Ok((offsets_out, content))
}

/// `offsets,parents,species,!distinct_children_deep` — children of a whole
/// same-species lineage, skipping same-species relays in between.
///
/// For each particle that starts a new lineage (it has a parent of a
/// different species), one bounded forward scan collects every
/// different-species child of any relay in the chain, in discovery order,
/// followed by any relay that turned out to have no children at all.
/// Particles inside a lineage yield empty lists.
pub fn distinct_children_deep(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let species = stack.pop();
    let parents = stack.pop();
    let offsets = stack.pop();

    let events = Offsets::new(offsets.as_numeric()?.as_int64()?.to_vec())?;
    let species = species.as_numeric()?.as_int64()?;
    let parents = parents.as_numeric()?.as_int64()?;
    if parents.len() != species.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "parent and species buffers have unequal lengths",
        });
    }
    if events.total() != parents.len() as i64 {
        return Err(ArrayError::LengthMismatch {
            end: events.total(),
            len: parents.len(),
        });
    }

    let (offsets_out, content) = distinct_children_deep_kernel(&events, parents, species)?;
    let out = ListArray::new(Offsets::new(offsets_out)?, Array::from(content))?;
    stack.push(Array::from(out));
    Ok(())
}

pub fn distinct_children_deep_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let species = stack.pop();
    let parents = stack.pop();
    let offsets = stack.pop();

    offsets.as_numeric()?;
    let species = species.as_list()?;
    let parents = parents.as_list()?;

    let op_key = key::concat([
        offsets.form_key(),
        parents.content.form_key(),
        species.content.form_key(),
        "!distinct_children_deep",
    ]);
    let leaf = NumericForm::int64(key::concat([op_key.as_str(), "!content"]));
    let inner = ListForm::new(Form::Numeric(leaf), op_key);
    let out = ListForm::new(Form::List(inner), offsets.form_key());
    stack.push(Form::List(out));
    Ok(())
}
