//! Range expansion and gathers.
//!
//! `index_ranges` expands per-event (begin, end) boundary pairs into
//! explicit index sublists; the `begin_end_mapping` family composes that
//! expansion with a gather from a target array — flat numeric, nested, or
//! record-of-numerics. Indices are local to each event's target sublist.

use indexmap::IndexMap;

use cascade_array::{
    key, Array, ArrayError, Form, ListArray, ListForm, NumericArray, NumericForm, Offsets,
    RecordArray,
};
use cascade_engine::OperandStack;

/// Expanded ranges: for every event (outer) and boundary pair (inner),
/// the explicit indices `begin..end-1`.
struct ExpandedRanges {
    /// Pairs per event (the begin array's own boundaries).
    outer: Offsets,
    /// Indices per pair.
    inner: Offsets,
    values: Vec<i64>,
}

impl ExpandedRanges {
    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn into_array(self) -> Result<ListArray, ArrayError> {
        let inner = ListArray::new(self.inner, Array::from(self.values))?;
        ListArray::new(self.outer, Array::from(inner))
    }
}

fn expand_ranges(begin: &Array, end: &Array) -> Result<ExpandedRanges, ArrayError> {
    let begin = begin.as_list()?;
    let end = end.as_list()?;
    if begin.offsets() != end.offsets() {
        return Err(ArrayError::ShapeMismatch {
            context: "begin and end boundary arrays differ in shape",
        });
    }
    let begin_values = begin.content().as_numeric()?.as_int64()?;
    let end_values = end.content().as_numeric()?.as_int64()?;

    let counts: Vec<i64> = begin_values
        .iter()
        .zip(end_values)
        .map(|(&b, &e)| (e - b).max(0))
        .collect();
    let total: i64 = counts.iter().sum();

    // All ranges empty: keep the two outer levels, skip generating and
    // discarding per-range lists.
    let mut values = Vec::with_capacity(total as usize);
    if total > 0 {
        for (&b, &e) in begin_values.iter().zip(end_values) {
            values.extend(b..e);
        }
    }

    Ok(ExpandedRanges {
        outer: begin.offsets().clone(),
        inner: Offsets::from_counts(&counts)?,
        values,
    })
}

/// `begin,end,!index_ranges` — expand boundary pairs into index sublists.
pub fn index_ranges(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let end = stack.pop();
    let begin = stack.pop();
    let expanded = expand_ranges(&begin, &end)?;
    stack.push(Array::from(expanded.into_array()?));
    Ok(())
}

fn doubly_nested_int64_form(op_key: String) -> ListForm {
    let leaf = NumericForm::int64(key::concat([op_key.as_str(), "!content", "!content"]));
    let inner = ListForm::new(Form::Numeric(leaf), key::concat([op_key.as_str(), "!content"]));
    ListForm::new(Form::List(inner), op_key)
}

pub fn index_ranges_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let end = stack.pop();
    let begin = stack.pop();
    begin.as_list()?;
    end.as_list()?;

    let op_key = key::concat([begin.form_key(), end.form_key(), "!index_ranges"]);
    stack.push(Form::List(doubly_nested_int64_form(op_key)));
    Ok(())
}

/// Empty but well-formed doubly-nested float64 result: the outer two
/// levels of the expansion with nothing underneath.
fn empty_mapping(ranges: &ExpandedRanges) -> Result<ListArray, ArrayError> {
    let empty_counts = vec![0i64; ranges.outer.total() as usize];
    let inner = ListArray::from_counts(&empty_counts, Array::from(Vec::<f64>::new()))?;
    ListArray::new(ranges.outer.clone(), Array::from(inner))
}

fn gather_out_of_range(index: i64, len: usize) -> ArrayError {
    ArrayError::BoundsViolation {
        context: "gather index outside target sublist",
        index,
        len,
    }
}

/// `begin,end,target,!begin_end_mapping` — expand ranges, then gather the
/// target's values at those per-event indices.
///
/// An empty target and empty generated indices both yield a well-formed
/// empty doubly-nested result.
pub fn begin_end_mapping(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let end = stack.pop();
    let begin = stack.pop();

    let ranges = expand_ranges(&begin, &end)?;
    let target = target.as_list()?;
    let values = target.content().as_numeric()?;

    if values.is_empty() || ranges.is_empty() {
        stack.push(Array::from(empty_mapping(&ranges)?));
        return Ok(());
    }
    if target.len() != ranges.outer.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "boundary arrays and target cover different event counts",
        });
    }

    let mut out = Vec::with_capacity(ranges.values.len());
    for event in 0..ranges.outer.len() {
        let segment = target.range(event);
        for pair in ranges.outer.range(event) {
            for position in ranges.inner.range(pair) {
                let local = ranges.values[position];
                let resolved = lookup(local, &segment)?;
                out.push(values.get_as_f64(resolved).expect("index checked"));
            }
        }
    }

    let inner = ListArray::new(ranges.inner, Array::from(out))?;
    let mapped = ListArray::new(ranges.outer, Array::from(inner))?;
    stack.push(Array::from(mapped));
    Ok(())
}

/// Resolve an event-local index against the event's content segment.
fn lookup(local: i64, segment: &std::ops::Range<usize>) -> Result<usize, ArrayError> {
    let count = (segment.end - segment.start) as i64;
    if local < 0 || local >= count {
        return Err(gather_out_of_range(local, count as usize));
    }
    Ok(segment.start + local as usize)
}

fn doubly_nested_float64_form(op_key: String) -> ListForm {
    let leaf = NumericForm::float64(key::concat([op_key.as_str(), "!content", "!content"]));
    let inner = ListForm::new(Form::Numeric(leaf), key::concat([op_key.as_str(), "!content"]));
    ListForm::new(Form::List(inner), op_key)
}

pub fn begin_end_mapping_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let end = stack.pop();
    let begin = stack.pop();
    begin.as_list()?;
    end.as_list()?;
    target.as_list()?;

    let op_key = key::concat([
        begin.form_key(),
        end.form_key(),
        target.form_key(),
        "!begin_end_mapping",
    ]);
    stack.push(Form::List(doubly_nested_float64_form(op_key)));
    Ok(())
}

/// `begin,end,target,!begin_end_mapping_nested` — gather where each target
/// element is itself a list; the result gains one more nesting level.
pub fn begin_end_mapping_nested(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let end = stack.pop();
    let begin = stack.pop();

    let ranges = expand_ranges(&begin, &end)?;
    let target = target.as_list()?;
    let elements = target.content().as_list()?;
    let values = elements.content().as_numeric()?;

    if target.offsets().total() == 0 || ranges.is_empty() {
        let empty_counts = vec![0i64; ranges.outer.total() as usize];
        let third = ListArray::from_counts(&[], Array::from(Vec::<f64>::new()))?;
        let inner = ListArray::from_counts(&empty_counts, Array::from(third))?;
        let out = ListArray::new(ranges.outer.clone(), Array::from(inner))?;
        stack.push(Array::from(out));
        return Ok(());
    }
    if target.len() != ranges.outer.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "boundary arrays and target cover different event counts",
        });
    }

    let mut element_counts = Vec::with_capacity(ranges.values.len());
    let mut out = Vec::new();
    for event in 0..ranges.outer.len() {
        let segment = target.range(event);
        for pair in ranges.outer.range(event) {
            for position in ranges.inner.range(pair) {
                let resolved = lookup(ranges.values[position], &segment)?;
                let element = elements.range(resolved);
                element_counts.push((element.end - element.start) as i64);
                for value in element {
                    out.push(values.get_as_f64(value).expect("index checked"));
                }
            }
        }
    }

    let third = ListArray::from_counts(&element_counts, Array::from(out))?;
    let inner = ListArray::new(ranges.inner, Array::from(third))?;
    let mapped = ListArray::new(ranges.outer, Array::from(inner))?;
    stack.push(Array::from(mapped));
    Ok(())
}

pub fn begin_end_mapping_nested_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let end = stack.pop();
    let begin = stack.pop();
    begin.as_list()?;
    end.as_list()?;
    target.as_list()?;

    let op_key = key::concat([
        begin.form_key(),
        end.form_key(),
        target.form_key(),
        "!begin_end_mapping_nested",
    ]);
    let leaf = NumericForm::float64(key::concat([
        op_key.as_str(),
        "!content",
        "!content",
        "!content",
    ]));
    let third = ListForm::new(
        Form::Numeric(leaf),
        key::concat([op_key.as_str(), "!content", "!content"]),
    );
    let inner = ListForm::new(
        Form::List(third),
        key::concat([op_key.as_str(), "!content"]),
    );
    stack.push(Form::List(ListForm::new(Form::List(inner), op_key)));
    Ok(())
}

/// `begin,end,target,!begin_end_mapping_points` — gather where each target
/// element is a record of named numeric fields; the result keeps the same
/// fields. A fieldless target is invalid for this variant.
pub fn begin_end_mapping_points(stack: &mut OperandStack<Array>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let end = stack.pop();
    let begin = stack.pop();

    let ranges = expand_ranges(&begin, &end)?;
    let target = target.as_list()?;
    let record = target.content().as_record()?;
    if !record.has_fields() {
        return Err(ArrayError::StructuralMismatch {
            expected: "record with named fields",
            found: "record with no fields",
        });
    }
    let columns: Vec<(&str, &NumericArray)> = {
        let mut columns = Vec::new();
        for (name, field) in record.fields() {
            columns.push((name, field.as_numeric()?));
        }
        columns
    };

    if record.is_empty() || ranges.is_empty() {
        let mut fields = IndexMap::new();
        for (name, _) in &columns {
            fields.insert((*name).to_owned(), Array::from(Vec::<f64>::new()));
        }
        let empty_counts = vec![0i64; ranges.outer.total() as usize];
        let inner = ListArray::from_counts(&empty_counts, Array::from(RecordArray::new(fields)?))?;
        let out = ListArray::new(ranges.outer.clone(), Array::from(inner))?;
        stack.push(Array::from(out));
        return Ok(());
    }
    if target.len() != ranges.outer.len() {
        return Err(ArrayError::ShapeMismatch {
            context: "boundary arrays and target cover different event counts",
        });
    }

    let mut gathered: Vec<Vec<f64>> = vec![Vec::with_capacity(ranges.values.len()); columns.len()];
    for event in 0..ranges.outer.len() {
        let segment = target.range(event);
        for pair in ranges.outer.range(event) {
            for position in ranges.inner.range(pair) {
                let resolved = lookup(ranges.values[position], &segment)?;
                for (column, (_, values)) in columns.iter().enumerate() {
                    gathered[column].push(values.get_as_f64(resolved).expect("index checked"));
                }
            }
        }
    }

    let mut fields = IndexMap::new();
    for ((name, _), values) in columns.into_iter().zip(gathered) {
        fields.insert(name.to_owned(), Array::from(values));
    }
    let inner = ListArray::new(ranges.inner, Array::from(RecordArray::new(fields)?))?;
    let mapped = ListArray::new(ranges.outer, Array::from(inner))?;
    stack.push(Array::from(mapped));
    Ok(())
}

pub fn begin_end_mapping_points_form(stack: &mut OperandStack<Form>) -> Result<(), ArrayError> {
    let target = stack.pop();
    let end = stack.pop();
    let begin = stack.pop();
    begin.as_list()?;
    end.as_list()?;
    let target_list = target.as_list()?;
    target_list.content.as_record()?;

    let op_key = key::concat([
        begin.form_key(),
        end.form_key(),
        target.form_key(),
        "!begin_end_mapping_points",
    ]);
    // The record level keeps the target's own field descriptors.
    let record = (*target_list.content).clone();
    let inner = ListForm::new(record, key::concat([op_key.as_str(), "!content"]));
    stack.push(Form::List(ListForm::new(Form::List(inner), op_key)));
    Ok(())
}
