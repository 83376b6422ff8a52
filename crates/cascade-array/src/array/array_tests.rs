use indexmap::IndexMap;

use super::*;
use crate::ArrayError;

fn jagged(counts: &[i64], values: Vec<i64>) -> ListArray {
    ListArray::from_counts(counts, Array::from(values)).unwrap()
}

#[test]
fn list_construction_checks_flat_length() {
    let ok = jagged(&[2, 1], vec![10, 11, 12]);
    assert_eq!(ok.len(), 2);
    assert_eq!(ok.range(0), 0..2);
    assert_eq!(ok.range(1), 2..3);

    let err = ListArray::from_counts(&[2, 2], Array::from(vec![10i64, 11, 12]));
    assert!(matches!(
        err,
        Err(ArrayError::LengthMismatch { end: 4, len: 3 })
    ));
}

#[test]
fn nested_lists() {
    let inner = jagged(&[1, 0, 2], vec![5, 6, 7]);
    let outer = ListArray::from_counts(&[2, 1], Array::from(inner)).unwrap();
    assert_eq!(outer.len(), 2);
    let inner = outer.content().as_list().unwrap();
    assert_eq!(inner.offsets().values(), &[0, 1, 1, 3]);
}

#[test]
fn downcasts_enforce_class() {
    let numeric = Array::from(vec![1i64, 2, 3]);
    assert_eq!(numeric.class(), ArrayClass::Numeric);
    assert!(numeric.as_numeric().is_ok());

    let err = numeric.as_list().unwrap_err();
    assert!(matches!(
        err,
        ArrayError::StructuralMismatch {
            expected: "ListOffsetArray",
            found: "NumericArray",
        }
    ));
}

#[test]
fn index_buffers_are_int64_only() {
    let floats = NumericArray::Float64(vec![1.0, 2.0]);
    assert!(matches!(
        floats.as_int64(),
        Err(ArrayError::WidthMismatch { found: "float64" })
    ));
    assert_eq!(floats.as_float64().unwrap(), &[1.0, 2.0]);

    let ints = NumericArray::Int64(vec![1, 2]);
    assert_eq!(ints.as_int64().unwrap(), &[1, 2]);
    assert_eq!(ints.primitive(), Primitive::Int64);
}

#[test]
fn numeric_widening_read() {
    let ints = NumericArray::Int64(vec![4, 5]);
    assert_eq!(ints.get_as_f64(1), Some(5.0));
    assert_eq!(ints.get_as_f64(2), None);
}

#[test]
fn record_fields_must_align() {
    let mut fields = IndexMap::new();
    fields.insert("x".to_owned(), Array::from(vec![1.0, 2.0]));
    fields.insert("y".to_owned(), Array::from(vec![3.0, 4.0]));
    let record = RecordArray::new(fields).unwrap();
    assert_eq!(record.len(), 2);
    assert_eq!(record.names().collect::<Vec<_>>(), vec!["x", "y"]);
    assert!(record.field("x").is_ok());
    assert!(matches!(
        record.field("w"),
        Err(ArrayError::MissingField { .. })
    ));

    let mut ragged = IndexMap::new();
    ragged.insert("x".to_owned(), Array::from(vec![1.0, 2.0]));
    ragged.insert("y".to_owned(), Array::from(vec![3.0]));
    assert!(RecordArray::new(ragged).is_err());
}

#[test]
fn fieldless_record_is_constructible_but_empty() {
    let record = RecordArray::new(IndexMap::new()).unwrap();
    assert!(!record.has_fields());
    assert_eq!(record.len(), 0);
}

#[test]
fn union_validates_tags() {
    let contents = vec![Array::from(vec![1i64]), Array::from(vec![2.0f64])];
    let union = UnionArray::new(vec![0, 1], vec![0, 0], contents.clone()).unwrap();
    assert_eq!(union.len(), 2);
    assert_eq!(union.tags(), &[0, 1]);
    assert_eq!(union.index(), &[0, 0]);

    assert!(UnionArray::new(vec![0, 2], vec![0, 0], contents.clone()).is_err());
    assert!(UnionArray::new(vec![0], vec![0, 0], contents).is_err());
}
