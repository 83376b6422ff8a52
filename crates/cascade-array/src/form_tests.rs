use indexmap::IndexMap;
use serde_json::json;

use crate::form::{Form, ListForm, NumericForm, RecordForm};
use crate::key;
use crate::{ArrayClass, ArrayError};

fn jagged_int64(outer_key: &str) -> Form {
    let content = NumericForm::int64(key::concat([outer_key, "!content"]));
    Form::List(ListForm::new(Form::Numeric(content), outer_key))
}

#[test]
fn serializes_with_class_tag() {
    let form = jagged_int64("counts,!counts_to_offsets");
    let value = serde_json::to_value(&form).unwrap();
    assert_eq!(
        value,
        json!({
            "class": "ListOffsetArray",
            "offsets": "i64",
            "content": {
                "class": "NumericArray",
                "itemsize": 8,
                "format": "l",
                "primitive": "int64",
                "form_key": "counts,!counts_to_offsets,!content",
            },
            "form_key": "counts,!counts_to_offsets",
        })
    );
}

#[test]
fn empty_parameters_are_skipped() {
    let form = Form::Numeric(NumericForm::float64("pt"));
    let value = serde_json::to_value(&form).unwrap();
    assert!(value.get("parameters").is_none());
}

#[test]
fn parameters_round_trip() {
    let mut numeric = NumericForm::int64("part_parent");
    numeric
        .parameters
        .insert("doc".to_owned(), json!("parent link"));
    let form = Form::Numeric(numeric);

    let text = serde_json::to_string(&form).unwrap();
    let back: Form = serde_json::from_str(&text).unwrap();
    assert_eq!(back, form);
    assert_eq!(back.parameters()["doc"], json!("parent link"));
}

#[test]
fn deserializes_by_class_tag() {
    let form: Form = serde_json::from_value(json!({
        "class": "RecordArray",
        "contents": {
            "x": {
                "class": "NumericArray",
                "itemsize": 8,
                "format": "d",
                "primitive": "float64",
                "form_key": "hit_x",
            },
        },
        "form_key": "hit",
    }))
    .unwrap();

    let record = form.as_record().unwrap();
    assert_eq!(record.contents.len(), 1);
    assert_eq!(record.contents["x"].form_key(), "hit_x");
}

#[test]
fn record_field_order_is_preserved() {
    let mut contents = IndexMap::new();
    for name in ["z", "x", "y"] {
        contents.insert(
            name.to_owned(),
            Form::Numeric(NumericForm::float64(format!("hit_{name}"))),
        );
    }
    let form = Form::Record(RecordForm {
        contents,
        parameters: IndexMap::new(),
        form_key: "hit".to_owned(),
    });

    // Serialize to text: declaration order must survive, not sort order.
    let text = serde_json::to_string(&form).unwrap();
    let positions: Vec<_> = ["hit_z", "hit_x", "hit_y"]
        .iter()
        .map(|k| text.find(k).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn downcasts_enforce_class() {
    let form = jagged_int64("a");
    assert_eq!(form.class(), ArrayClass::List);
    assert!(form.as_list().is_ok());
    assert!(matches!(
        form.as_numeric(),
        Err(ArrayError::StructuralMismatch {
            expected: "NumericArray",
            found: "ListOffsetArray",
        })
    ));
}

#[test]
fn form_key_is_replayable() {
    let form = jagged_int64("counts,!counts_to_offsets");
    let tokens: Vec<_> = key::split(form.form_key()).collect();
    assert_eq!(tokens, vec!["counts", "!counts_to_offsets"]);
}

#[test]
fn serialized_contract_snapshot() {
    let form = jagged_int64("nPart,!counts_to_offsets");
    insta::assert_json_snapshot!(form, @r###"
    {
      "class": "ListOffsetArray",
      "offsets": "i64",
      "content": {
        "class": "NumericArray",
        "itemsize": 8,
        "format": "l",
        "primitive": "int64",
        "form_key": "nPart,!counts_to_offsets,!content"
      },
      "form_key": "nPart,!counts_to_offsets"
    }
    "###);
}
