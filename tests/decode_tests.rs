use toon_codec::{decode, DecodeOptions, ExpandPaths, Object, ToonError, Value};

fn obj(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<Object>(),
    )
}

fn decode_default(input: &str) -> Value {
    decode(input, &DecodeOptions::default()).unwrap()
}

fn lenient() -> DecodeOptions {
    DecodeOptions::default().with_strict(false)
}

#[test]
fn inline_primitive_array() {
    assert_eq!(
        decode_default("tags[3]: AI,Gardening,Mobile"),
        obj(vec![("tags", Value::from(vec!["AI", "Gardening", "Mobile"]))])
    );
}

#[test]
fn keyless_root_array() {
    assert_eq!(
        decode_default("[3]: 1,2,3"),
        Value::from(vec![Value::from(1), Value::from(2), Value::from(3)])
    );
}

#[test]
fn tabular_array_keeps_quoted_cells_whole() {
    let input = "cards[2]{id,title,tags}:\n  1,Garden,AI\n  2,\"Hello, world\",Mobile";
    assert_eq!(
        decode_default(input),
        obj(vec![(
            "cards",
            Value::Array(vec![
                obj(vec![
                    ("id", Value::from(1)),
                    ("title", Value::from("Garden")),
                    ("tags", Value::from("AI")),
                ]),
                obj(vec![
                    ("id", Value::from(2)),
                    ("title", Value::from("Hello, world")),
                    ("tags", Value::from("Mobile")),
                ]),
            ])
        )])
    );
}

#[test]
fn mixed_list_with_nested_objects() {
    let input = "items[2]:\n  - id: 1\n    meta:\n      note: first\n  - id: 2\n    meta:\n      note: second";
    assert_eq!(
        decode_default(input),
        obj(vec![(
            "items",
            Value::Array(vec![
                obj(vec![
                    ("id", Value::from(1)),
                    ("meta", obj(vec![("note", Value::from("first"))])),
                ]),
                obj(vec![
                    ("id", Value::from(2)),
                    ("meta", obj(vec![("note", Value::from("second"))])),
                ]),
            ])
        )])
    );
}

#[test]
fn length_marker_is_accepted_and_ignored() {
    assert_eq!(
        decode_default("scores[#3|]: 10|20|30"),
        obj(vec![(
            "scores",
            Value::from(vec![Value::from(10), Value::from(20), Value::from(30)])
        )])
    );
    assert_eq!(
        decode_default("[#2]: a,b"),
        Value::from(vec!["a", "b"])
    );
}

#[test]
fn primitive_documents() {
    assert_eq!(decode_default("hello"), Value::from("hello"));
    assert_eq!(decode_default("42"), Value::from(42));
    assert_eq!(decode_default("true"), Value::Bool(true));
    assert_eq!(decode_default("null"), Value::Null);
    assert_eq!(decode_default("\"a: b\""), Value::from("a: b"));
}

#[test]
fn literal_shaped_tokens_stay_strings_when_quoted() {
    assert_eq!(
        decode_default("a: \"true\"\nb: \"1.5\"\nc: 007"),
        obj(vec![
            ("a", Value::from("true")),
            ("b", Value::from("1.5")),
            ("c", Value::from("007")),
        ])
    );
}

#[test]
fn empty_values_decode_to_empty_objects() {
    assert_eq!(decode_default("a:"), obj(vec![("a", obj(vec![]))]));
    assert_eq!(
        decode_default("items[2]:\n  -\n  -"),
        obj(vec![("items", Value::Array(vec![obj(vec![]), obj(vec![])]))])
    );
}

#[test]
fn empty_array_header_forms() {
    assert_eq!(
        decode_default("tags[0]:"),
        obj(vec![("tags", Value::Array(Vec::new()))])
    );
    assert_eq!(
        decode_default("tags[0]: "),
        obj(vec![("tags", Value::Array(Vec::new()))])
    );
}

#[test]
fn quoted_keys() {
    assert_eq!(
        decode_default("\"my key\": 1"),
        obj(vec![("my key", Value::from(1))])
    );
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(
        decode("", &DecodeOptions::default()),
        Err(ToonError::Input { .. })
    ));
    assert!(matches!(
        decode("   \n\t\n", &DecodeOptions::default()),
        Err(ToonError::Input { .. })
    ));
}

#[test]
fn strict_rejects_surplus_tabular_rows() {
    let input = "users[2]{id,name}:\n  1,Ann\n  2,Bob\n  3,Eve";
    let err = decode(input, &DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, ToonError::Layout { .. }));
    assert!(err.to_string().contains("expected 2"));

    let value = decode(input, &lenient()).unwrap();
    let Value::Object(entries) = &value else {
        panic!("expected object");
    };
    let Some(Value::Array(rows)) = entries.get("users") else {
        panic!("expected rows");
    };
    assert_eq!(rows.len(), 2);
}

#[test]
fn strict_rejects_count_mismatches() {
    assert!(matches!(
        decode("nums[5]: 1,2", &DecodeOptions::default()),
        Err(ToonError::CountMismatch { expected: 5, found: 2, .. })
    ));
    assert_eq!(
        decode("nums[5]: 1,2", &lenient()).unwrap(),
        obj(vec![("nums", Value::from(vec![Value::from(1), Value::from(2)]))])
    );

    assert!(matches!(
        decode("users[1]{id,name}:\n  1,Ann,extra", &DecodeOptions::default()),
        Err(ToonError::CountMismatch { expected: 2, found: 3, .. })
    ));
}

#[test]
fn strict_rejects_surplus_list_items() {
    let input = "items[1]:\n  - 1\n  - 2";
    assert!(matches!(
        decode(input, &DecodeOptions::default()),
        Err(ToonError::Layout { .. })
    ));
    assert_eq!(
        decode(input, &lenient()).unwrap(),
        obj(vec![("items", Value::from(vec![Value::from(1)]))])
    );
}

#[test]
fn strict_rejects_blank_lines_inside_blocks() {
    let input = "users[2]{id,name}:\n  1,Ann\n\n  2,Bob";
    let err = decode(input, &DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, ToonError::Layout { line: Some(3), .. }));

    let value = decode(input, &lenient()).unwrap();
    let Value::Object(entries) = &value else {
        panic!("expected object");
    };
    let Some(Value::Array(rows)) = entries.get("users") else {
        panic!("expected rows");
    };
    assert_eq!(rows.len(), 2);
}

#[test]
fn strict_rejects_bad_indentation() {
    assert!(matches!(
        decode("a:\n\tb: 1", &DecodeOptions::default()),
        Err(ToonError::Layout { .. })
    ));
    assert!(matches!(
        decode("a:\n   b: 1", &DecodeOptions::default()),
        Err(ToonError::Layout { .. })
    ));
    // Three spaces is exactly one level at indent 3.
    assert_eq!(
        decode("a:\n   b: 1", &DecodeOptions::default().with_indent(3)).unwrap(),
        obj(vec![("a", obj(vec![("b", Value::from(1))]))])
    );
}

#[test]
fn grammar_errors_are_fatal_even_without_strict() {
    assert!(matches!(
        decode("a: \"oops", &lenient()),
        Err(ToonError::Grammar { .. })
    ));
    assert!(matches!(
        decode("a: \"x\\qy\"", &lenient()),
        Err(ToonError::Grammar { .. })
    ));
    assert!(matches!(
        decode("hello\nworld", &lenient()),
        Err(ToonError::Grammar { .. })
    ));
    assert!(matches!(
        decode("items[abc]: x", &lenient()),
        Err(ToonError::Grammar { .. })
    ));
}

#[test]
fn errors_carry_line_numbers() {
    let err = decode("a: 1\nb: \"open", &DecodeOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Line 2: Unterminated string: missing closing quote");
}

#[test]
fn strict_rejects_orphan_lines_past_the_document() {
    let input = "a: 1\n    b: 2";
    assert!(matches!(
        decode(input, &DecodeOptions::default()),
        Err(ToonError::Layout { .. })
    ));
    assert_eq!(
        decode(input, &lenient()).unwrap(),
        obj(vec![("a", Value::from(1))])
    );
}

#[test]
fn nested_arrays_in_list_items() {
    let input = "m[2]:\n  - [2]: 1,2\n  - [2]: 3,4";
    assert_eq!(
        decode_default(input),
        obj(vec![(
            "m",
            Value::Array(vec![
                Value::from(vec![Value::from(1), Value::from(2)]),
                Value::from(vec![Value::from(3), Value::from(4)]),
            ])
        )])
    );
}

#[test]
fn expand_paths_rebuilds_nested_objects() {
    let options = DecodeOptions::default().with_expand_paths(ExpandPaths::Safe);
    assert_eq!(
        decode("a.b: 1\na.c: 2", &options).unwrap(),
        obj(vec![(
            "a",
            obj(vec![("b", Value::from(1)), ("c", Value::from(2))])
        )])
    );
    // Quoted keys are never expanded.
    assert_eq!(
        decode("\"a.b\": 1", &options).unwrap(),
        obj(vec![("a.b", Value::from(1))])
    );
    // Off by default.
    assert_eq!(
        decode_default("a.b: 1"),
        obj(vec![("a.b", Value::from(1))])
    );
}

#[test]
fn expand_path_conflicts_error_in_strict_mode() {
    let options = DecodeOptions::default().with_expand_paths(ExpandPaths::Safe);
    assert!(matches!(
        decode("a: 1\na.b: 2", &options).unwrap_err(),
        ToonError::Expand { .. }
    ));

    let tolerant = lenient().with_expand_paths(ExpandPaths::Safe);
    assert_eq!(
        decode("a: 1\na.b: 2", &tolerant).unwrap(),
        obj(vec![("a", obj(vec![("b", Value::from(2))]))])
    );
}
