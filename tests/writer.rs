use tabjson::{
    parse, record_to_string, to_string, to_string_with, to_writer, Array, ErrorKind, Object,
    Record, Value, WriteOptions, Writer,
};

#[test]
fn scalars_render_as_json_literals() {
    assert_eq!(to_string(&Value::Null).unwrap(), "null");
    assert_eq!(to_string(&Value::Boolean(true)).unwrap(), "true");
    assert_eq!(to_string(&Value::Boolean(false)).unwrap(), "false");
    assert_eq!(to_string(&Value::Integer(0)).unwrap(), "0");
    assert_eq!(to_string(&Value::Integer(-100)).unwrap(), "-100");
    assert_eq!(to_string(&Value::Integer(i64::MAX)).unwrap(), "9223372036854775807");
}

#[test]
fn strings_escape_the_required_set_and_nothing_more() {
    // The 4-character string A"B\C becomes the 9-character text "A\"B\\C".
    let rendered = to_string(&Value::from("A\"B\\C")).unwrap();
    assert_eq!(rendered, "\"A\\\"B\\\\C\"");
    assert_eq!(rendered.chars().count(), 9);
    assert_eq!(parse(&rendered).unwrap(), Value::from("A\"B\\C"));

    assert_eq!(
        to_string(&Value::from("a\u{0008}b\u{000C}c\nd\re\tf")).unwrap(),
        "\"a\\bb\\fc\\nd\\re\\tf\""
    );

    // Other control bytes below 0x20 become \u00XX.
    assert_eq!(to_string(&Value::from("\u{0001}\u{001F}")).unwrap(), "\"\\u0001\\u001f\"");

    // Apostrophe, slash, and non-ASCII text pass through unescaped.
    assert_eq!(to_string(&Value::from("it's a/b")).unwrap(), "\"it's a/b\"");
    assert_eq!(to_string(&Value::from("기술적 설명")).unwrap(), "\"기술적 설명\"");
    assert_eq!(to_string(&Value::from("\u{2211}")).unwrap(), "\"\u{2211}\"");
}

#[test]
fn empty_containers_render_compact() {
    assert_eq!(to_string(&Value::Object(Object::new())).unwrap(), "{}");
    assert_eq!(to_string(&Value::Array(Array::new())).unwrap(), "[]");
}

#[test]
fn arrays_render_on_a_single_line() {
    let arr = Array::from_iter([Value::Integer(1), Value::from("two"), Value::Null]);
    assert_eq!(to_string(&Value::Array(arr)).unwrap(), "[1,\"two\",null]");
}

#[test]
fn objects_render_one_tab_indented_entry_per_line_in_key_order() {
    let mut obj = Object::new();
    obj.insert("b", 2);
    obj.insert("a", 1);

    assert_eq!(
        to_string(&Value::Object(obj)).unwrap(),
        "{\n\t\"a\":\t1,\n\t\"b\":\t2\n}"
    );
}

#[test]
fn nested_objects_start_on_their_own_line_at_the_entry_depth() {
    let text = "{\"L1\":{\"L2\":{\"k\":1}}}";
    let value = parse(text).unwrap();
    assert_eq!(
        to_string(&value).unwrap(),
        "{\n\t\"L1\":\t\n\t{\n\t\t\"L2\":\t\n\t\t{\n\t\t\t\"k\":\t1\n\t\t}\n\t}\n}"
    );
}

#[test]
fn record_layout_matches_the_reference_text() {
    let mut inner = Object::new();
    inner.insert("other", Value::Null);
    inner.insert("somestr", "SSS");
    inner.insert("someval", -10);

    let mut outer = Object::new();
    outer.insert("other", inner);
    outer.insert("somestr", "GGG");
    outer.insert("someval", -100);

    let record = Record::new("TheRecord", outer);
    let expected = "\"TheRecord\":\t\n\
                    {\n\
                    \t\"other\":\t\n\
                    \t{\n\
                    \t\t\"other\":\tnull,\n\
                    \t\t\"somestr\":\t\"SSS\",\n\
                    \t\t\"someval\":\t-10\n\
                    \t},\n\
                    \t\"somestr\":\t\"GGG\",\n\
                    \t\"someval\":\t-100\n\
                    }";
    assert_eq!(record_to_string(&record).unwrap(), expected);
}

#[test]
fn record_with_non_object_value_stays_on_one_line() {
    let record = Record::new("count", 5);
    assert_eq!(record_to_string(&record).unwrap(), "\"count\":\t5");

    let record = Record::new("items", Array::from_iter([1, 2]));
    assert_eq!(record_to_string(&record).unwrap(), "\"items\":\t[1,2]");
}

#[test]
fn float_output_honors_the_configured_precision() {
    let third = Value::Float(1.0 / 3.0);
    assert_eq!(
        to_string_with(&third, WriteOptions { float_precision: 3, ..Default::default() }).unwrap(),
        "0.333"
    );
    assert_eq!(
        to_string_with(&third, WriteOptions { float_precision: 12, ..Default::default() }).unwrap(),
        "0.333333333333"
    );

    // Whole-valued floats keep a trailing .0 so the kind survives reparsing.
    let rendered = to_string(&Value::Float(500.0)).unwrap();
    assert_eq!(rendered, "500.0");
    assert_eq!(parse(&rendered).unwrap(), Value::Float(500.0));
}

#[test]
fn non_finite_floats_fail_to_serialize() {
    assert_eq!(to_string(&Value::Float(f64::NAN)).unwrap_err().kind, ErrorKind::InvalidNumber);
    assert_eq!(
        to_string(&Value::Float(f64::NEG_INFINITY)).unwrap_err().kind,
        ErrorKind::InvalidNumber
    );
}

#[test]
fn writer_depth_limit_is_enforced() {
    let mut value = Value::Array(Array::new());
    for _ in 0..10 {
        let mut wrapper = Array::new();
        wrapper.push_back(value);
        value = Value::Array(wrapper);
    }

    let writer = Writer::new(WriteOptions { max_depth: 4, ..Default::default() });
    let mut sink = Vec::new();
    let err = writer.write_value(&mut sink, &value).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DepthExceeded);

    assert!(Writer::default().write_value(&mut Vec::new(), &value).is_ok());
}

#[test]
fn to_writer_streams_into_any_sink() {
    let mut obj = Object::new();
    obj.insert("ratio", 0.625);
    obj.insert("tags", Array::from_iter(["a", "b"]));
    let value = Value::Object(obj);

    let options = WriteOptions { float_precision: 6, ..Default::default() };

    let mut sink: Vec<u8> = Vec::new();
    to_writer(&mut sink, &value, options.clone()).unwrap();

    let streamed = String::from_utf8(sink).unwrap();
    assert_eq!(streamed, to_string_with(&value, options).unwrap());
    assert_eq!(parse(&streamed).unwrap(), value);
}

#[test]
fn objects_inside_arrays_render_at_the_array_depth() {
    let mut obj = Object::new();
    obj.insert("k", 1);
    let arr = Array::from_iter([Value::Object(obj), Value::Integer(2)]);

    assert_eq!(
        to_string(&Value::Array(arr)).unwrap(),
        "[{\n\t\"k\":\t1\n},2]"
    );
}
