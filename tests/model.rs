use tabjson::{Array, ErrorKind, Object, Value, ValueKind};

#[test]
fn object_iterates_in_canonical_key_order() {
    let mut obj = Object::new();
    obj.insert("b", 1);
    obj.insert("a", 2);
    obj.insert("c", 3);

    let keys: Vec<&str> = obj.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c"]);

    // Stable across calls.
    let again: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(again, ["a", "b", "c"]);
}

#[test]
fn insert_of_existing_key_overwrites_in_place() {
    let mut obj = Object::new();
    obj.insert("x", 1);
    obj.insert("x", 2);

    assert_eq!(obj.len(), 1);
    assert_eq!(obj.at("x").unwrap(), &Value::Integer(2));
}

#[test]
fn at_reports_missing_keys() {
    let obj = Object::new();
    let err = obj.at("missing").unwrap_err();
    assert_eq!(err.kind, ErrorKind::KeyNotFound);
    assert!(obj.find("missing").is_none());
}

#[test]
fn entry_vivifies_and_allows_in_place_mutation() {
    let mut obj = Object::new();

    // Absent key materializes as Null without an explicit insert.
    assert!(obj.entry("list").is_null());
    assert_eq!(obj.len(), 1);

    // Overwrite the vivified slot, then grow the array through the subscript.
    *obj.entry("list") = Value::Array(Array::new());
    obj.entry("list").as_array_mut().unwrap().push_back("first");
    obj.entry("list").as_array_mut().unwrap().push_back("second");

    let list = obj.at("list").unwrap().as_array().unwrap();
    assert_eq!(list.size(), 2);
    assert_eq!(list.at(1).unwrap().as_str().unwrap(), "second");

    // find() never vivifies.
    assert!(obj.find("other").is_none());
    assert_eq!(obj.len(), 1);
}

#[test]
fn remove_erases_an_entry() {
    let mut obj = Object::new();
    obj.insert("gone", 1);
    obj.insert("kept", 2);

    assert_eq!(obj.remove("gone"), Some(Value::Integer(1)));
    assert_eq!(obj.remove("gone"), None);
    assert_eq!(obj.len(), 1);
    assert!(obj.contains_key("kept"));
}

#[test]
fn array_is_ordered_and_bounds_checked() {
    let mut arr = Array::new();
    arr.reserve(3);
    arr.push_back(10);
    arr.push_back(20);
    arr.push_back(30);

    assert_eq!(arr.size(), 3);
    let collected: Vec<i64> = arr.iter().map(|v| v.as_integer().unwrap()).collect();
    assert_eq!(collected, [10, 20, 30]);

    let err = arr.at(3).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IndexOutOfRange);
}

#[test]
fn construction_widens_native_numeric_types() {
    assert_eq!(Value::from(-33i8), Value::Integer(-33));
    assert_eq!(Value::from(3700u16), Value::Integer(3700));
    assert_eq!(Value::from(27u8), Value::Integer(27));
    assert_eq!(Value::from(12345678i64 << 10), Value::Integer(12641974272));
    assert_eq!(Value::from(1.5f32), Value::Float(1.5));
    assert_eq!(Value::from("text").kind(), ValueKind::String);
    assert_eq!(Value::from(()), Value::Null);
    assert_eq!(Value::from(true), Value::Boolean(true));
}

#[test]
fn strict_access_requires_the_exact_active_kind() {
    let float = Value::Float(3.0);
    let err = float.as_integer().unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeMismatch);

    let int = Value::Integer(3);
    assert_eq!(int.as_float().unwrap_err().kind, ErrorKind::TypeMismatch);

    assert_eq!(Value::Null.as_str().unwrap_err().kind, ErrorKind::TypeMismatch);
    assert_eq!(Value::Boolean(true).as_integer().unwrap_err().kind, ErrorKind::TypeMismatch);
}

#[test]
fn converting_access_rounds_ties_away_from_zero() {
    assert_eq!(Value::Float(2.5).to_integer().unwrap(), 3);
    assert_eq!(Value::Float(2.4).to_integer().unwrap(), 2);
    assert_eq!(Value::Float(-2.5).to_integer().unwrap(), -3);
    assert_eq!(Value::Float(-2.4).to_integer().unwrap(), -2);

    // Integer widens into a floating target directly.
    assert_eq!(Value::Integer(7).to_float().unwrap(), 7.0);
    assert_eq!(Value::Float(0.25).to_float().unwrap(), 0.25);
}

#[test]
fn conversion_rejects_non_numeric_kinds() {
    assert_eq!(Value::Boolean(true).to_integer().unwrap_err().kind, ErrorKind::TypeMismatch);
    assert_eq!(Value::String("1".into()).to_float().unwrap_err().kind, ErrorKind::TypeMismatch);
    assert_eq!(Value::Null.to_integer().unwrap_err().kind, ErrorKind::TypeMismatch);
    assert_eq!(Value::Array(Array::new()).to_float().unwrap_err().kind, ErrorKind::TypeMismatch);
}

#[test]
fn equality_is_structural_and_order_independent_for_objects() {
    let mut left = Object::new();
    left.insert("a", 1);
    left.insert("b", Array::from_iter([1, 2, 3]));

    let mut right = Object::new();
    right.insert("b", Array::from_iter([1, 2, 3]));
    right.insert("a", 1);

    assert_eq!(Value::Object(left.clone()), Value::Object(right));

    // Different kind with numerically equal content is not equal.
    assert_ne!(Value::Integer(1), Value::Float(1.0));

    // Array equality is position-wise.
    assert_ne!(
        Value::Array(Array::from_iter([1, 2])),
        Value::Array(Array::from_iter([2, 1]))
    );

    let mut nested = left.clone();
    nested.insert("a", 2);
    assert_ne!(Value::Object(left), Value::Object(nested));
}

#[test]
fn copies_are_deep_and_independent() {
    let mut original = Object::new();
    original.insert("inner", Array::from_iter([1]));

    let mut copy = original.clone();
    copy.at_mut("inner").unwrap().as_array_mut().unwrap().push_back(2);

    assert_eq!(original.at("inner").unwrap().as_array().unwrap().size(), 1);
    assert_eq!(copy.at("inner").unwrap().as_array().unwrap().size(), 2);
}
