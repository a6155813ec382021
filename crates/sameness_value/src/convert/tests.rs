use std::collections::{BTreeMap, HashMap};

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_primitive_types() {
    assert_eq!(Value::of(&1i64).ty(), Type::Int(IntWidth::W64));
    assert_eq!(Value::of(&1i32).ty(), Type::Int(IntWidth::W32));
    assert_eq!(Value::of(&1u8).ty(), Type::Uint(IntWidth::W8));
    assert_eq!(Value::of(&1.0f32).ty(), Type::Float(FloatWidth::F32));
    assert_eq!(Value::of(&"x").ty(), Type::Str);
    assert_eq!(Value::of(&String::from("x")).ty(), Type::Str);
    assert_eq!(Value::of(&true).ty(), Type::Bool);
}

#[test]
fn test_empty_vec_keeps_element_type() {
    let empty: Vec<String> = Vec::new();
    let v = Value::of(&empty);
    assert_eq!(v.ty(), Type::slice_of(Type::Str));
    assert_eq!(v.elements().map(<[Value]>::len), Some(0));
}

#[test]
fn test_nested_collections() {
    let v = Value::of(&vec![vec![1i64, 2], vec![3]]);
    assert_eq!(v.ty(), Type::slice_of(Type::slice_of(Type::Int(IntWidth::W64))));
    assert_eq!(v.to_string(), "[[1, 2], [3]]");

    let a = Value::of(&["a", "b"]);
    assert_eq!(a.ty(), Type::array_of(2, Type::Str));
}

#[test]
fn test_maps() {
    let mut h = HashMap::new();
    h.insert("b", 2i64);
    h.insert("a", 1i64);
    let hv = Value::of(&h);
    assert_eq!(hv.ty(), Type::map_of(Type::Str, Type::Int(IntWidth::W64)));
    assert_eq!(hv.to_string(), "map[\"a\": 1, \"b\": 2]");

    let mut b = BTreeMap::new();
    b.insert(3u32, true);
    assert_eq!(Value::of(&b).to_string(), "map[3: true]");
}
