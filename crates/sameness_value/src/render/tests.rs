use crate::types::{StructLayout, Type};
use crate::value::{ChanValue, MapKey, PtrCell, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_render_primitives() {
    assert_eq!(Value::int(-3).to_string(), "-3");
    assert_eq!(Value::uint(7).to_string(), "7");
    assert_eq!(Value::float(1.2).to_string(), "1.2");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::string("abc").to_string(), "\"abc\"");
    assert_eq!(Value::string("a\"b").to_string(), "\"a\\\"b\"");
    assert_eq!(Value::complex(2.0, -2.0).to_string(), "(2-2i)");
    assert_eq!(Value::complex(2.0, 2.0).to_string(), "(2+2i)");
    assert_eq!(Value::Nil.to_string(), "<nil>");
}

#[test]
fn test_render_sequences() {
    let s = Value::slice(Type::Str, vec![Value::string("a"), Value::string("b")]);
    assert_eq!(s.to_string(), "[\"a\", \"b\"]");
    assert_eq!(Value::slice(Type::Str, vec![]).to_string(), "[]");
    assert_eq!(Value::nil_slice(Type::Str).to_string(), "<nil>");
    let a = Value::array(Type::Str, vec![Value::string("x")]);
    assert_eq!(a.to_string(), "[\"x\"]");
}

#[test]
fn test_render_map() {
    let m = Value::map(
        Type::Str,
        Type::Str,
        [
            (MapKey::from("b"), Value::string("2")),
            (MapKey::from("a"), Value::string("1")),
        ],
    );
    assert_eq!(m.to_string(), "map[\"a\": \"1\", \"b\": \"2\"]");
    assert_eq!(Value::nil_map(Type::Str, Type::Str).to_string(), "<nil>");
}

#[test]
fn test_render_struct_and_pointer() {
    let layout = StructLayout::new("T", ["i"]);
    let d = Value::structure(layout, vec![Value::int(123)]);
    assert_eq!(d.to_string(), "T{i: 123}");
    assert_eq!(Value::ptr_to(d).to_string(), "&T{i: 123}");
    assert_eq!(Value::ptr_to(Value::string("def")).to_string(), "&\"def\"");
    assert_eq!(Value::nil_ptr(Type::Str).to_string(), "<nil>");
}

#[test]
fn test_render_cycle_terminates() {
    let node = StructLayout::new("Node", ["next"]);
    let node_ty = Type::Struct(node.clone());
    let cell = PtrCell::new(Value::Nil);
    cell.set(Value::structure(node, vec![Value::ptr(node_ty.clone(), &cell)]));

    let rendered = Value::ptr(node_ty, &cell).to_string();
    assert_eq!(rendered, format!("&Node{{next: {:#x}}}", cell.addr()));
}

#[test]
fn test_render_interface_and_handles() {
    assert_eq!(Value::interface("Shape", Value::int(1)).to_string(), "1");
    assert_eq!(Value::nil_interface("Shape").to_string(), "<nil>");
    assert_eq!(Value::RawPtr(0x2a).to_string(), "rawptr 0x2a");
    assert_eq!(Value::chan(ChanValue::nil(Type::Str)).to_string(), "chan 0x0");
}
