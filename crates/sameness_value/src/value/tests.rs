use super::*;
use crate::errors::ChannelError;
use crate::types::ChanDir;
use pretty_assertions::assert_eq;

fn strs(items: &[&str]) -> Vec<Value> {
    items.iter().map(|s| Value::string(*s)).collect()
}

#[test]
fn test_factory_types() {
    assert_eq!(Value::int(1).ty(), Type::Int(IntWidth::W64));
    assert_eq!(Value::float(1.0).ty(), Type::Float(FloatWidth::F64));
    assert_eq!(Value::string("x").ty(), Type::Str);
    assert_eq!(
        Value::slice(Type::Str, strs(&["a"])).ty(),
        Type::slice_of(Type::Str)
    );
    assert_eq!(
        Value::array(Type::Str, strs(&["a", "b"])).ty(),
        Type::array_of(2, Type::Str)
    );
    assert_eq!(
        Value::nil_map(Type::Str, Type::Bool).ty(),
        Type::map_of(Type::Str, Type::Bool)
    );
    assert_eq!(Value::ptr_to(Value::int(3)).ty(), Type::ptr_to(Type::Int(IntWidth::W64)));
    assert_eq!(Value::Nil.ty(), Type::Nil);
}

#[test]
fn test_nil_and_empty_slices_differ() {
    let Value::Slice(nil) = Value::nil_slice(Type::Str) else {
        panic!("expected slice");
    };
    let Value::Slice(empty) = Value::slice(Type::Str, vec![]) else {
        panic!("expected slice");
    };
    assert!(nil.is_nil());
    assert!(!empty.is_nil());
    assert_eq!(nil.len(), 0);
    assert_eq!(empty.len(), 0);
    assert!(nil.identity().is_none());
    assert!(empty.identity().is_some());
}

#[test]
fn test_subslice_shares_buffer() {
    let Value::Slice(s) = Value::slice(Type::Str, strs(&["a", "b", "c", "d"])) else {
        panic!("expected slice");
    };
    let Some(head) = s.subslice(0..3) else {
        panic!("in bounds");
    };
    let Some(tail) = s.subslice(1..4) else {
        panic!("in bounds");
    };

    assert_eq!(head.len(), 3);
    assert_eq!(tail.items()[0].as_str(), Some("b"));

    let full = s.identity().map(|i| i.addr);
    assert_eq!(head.identity().map(|i| i.addr), full);
    assert_ne!(head.identity(), s.identity());
    assert_ne!(tail.identity().map(|i| i.addr), full);

    assert!(s.subslice(2..5).is_none());
}

#[test]
fn test_subslice_of_nil_stays_nil() {
    let Value::Slice(nil) = Value::nil_slice(Type::Str) else {
        panic!("expected slice");
    };
    assert!(nil.subslice(0..0).is_some_and(|s| s.is_nil()));
    assert!(nil.subslice(0..1).is_none());
}

#[test]
fn test_clones_keep_identity() {
    let v = Value::slice(Type::Str, strs(&["a"]));
    let w = v.clone();
    assert_eq!(v.identity(), w.identity());

    let m = Value::map(Type::Str, Type::Str, [(MapKey::from("x"), Value::string("y"))]);
    assert_eq!(m.identity(), m.clone().identity());

    let separate = Value::map(Type::Str, Type::Str, [(MapKey::from("x"), Value::string("y"))]);
    assert_ne!(m.identity(), separate.identity());
}

#[test]
fn test_ptr_cells_close_cycles() {
    let node = StructLayout::new("Node", ["value", "next"]);
    let node_ty = Type::Struct(node.clone());
    let a = PtrCell::new(Value::Nil);
    let b = PtrCell::new(Value::Nil);
    a.set(Value::structure(
        node.clone(),
        vec![Value::int(1), Value::ptr(node_ty.clone(), &b)],
    ));
    b.set(Value::structure(
        node,
        vec![Value::int(2), Value::ptr(node_ty, &a)],
    ));

    let Value::Struct(first) = a.get() else {
        panic!("expected struct");
    };
    let Some(Value::Ptr(next)) = first.field("next") else {
        panic!("expected pointer");
    };
    assert!(next.cell().is_some_and(|c| c.ptr_eq(&b)));

    let Some(Value::Struct(second)) = next.deref() else {
        panic!("expected struct");
    };
    assert_eq!(second.field("value").and_then(Value::as_int), Some(2));
}

#[test]
fn test_dropping_long_pointer_chain() {
    let node = StructLayout::new("Node", ["value", "next"]);
    let node_ty = Type::Struct(node.clone());
    let mut head = Value::nil_ptr(node_ty);
    for i in 0..100_000 {
        head = Value::ptr_to(Value::structure(node.clone(), vec![Value::int(i), head]));
    }
    drop(head);
}

#[test]
fn test_drop_keeps_shared_contents() {
    let shared = PtrCell::new(Value::int(7));
    let wrapper = Value::ptr_to(Value::array(
        Type::ptr_to(Type::Int(IntWidth::W64)),
        vec![Value::ptr(Type::Int(IntWidth::W64), &shared)],
    ));
    drop(wrapper);
    assert_eq!(shared.get().as_int(), Some(7));
}

#[test]
fn test_ptr_same_target() {
    let cell = PtrCell::new(Value::int(1));
    let Value::Ptr(p) = Value::ptr(Type::Int(IntWidth::W64), &cell) else {
        panic!("expected pointer");
    };
    let Value::Ptr(q) = Value::ptr(Type::Int(IntWidth::W64), &cell) else {
        panic!("expected pointer");
    };
    let Value::Ptr(other) = Value::ptr_to(Value::int(1)) else {
        panic!("expected pointer");
    };
    let Value::Ptr(nil) = Value::nil_ptr(Type::Int(IntWidth::W64)) else {
        panic!("expected pointer");
    };

    assert!(p.same_target(&q));
    assert!(!p.same_target(&other));
    assert!(!p.same_target(&nil));
    assert!(nil.same_target(&nil.clone()));
}

#[test]
fn test_struct_field_order() {
    let layout = StructLayout::new("Point", ["x", "y"]);
    let Value::Struct(p) = Value::structure(layout, vec![Value::int(1), Value::int(2)]) else {
        panic!("expected struct");
    };
    let names: Vec<&str> = p.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(p.field("y").and_then(Value::as_int), Some(2));
    assert!(p.field("z").is_none());
}

#[test]
fn test_channel_drains_buffered_values() {
    let ch = ChanValue::bounded(Type::Str, 4);
    for s in ["a", "b"] {
        assert_eq!(ch.send(Value::string(s)), Ok(()));
    }
    assert_eq!(ch.len(), 2);
    assert_eq!(ch.try_recv().as_ref().and_then(Value::as_str), Some("a"));
    assert_eq!(ch.try_recv().as_ref().and_then(Value::as_str), Some("b"));
    assert!(ch.try_recv().is_none());
}

#[test]
fn test_channel_close() {
    let ch = ChanValue::bounded(Type::Str, 4);
    assert_eq!(ch.send(Value::string("a")), Ok(()));
    assert_eq!(ch.close(), Ok(()));
    assert_eq!(ch.close(), Err(ChannelError::Closed));
    assert_eq!(ch.send(Value::string("b")), Err(ChannelError::Closed));
    // Buffered values survive close.
    assert_eq!(ch.try_recv().as_ref().and_then(Value::as_str), Some("a"));
    assert!(ch.try_recv().is_none());
}

#[test]
fn test_channel_views_share_identity() {
    let ch = ChanValue::unbounded(Type::Str);
    let rx = ch.recv_only();
    let tx = ch.send_only();
    assert_eq!(rx.handle(), ch.handle());
    assert_eq!(tx.handle(), ch.handle());
    assert_eq!(rx.dir(), ChanDir::RECV);

    assert_eq!(tx.send(Value::string("x")), Ok(()));
    assert!(tx.try_recv().is_none());
    assert_eq!(rx.try_recv().as_ref().and_then(Value::as_str), Some("x"));
    assert_eq!(
        rx.send(Value::string("y")),
        Err(ChannelError::WrongDirection { dir: ChanDir::RECV })
    );
}

#[test]
fn test_nil_channel() {
    let ch = ChanValue::nil(Type::Str);
    assert!(ch.is_nil());
    assert_eq!(ch.handle(), 0);
    assert!(ch.try_recv().is_none());
    assert_eq!(ch.send(Value::string("x")), Err(ChannelError::Nil));
}

#[test]
fn test_function_handles() {
    let f = FuncValue::new("fn() -> str", |_| Value::string("x"));
    let g = FuncValue::new("fn() -> str", |_| Value::string("x"));
    assert_eq!(f.handle(), f.clone().handle());
    assert_ne!(f.handle(), g.handle());
    assert_eq!(f.call(&[]).as_ref().and_then(Value::as_str), Some("x"));

    let nil = FuncValue::nil("fn() -> str");
    assert_eq!(nil.handle(), 0);
    assert!(nil.call(&[]).is_none());
}

#[test]
fn test_handles_only_for_opaque_kinds() {
    assert_eq!(Value::RawPtr(0x10).handle(), Some(0x10));
    assert!(Value::int(1).handle().is_none());
    assert!(Value::chan(ChanValue::nil(Type::Str)).handle().is_some());
}

#[test]
fn test_elements() {
    let v = Value::slice(Type::Str, strs(&["a", "b"]));
    assert_eq!(v.elements().map(<[Value]>::len), Some(2));
    assert_eq!(Value::nil_slice(Type::Str).elements().map(<[Value]>::len), Some(0));
    assert!(Value::string("ab").elements().is_none());
}

#[test]
fn test_map_key_to_value() {
    assert_eq!(MapKey::from("k").to_value().as_str(), Some("k"));
    assert_eq!(MapKey::from(7i64).to_value().as_int(), Some(7));
    assert_eq!(MapKey::from(true).to_value().as_bool(), Some(true));
}
