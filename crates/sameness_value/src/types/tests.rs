use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_type_display() {
    assert_eq!(Type::Int(IntWidth::W64).to_string(), "i64");
    assert_eq!(Type::Uint(IntWidth::W8).to_string(), "u8");
    assert_eq!(Type::Float(FloatWidth::F32).to_string(), "f32");
    assert_eq!(Type::Complex(FloatWidth::F64).to_string(), "complex128");
    assert_eq!(Type::array_of(2, Type::Str).to_string(), "[str; 2]");
    assert_eq!(Type::slice_of(Type::Str).to_string(), "[str]");
    assert_eq!(Type::map_of(Type::Str, Type::Str).to_string(), "map[str]str");
    assert_eq!(Type::ptr_to(Type::Int(IntWidth::W64)).to_string(), "*i64");
    assert_eq!(Type::func("fn() -> str").to_string(), "fn() -> str");
}

#[test]
fn test_chan_display_follows_direction() {
    assert_eq!(Type::chan_of(ChanDir::BOTH, Type::Str).to_string(), "chan str");
    assert_eq!(Type::chan_of(ChanDir::RECV, Type::Str).to_string(), "<-chan str");
    assert_eq!(Type::chan_of(ChanDir::SEND, Type::Str).to_string(), "chan<- str");
}

#[test]
fn test_chan_dir() {
    assert!(ChanDir::BOTH.can_recv());
    assert!(ChanDir::BOTH.can_send());
    assert!(ChanDir::RECV.can_recv());
    assert!(!ChanDir::SEND.can_recv());
    assert!(!ChanDir::RECV.can_send());
}

#[test]
fn test_struct_types_are_nominal_plus_fields() {
    let a = StructLayout::new("Point", ["x", "y"]);
    let b = StructLayout::new("Point", ["x", "y"]);
    let c = StructLayout::new("Point", ["x", "z"]);
    let d = StructLayout::new("Pair", ["x", "y"]);

    assert_eq!(Type::Struct(a.clone()), Type::Struct(b));
    assert_ne!(Type::Struct(a.clone()), Type::Struct(c));
    assert_ne!(Type::Struct(a.clone()), Type::Struct(d));
    assert_eq!(a.index_of("y"), Some(1));
    assert_eq!(a.index_of("w"), None);
}

#[test]
fn test_widths_distinguish_types() {
    assert_ne!(Type::Int(IntWidth::W32), Type::Int(IntWidth::W64));
    assert_ne!(Type::Int(IntWidth::W64), Type::Uint(IntWidth::W64));
    assert_ne!(Type::Int(IntWidth::W64), Type::Float(FloatWidth::F64));
}

#[test]
fn test_kind_classification() {
    assert!(Type::slice_of(Type::Str).kind().is_tracked());
    assert!(Type::map_of(Type::Str, Type::Bool).kind().is_tracked());
    assert!(Type::ptr_to(Type::Str).kind().is_tracked());
    assert!(!Type::interface("Shape").kind().is_tracked());
    assert!(!Type::array_of(1, Type::Str).kind().is_tracked());

    assert!(Type::chan_of(ChanDir::BOTH, Type::Str).kind().is_handle());
    assert!(Type::func("fn()").kind().is_handle());
    assert!(Type::RawPtr.kind().is_handle());
    assert!(!Type::Str.kind().is_handle());
}

#[test]
fn test_elem() {
    assert_eq!(Type::slice_of(Type::Str).elem(), Some(&Type::Str));
    assert_eq!(Type::array_of(3, Type::Bool).elem(), Some(&Type::Bool));
    assert_eq!(Type::chan_of(ChanDir::RECV, Type::Str).elem(), Some(&Type::Str));
    assert_eq!(Type::Str.elem(), None);
}
