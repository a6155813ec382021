//! Nil predicate.

use sameness_value::Value;

/// Whether `value` is nil: the untyped absent value, or a nil pointer,
/// slice, map, channel, function or interface.
///
/// An interface holding a nil pointer counts as nil, as does the empty
/// interface itself. Empty but allocated slices and maps are not nil, and
/// raw pointers are never nil, not even at address zero.
pub fn is_nil(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Ptr(p) => p.is_nil(),
        Value::Slice(s) => s.is_nil(),
        Value::Map(m) => m.is_nil(),
        Value::Chan(c) => c.is_nil(),
        Value::Func(f) => f.is_nil(),
        Value::Interface(i) => i.inner().map_or(true, is_nil),
        Value::Bool(_)
        | Value::Int(..)
        | Value::Uint(..)
        | Value::Float(..)
        | Value::Complex(..)
        | Value::Str(_)
        | Value::Array(_)
        | Value::Struct(_)
        | Value::RawPtr(_) => false,
    }
}
