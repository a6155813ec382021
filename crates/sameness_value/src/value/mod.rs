//! Runtime values fed to the comparator.
//!
//! `Value` is a closed tagged union covering primitives, sequences,
//! mappings, pointers, interfaces, structs and opaque handles. Heap-backed
//! variants are built through factory methods on `Value`, which record the
//! element types needed to describe nil and empty values.
//!
//! # Identity
//!
//! Slices, maps and pointers share storage through `Arc`. Their identity is
//! the address of that storage (see [`Identity`]), which is what lets the
//! comparator recognise a pair of references it is already comparing and
//! stop instead of recursing forever around a cycle.
//!
//! ```text
//! let a = PtrCell::new(Value::Nil);
//! let b = PtrCell::new(Value::Nil);
//! a.set(Value::structure(node.clone(), vec![Value::int(1), Value::ptr(node_ty.clone(), &b)]));
//! b.set(Value::structure(node.clone(), vec![Value::int(2), Value::ptr(node_ty.clone(), &a)]));
//! ```

mod composite;
mod handle;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use composite::{
    ArrayValue, Complex, InterfaceValue, MapKey, MapValue, PtrCell, PtrValue, SliceValue,
    StructValue,
};
pub use handle::{ChanValue, FuncBody, FuncValue};

use crate::types::{FloatWidth, IntWidth, StructLayout, Type};
use composite::SliceData;

/// Address-based identity of a reference-like value.
///
/// `extent` distinguishes windows that start at the same address (a slice
/// and its own prefix); it is zero for maps and pointers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    pub addr: usize,
    pub extent: usize,
}

impl Identity {
    pub const fn new(addr: usize, extent: usize) -> Self {
        Identity { addr, extent }
    }
}

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Untyped absence.
    Nil,

    // Primitives
    Bool(bool),
    Int(IntWidth, i64),
    Uint(IntWidth, u64),
    /// Floating point; `F32` values are stored widened.
    Float(FloatWidth, f64),
    Complex(FloatWidth, Complex),
    Str(Arc<str>),

    // Sequences and mappings
    Array(ArrayValue),
    Slice(SliceValue),
    Map(MapValue),

    // References and aggregates
    Ptr(PtrValue),
    Interface(InterfaceValue),
    Struct(StructValue),

    // Opaque handles
    Chan(ChanValue),
    Func(FuncValue),
    /// Untyped address.
    RawPtr(usize),
}

// Factory Methods

impl Value {
    /// 64-bit signed integer.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(IntWidth::W64, n)
    }

    /// 64-bit unsigned integer.
    #[inline]
    pub fn uint(n: u64) -> Self {
        Value::Uint(IntWidth::W64, n)
    }

    /// 64-bit float.
    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(FloatWidth::F64, f)
    }

    #[inline]
    pub fn complex(re: f64, im: f64) -> Self {
        Value::Complex(FloatWidth::F64, Complex::new(re, im))
    }

    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Fixed-size sequence of `elem`.
    pub fn array(elem: Type, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|v| v.ty() == elem), "array element type");
        Value::Array(ArrayValue {
            elem: Arc::new(elem),
            items: Arc::from(items),
        })
    }

    /// Non-nil slice of `elem` (possibly empty).
    pub fn slice(elem: Type, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|v| v.ty() == elem), "slice element type");
        Value::Slice(SliceValue {
            elem: Arc::new(elem),
            data: Some(SliceData::new(items)),
        })
    }

    pub fn nil_slice(elem: Type) -> Self {
        Value::Slice(SliceValue {
            elem: Arc::new(elem),
            data: None,
        })
    }

    /// Non-nil map from `key` to `value`.
    pub fn map<I>(key: Type, value: Type, entries: I) -> Self
    where
        I: IntoIterator<Item = (MapKey, Value)>,
    {
        let entries: BTreeMap<MapKey, Value> = entries.into_iter().collect();
        Value::Map(MapValue {
            key: Arc::new(key),
            value: Arc::new(value),
            entries: Some(Arc::new(entries)),
        })
    }

    pub fn nil_map(key: Type, value: Type) -> Self {
        Value::Map(MapValue {
            key: Arc::new(key),
            value: Arc::new(value),
            entries: None,
        })
    }

    /// Pointer to an existing cell.
    pub fn ptr(elem: Type, cell: &PtrCell) -> Self {
        Value::Ptr(PtrValue {
            elem: Arc::new(elem),
            cell: Some(cell.clone()),
        })
    }

    /// Pointer to a fresh cell holding `value`.
    pub fn ptr_to(value: Value) -> Self {
        let elem = value.ty();
        Value::ptr(elem, &PtrCell::new(value))
    }

    pub fn nil_ptr(elem: Type) -> Self {
        Value::Ptr(PtrValue {
            elem: Arc::new(elem),
            cell: None,
        })
    }

    /// Interface slot `name` holding `inner`.
    pub fn interface(name: &str, inner: Value) -> Self {
        Value::Interface(InterfaceValue {
            name: Arc::from(name),
            inner: Some(Arc::new(inner)),
        })
    }

    pub fn nil_interface(name: &str) -> Self {
        Value::Interface(InterfaceValue {
            name: Arc::from(name),
            inner: None,
        })
    }

    /// Struct instance; `fields` follow the layout's declaration order.
    pub fn structure(layout: Arc<StructLayout>, fields: Vec<Value>) -> Self {
        debug_assert_eq!(layout.len(), fields.len(), "struct field count");
        Value::Struct(StructValue {
            layout,
            fields: Arc::from(fields),
        })
    }

    #[inline]
    pub fn chan(chan: ChanValue) -> Self {
        Value::Chan(chan)
    }

    #[inline]
    pub fn func(func: FuncValue) -> Self {
        Value::Func(func)
    }
}

// Value Methods

impl Value {
    /// Runtime type of this value.
    pub fn ty(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::Bool(_) => Type::Bool,
            Value::Int(w, _) => Type::Int(*w),
            Value::Uint(w, _) => Type::Uint(*w),
            Value::Float(w, _) => Type::Float(*w),
            Value::Complex(w, _) => Type::Complex(*w),
            Value::Str(_) => Type::Str,
            Value::Array(a) => Type::Array {
                len: a.items.len(),
                elem: Arc::clone(&a.elem),
            },
            Value::Slice(s) => Type::Slice(Arc::clone(&s.elem)),
            Value::Map(m) => Type::Map {
                key: Arc::clone(&m.key),
                value: Arc::clone(&m.value),
            },
            Value::Ptr(p) => Type::Ptr(Arc::clone(&p.elem)),
            Value::Interface(i) => Type::Interface(Arc::clone(&i.name)),
            Value::Struct(s) => Type::Struct(Arc::clone(&s.layout)),
            Value::Chan(c) => Type::chan_of(c.dir(), c.elem().clone()),
            Value::Func(f) => Type::func(f.signature()),
            Value::RawPtr(_) => Type::RawPtr,
        }
    }

    /// Identity of a non-nil slice, map or pointer.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Slice(s) => s.identity(),
            Value::Map(m) => m.identity(),
            Value::Ptr(p) => p.identity(),
            _ => None,
        }
    }

    /// Handle address of a channel, function or raw pointer (zero for nil).
    pub fn handle(&self) -> Option<usize> {
        match self {
            Value::Chan(c) => Some(c.handle()),
            Value::Func(f) => Some(f.handle()),
            Value::RawPtr(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Elements of an array or slice, in order.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a.items()),
            Value::Slice(s) => Some(s.items()),
            _ => None,
        }
    }

    /// Whether this is the untyped absent value.
    pub fn is_untyped_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(_, n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::uint(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests;
