//! Runtime type descriptors.
//!
//! Every `Value` carries enough information to derive its `Type`. Two values
//! can only be structurally equal when their types are equal, so the
//! comparator checks types before it looks at content.
//!
//! # Recursive Types
//!
//! Struct types are nominal: a `StructLayout` records the struct name and
//! its ordered field names, but not the field types. Field types live on
//! the field values. This keeps descriptors finite for self-referential
//! shapes such as `Node { next: *Node }`.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

/// Bit width of an integer type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Number of bits.
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

/// Bit width of a floating point component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    pub const fn bits(self) -> u32 {
        match self {
            FloatWidth::F32 => 32,
            FloatWidth::F64 => 64,
        }
    }
}

bitflags! {
    /// Direction a channel handle permits.
    ///
    /// Receive-only and send-only views share the identity of the
    /// underlying channel; only the permitted operations differ.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ChanDir: u8 {
        /// Values can be received.
        const RECV = 1 << 0;
        /// Values can be sent.
        const SEND = 1 << 1;
        /// Bidirectional.
        const BOTH = Self::RECV.bits() | Self::SEND.bits();
    }
}

impl ChanDir {
    #[inline]
    pub fn can_recv(self) -> bool {
        self.contains(ChanDir::RECV)
    }

    #[inline]
    pub fn can_send(self) -> bool {
        self.contains(ChanDir::SEND)
    }
}

/// Name and ordered field names of a struct type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructLayout {
    name: Arc<str>,
    fields: Vec<Arc<str>>,
}

impl StructLayout {
    /// Create a layout. Field order is the declaration order and is the
    /// order in which the comparator visits fields.
    pub fn new<I, S>(name: &str, fields: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Arc::new(StructLayout {
            name: Arc::from(name),
            fields: fields.into_iter().map(|f| Arc::from(f.as_ref())).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> &[Arc<str>] {
        &self.fields
    }

    /// Position of a field by name.
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| &**f == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Discriminant of a `Type`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    Str,
    Array,
    Slice,
    Map,
    Ptr,
    Interface,
    Struct,
    Chan,
    Func,
    RawPtr,
}

impl Kind {
    /// Reference-like kinds with an addressable identity.
    ///
    /// These are the kinds recorded in the comparator's visited set. Every
    /// cycle in a value graph passes through at least one of them.
    pub const fn is_tracked(self) -> bool {
        matches!(self, Kind::Slice | Kind::Map | Kind::Ptr)
    }

    /// Opaque handles, compared by identity only.
    pub const fn is_handle(self) -> bool {
        matches!(self, Kind::Chan | Kind::Func | Kind::RawPtr)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Str => "str",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Ptr => "ptr",
            Kind::Interface => "interface",
            Kind::Struct => "struct",
            Kind::Chan => "chan",
            Kind::Func => "func",
            Kind::RawPtr => "rawptr",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime type of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Type of the untyped absent value.
    Nil,
    Bool,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    /// Complex number whose components have the given width.
    Complex(FloatWidth),
    Str,
    /// Fixed-size sequence.
    Array {
        len: usize,
        elem: Arc<Type>,
    },
    /// Dynamic sequence.
    Slice(Arc<Type>),
    Map {
        key: Arc<Type>,
        value: Arc<Type>,
    },
    Ptr(Arc<Type>),
    /// Named interface; values hold a concrete payload or nothing.
    Interface(Arc<str>),
    Struct(Arc<StructLayout>),
    Chan {
        dir: ChanDir,
        elem: Arc<Type>,
    },
    /// Function with the given signature text.
    Func(Arc<str>),
    RawPtr,
}

impl Type {
    pub fn kind(&self) -> Kind {
        match self {
            Type::Nil => Kind::Nil,
            Type::Bool => Kind::Bool,
            Type::Int(_) => Kind::Int,
            Type::Uint(_) => Kind::Uint,
            Type::Float(_) => Kind::Float,
            Type::Complex(_) => Kind::Complex,
            Type::Str => Kind::Str,
            Type::Array { .. } => Kind::Array,
            Type::Slice(_) => Kind::Slice,
            Type::Map { .. } => Kind::Map,
            Type::Ptr(_) => Kind::Ptr,
            Type::Interface(_) => Kind::Interface,
            Type::Struct(_) => Kind::Struct,
            Type::Chan { .. } => Kind::Chan,
            Type::Func(_) => Kind::Func,
            Type::RawPtr => Kind::RawPtr,
        }
    }

    /// Element type of sequence, channel and pointer types.
    pub fn elem(&self) -> Option<&Type> {
        match self {
            Type::Array { elem, .. }
            | Type::Slice(elem)
            | Type::Ptr(elem)
            | Type::Chan { elem, .. } => Some(elem),
            Type::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn slice_of(elem: Type) -> Type {
        Type::Slice(Arc::new(elem))
    }

    pub fn array_of(len: usize, elem: Type) -> Type {
        Type::Array {
            len,
            elem: Arc::new(elem),
        }
    }

    pub fn ptr_to(elem: Type) -> Type {
        Type::Ptr(Arc::new(elem))
    }

    pub fn map_of(key: Type, value: Type) -> Type {
        Type::Map {
            key: Arc::new(key),
            value: Arc::new(value),
        }
    }

    pub fn chan_of(dir: ChanDir, elem: Type) -> Type {
        Type::Chan {
            dir,
            elem: Arc::new(elem),
        }
    }

    pub fn interface(name: &str) -> Type {
        Type::Interface(Arc::from(name))
    }

    pub fn func(signature: &str) -> Type {
        Type::Func(Arc::from(signature))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Nil => f.write_str("nil"),
            Type::Bool => f.write_str("bool"),
            Type::Int(w) => write!(f, "i{}", w.bits()),
            Type::Uint(w) => write!(f, "u{}", w.bits()),
            Type::Float(w) => write!(f, "f{}", w.bits()),
            Type::Complex(w) => write!(f, "complex{}", w.bits() * 2),
            Type::Str => f.write_str("str"),
            Type::Array { len, elem } => write!(f, "[{elem}; {len}]"),
            Type::Slice(elem) => write!(f, "[{elem}]"),
            Type::Map { key, value } => write!(f, "map[{key}]{value}"),
            Type::Ptr(elem) => write!(f, "*{elem}"),
            Type::Interface(name) | Type::Func(name) => f.write_str(name),
            Type::Struct(layout) => f.write_str(layout.name()),
            Type::Chan { dir, elem } => {
                if *dir == ChanDir::RECV {
                    write!(f, "<-chan {elem}")
                } else if *dir == ChanDir::SEND {
                    write!(f, "chan<- {elem}")
                } else {
                    write!(f, "chan {elem}")
                }
            }
            Type::RawPtr => f.write_str("rawptr"),
        }
    }
}

#[cfg(test)]
mod tests;
