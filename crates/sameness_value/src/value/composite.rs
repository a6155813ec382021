//! Composite and reference-like values: sequences, maps, pointers,
//! interfaces and structs.
//!
//! Reference-like values (slices, maps, pointers) share their storage
//! through `Arc`, so cloning a `Value` never copies content and two clones
//! keep the same identity.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Identity, Value};
use crate::types::{StructLayout, Type};

// Complex

/// Complex number with `f64` components.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{:+}i)", self.re, self.im)
    }
}

// Arrays and slices

/// Fixed-size sequence. Arrays have no identity.
#[derive(Clone, Debug)]
pub struct ArrayValue {
    pub(super) elem: Arc<Type>,
    pub(super) items: Arc<[Value]>,
}

impl ArrayValue {
    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// Dynamic sequence: a window over a shared buffer, or nil.
#[derive(Clone, Debug)]
pub struct SliceValue {
    pub(super) elem: Arc<Type>,
    pub(super) data: Option<SliceData>,
}

#[derive(Clone, Debug)]
pub(super) struct SliceData {
    buf: Arc<[Value]>,
    window: Range<usize>,
}

impl SliceData {
    pub(super) fn new(items: Vec<Value>) -> Self {
        let len = items.len();
        SliceData {
            buf: Arc::from(items),
            window: 0..len,
        }
    }
}

impl SliceValue {
    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn is_nil(&self) -> bool {
        self.data.is_none()
    }

    /// Elements in the window. A nil slice has none.
    pub fn items(&self) -> &[Value] {
        match &self.data {
            Some(data) => &data.buf[data.window.clone()],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// A narrower window over the same buffer, relative to this slice.
    ///
    /// Returns `None` when `range` is out of bounds. Slicing a nil slice
    /// with an empty range yields a nil slice.
    pub fn subslice(&self, range: Range<usize>) -> Option<SliceValue> {
        if range.start > range.end || range.end > self.len() {
            return None;
        }
        let data = match &self.data {
            Some(data) => Some(SliceData {
                buf: Arc::clone(&data.buf),
                window: data.window.start + range.start..data.window.start + range.end,
            }),
            None => None,
        };
        Some(SliceValue {
            elem: Arc::clone(&self.elem),
            data,
        })
    }

    /// Address of the first element in the window plus the window length.
    ///
    /// Slices sharing a buffer prefix but differing in length get distinct
    /// identities.
    pub fn identity(&self) -> Option<Identity> {
        let data = self.data.as_ref()?;
        let items = &data.buf[data.window.clone()];
        Some(Identity::new(items.as_ptr() as usize, items.len()))
    }
}

// Maps

/// Comparable subset of values usable as map keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Str(Arc<str>),
}

impl MapKey {
    /// The key as a plain value, for rendering and element comparison.
    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Int(n) => Value::int(*n),
            MapKey::Uint(n) => Value::uint(*n),
            MapKey::Str(s) => Value::Str(Arc::clone(s)),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::Uint(n) => write!(f, "{n}"),
            MapKey::Str(s) => write!(f, "{:?}", &**s),
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::Str(Arc::from(s))
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::Str(Arc::from(s))
    }
}

impl From<i64> for MapKey {
    fn from(n: i64) -> Self {
        MapKey::Int(n)
    }
}

impl From<u64> for MapKey {
    fn from(n: u64) -> Self {
        MapKey::Uint(n)
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        MapKey::Bool(b)
    }
}

/// Keyed mapping, or nil.
///
/// Entries are ordered by key so that diagnostics naming the first
/// differing key are reproducible.
#[derive(Clone, Debug)]
pub struct MapValue {
    pub(super) key: Arc<Type>,
    pub(super) value: Arc<Type>,
    pub(super) entries: Option<Arc<BTreeMap<MapKey, Value>>>,
}

impl MapValue {
    pub fn key_type(&self) -> &Type {
        &self.key
    }

    pub fn value_type(&self) -> &Type {
        &self.value
    }

    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.as_ref()?.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> + '_ {
        self.entries.iter().flat_map(|e| e.iter())
    }

    pub fn identity(&self) -> Option<Identity> {
        let entries = self.entries.as_ref()?;
        Some(Identity::new(Arc::as_ptr(entries) as usize, 0))
    }
}

// Pointers

/// Shared, mutable storage a pointer refers to.
///
/// Cells are how value graphs become cyclic: create the cells first,
/// then `set` their contents to values pointing at each other. A cycle
/// closed this way keeps its cells alive, so the graph is never freed.
/// Break it with `set(Value::Nil)` on one of its cells when that matters.
#[derive(Clone)]
pub struct PtrCell(Arc<RwLock<Value>>);

impl PtrCell {
    pub fn new(value: Value) -> Self {
        PtrCell(Arc::new(RwLock::new(value)))
    }

    /// Snapshot of the pointee. The lock is released before returning.
    pub fn get(&self) -> Value {
        self.0.read().clone()
    }

    pub fn set(&self, value: Value) {
        *self.0.write() = value;
    }

    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub fn ptr_eq(&self, other: &PtrCell) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Move the pointee out if this is the last handle to the cell.
    fn take_if_last(&mut self, pending: &mut Vec<Value>) {
        if let Some(lock) = Arc::get_mut(&mut self.0) {
            pending.push(std::mem::replace(lock.get_mut(), Value::Nil));
        }
    }
}

// Pointer chains nest one cell per link, so dropping them recursively can
// exhaust the stack. Uniquely owned contents are unlinked onto a work list
// instead, leaving each value to drop with its children already moved out.
impl Drop for PtrCell {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_if_last(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.take_children(&mut pending);
        }
    }
}

impl Value {
    /// Move out every child this value owns alone. Shared storage is left
    /// for its other owners to drop.
    fn take_children(&mut self, pending: &mut Vec<Value>) {
        fn take_all(items: &mut Arc<[Value]>, pending: &mut Vec<Value>) {
            if let Some(items) = Arc::get_mut(items) {
                pending.extend(items.iter_mut().map(|v| std::mem::replace(v, Value::Nil)));
            }
        }

        match self {
            Value::Ptr(p) => {
                if let Some(cell) = &mut p.cell {
                    cell.take_if_last(pending);
                }
            }
            Value::Struct(s) => take_all(&mut s.fields, pending),
            Value::Array(a) => take_all(&mut a.items, pending),
            Value::Slice(s) => {
                if let Some(data) = &mut s.data {
                    take_all(&mut data.buf, pending);
                }
            }
            Value::Map(m) => {
                if let Some(entries) = m.entries.as_mut().and_then(Arc::get_mut) {
                    pending.extend(std::mem::take(entries).into_values());
                }
            }
            Value::Interface(i) => {
                if let Some(inner) = i.inner.as_mut().and_then(Arc::get_mut) {
                    pending.push(std::mem::replace(inner, Value::Nil));
                }
            }
            _ => {}
        }
    }
}

// Only the address: pointees may refer back to this cell.
impl fmt::Debug for PtrCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PtrCell({:#x})", self.addr())
    }
}

/// Pointer to a cell, or nil.
#[derive(Clone, Debug)]
pub struct PtrValue {
    pub(super) elem: Arc<Type>,
    pub(super) cell: Option<PtrCell>,
}

impl PtrValue {
    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn is_nil(&self) -> bool {
        self.cell.is_none()
    }

    pub fn cell(&self) -> Option<&PtrCell> {
        self.cell.as_ref()
    }

    /// Snapshot of the pointee, `None` for a nil pointer.
    pub fn deref(&self) -> Option<Value> {
        self.cell.as_ref().map(PtrCell::get)
    }

    /// Both nil, or both pointing at the same cell.
    pub fn same_target(&self, other: &PtrValue) -> bool {
        match (&self.cell, &other.cell) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.cell.as_ref().map(|c| Identity::new(c.addr(), 0))
    }
}

// Interfaces

/// Interface-typed slot holding a concrete value, or nil.
#[derive(Clone, Debug)]
pub struct InterfaceValue {
    pub(super) name: Arc<str>,
    pub(super) inner: Option<Arc<Value>>,
}

impl InterfaceValue {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_nil(&self) -> bool {
        self.inner.is_none()
    }

    /// The concrete value, `None` when nil.
    pub fn inner(&self) -> Option<&Value> {
        self.inner.as_deref()
    }
}

// Structs

/// Struct instance with fields in declaration order.
#[derive(Clone, Debug)]
pub struct StructValue {
    pub(super) layout: Arc<StructLayout>,
    pub(super) fields: Arc<[Value]>,
}

impl StructValue {
    pub fn layout(&self) -> &Arc<StructLayout> {
        &self.layout
    }

    pub fn name(&self) -> &str {
        self.layout.name()
    }

    /// Field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(self.layout.index_of(name)?)
    }

    /// Field names paired with values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.layout
            .fields()
            .iter()
            .map(|name| &**name)
            .zip(self.fields.iter())
    }
}
