//! Describing native Rust data as `Value`s.
//!
//! `ToValue` is the type-describing wrapper for plain Rust data: the
//! implementing type reports its static `Type` (needed for empty
//! collections) and converts an instance into a `Value` tree.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::types::{FloatWidth, IntWidth, Type};
use crate::value::{MapKey, Value};

/// A Rust type that can describe itself as a `Value`.
pub trait ToValue {
    /// Static type of every value this type produces.
    fn value_type() -> Type;

    fn to_value(&self) -> Value;
}

/// A Rust type usable as a map key.
pub trait ToMapKey: ToValue {
    fn to_map_key(&self) -> MapKey;
}

impl Value {
    /// Describe a native value.
    pub fn of<T: ToValue>(value: &T) -> Value {
        value.to_value()
    }
}

impl ToValue for bool {
    fn value_type() -> Type {
        Type::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToMapKey for bool {
    fn to_map_key(&self) -> MapKey {
        MapKey::Bool(*self)
    }
}

macro_rules! int_to_value {
    ($($t:ty => $variant:ident, $width:ident, $wide:ty;)*) => {
        $(
            impl ToValue for $t {
                fn value_type() -> Type {
                    Type::$variant(IntWidth::$width)
                }

                fn to_value(&self) -> Value {
                    Value::$variant(IntWidth::$width, <$wide>::from(*self))
                }
            }

            impl ToMapKey for $t {
                fn to_map_key(&self) -> MapKey {
                    MapKey::$variant(<$wide>::from(*self))
                }
            }
        )*
    };
}

int_to_value! {
    i8 => Int, W8, i64;
    i16 => Int, W16, i64;
    i32 => Int, W32, i64;
    i64 => Int, W64, i64;
    u8 => Uint, W8, u64;
    u16 => Uint, W16, u64;
    u32 => Uint, W32, u64;
    u64 => Uint, W64, u64;
}

impl ToValue for f32 {
    fn value_type() -> Type {
        Type::Float(FloatWidth::F32)
    }

    fn to_value(&self) -> Value {
        Value::Float(FloatWidth::F32, f64::from(*self))
    }
}

impl ToValue for f64 {
    fn value_type() -> Type {
        Type::Float(FloatWidth::F64)
    }

    fn to_value(&self) -> Value {
        Value::float(*self)
    }
}

impl ToValue for String {
    fn value_type() -> Type {
        Type::Str
    }

    fn to_value(&self) -> Value {
        Value::string(self.as_str())
    }
}

impl ToMapKey for String {
    fn to_map_key(&self) -> MapKey {
        MapKey::from(self.as_str())
    }
}

impl ToValue for &str {
    fn value_type() -> Type {
        Type::Str
    }

    fn to_value(&self) -> Value {
        Value::string(*self)
    }
}

impl ToMapKey for &str {
    fn to_map_key(&self) -> MapKey {
        MapKey::from(*self)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn value_type() -> Type {
        Type::slice_of(T::value_type())
    }

    fn to_value(&self) -> Value {
        Value::slice(T::value_type(), self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn value_type() -> Type {
        Type::array_of(N, T::value_type())
    }

    fn to_value(&self) -> Value {
        Value::array(T::value_type(), self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: ToMapKey, V: ToValue> ToValue for BTreeMap<K, V> {
    fn value_type() -> Type {
        Type::map_of(K::value_type(), V::value_type())
    }

    fn to_value(&self) -> Value {
        Value::map(
            K::value_type(),
            V::value_type(),
            self.iter().map(|(k, v)| (k.to_map_key(), v.to_value())),
        )
    }
}

impl<K: ToMapKey, V: ToValue, S: BuildHasher> ToValue for HashMap<K, V, S> {
    fn value_type() -> Type {
        Type::map_of(K::value_type(), V::value_type())
    }

    fn to_value(&self) -> Value {
        Value::map(
            K::value_type(),
            V::value_type(),
            self.iter().map(|(k, v)| (k.to_map_key(), v.to_value())),
        )
    }
}

#[cfg(test)]
mod tests;
