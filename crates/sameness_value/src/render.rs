//! Human-readable rendering of values for diagnostics.
//!
//! Rendering always terminates: the only edges that can close a cycle are
//! pointer cells, and only the outermost pointer is followed. Pointers
//! nested anywhere below the root render as their address.

use std::fmt;

use crate::value::{MapValue, PtrValue, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self, true)
    }
}

fn render(f: &mut fmt::Formatter<'_>, value: &Value, root: bool) -> fmt::Result {
    match value {
        Value::Nil => f.write_str("<nil>"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(_, n) => write!(f, "{n}"),
        Value::Uint(_, n) => write!(f, "{n}"),
        Value::Float(_, x) => write!(f, "{x}"),
        Value::Complex(_, c) => write!(f, "{c}"),
        Value::Str(s) => write!(f, "{:?}", &**s),
        Value::Array(a) => render_seq(f, a.items()),
        Value::Slice(s) if s.is_nil() => f.write_str("<nil>"),
        Value::Slice(s) => render_seq(f, s.items()),
        Value::Map(m) => render_map(f, m),
        Value::Ptr(p) => render_ptr(f, p, root),
        Value::Interface(i) => match i.inner() {
            Some(inner) => render(f, inner, root),
            None => f.write_str("<nil>"),
        },
        Value::Struct(s) => {
            write!(f, "{}{{", s.name())?;
            for (i, (name, field)) in s.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: ")?;
                render(f, field, false)?;
            }
            f.write_str("}")
        }
        Value::Chan(c) => write!(f, "chan {:#x}", c.handle()),
        Value::Func(func) => write!(f, "func {:#x}", func.handle()),
        Value::RawPtr(addr) => write!(f, "rawptr {addr:#x}"),
    }
}

fn render_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        render(f, item, false)?;
    }
    f.write_str("]")
}

fn render_map(f: &mut fmt::Formatter<'_>, map: &MapValue) -> fmt::Result {
    if map.is_nil() {
        return f.write_str("<nil>");
    }
    f.write_str("map[")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: ")?;
        render(f, value, false)?;
    }
    f.write_str("]")
}

fn render_ptr(f: &mut fmt::Formatter<'_>, ptr: &PtrValue, root: bool) -> fmt::Result {
    match ptr.cell() {
        None => f.write_str("<nil>"),
        Some(cell) if root => {
            f.write_str("&")?;
            render(f, &cell.get(), false)
        }
        Some(cell) => write!(f, "{:#x}", cell.addr()),
    }
}

#[cfg(test)]
mod tests;
