//! Sameness Value - runtime value model for structural comparison.
//!
//! This crate provides:
//! - Runtime type descriptors (`Type`, `Kind`, `StructLayout`, `ChanDir`)
//! - The closed `Value` tagged union with identity-carrying references
//! - Opaque handles (`ChanValue`, `FuncValue`, raw addresses)
//! - Diagnostic rendering (`Display for Value`)
//! - `ToValue` for describing native Rust data
//!
//! # Sharing
//!
//! Heap-backed values share storage through `Arc`, and pointer cells use
//! `parking_lot::RwLock` so graphs can be closed into cycles after
//! construction. Values are `Send + Sync`.

mod convert;
mod errors;
mod render;
mod types;
mod value;

pub use convert::{ToMapKey, ToValue};
pub use errors::ChannelError;
pub use types::{ChanDir, FloatWidth, IntWidth, Kind, StructLayout, Type};
pub use value::{
    ArrayValue, ChanValue, Complex, FuncBody, FuncValue, Identity, InterfaceValue, MapKey,
    MapValue, PtrCell, PtrValue, SliceValue, StructValue, Value,
};
