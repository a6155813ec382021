//! Access paths from the compared roots to the value under comparison.

use std::fmt;
use std::sync::Arc;

use sameness_value::{MapKey, Type};

/// One step from a container into a component.
#[derive(Clone, Debug)]
pub(super) enum Segment {
    /// `.name`
    Field(Arc<str>),
    /// `[3]`
    Index(usize),
    /// `["key"]`
    Key(MapKey),
    /// `.(T)`: the concrete value inside an interface slot.
    Unwrap(Type),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{name}"),
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Key(key) => write!(f, "[{key}]"),
            Segment::Unwrap(ty) => write!(f, ".({ty})"),
        }
    }
}

/// Stack of segments, rendered by concatenation. Empty at the roots.
#[derive(Clone, Debug, Default)]
pub(super) struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub(super) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub(super) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.segments.iter().try_for_each(|s| write!(f, "{s}"))
    }
}
