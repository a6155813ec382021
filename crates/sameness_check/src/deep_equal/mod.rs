//! Structural deep equality with path-annotated diagnostics.
//!
//! [`deep_equal`] walks two value graphs in lockstep. The first difference
//! found is reported with the access path leading to it, e.g.
//! `got.child.i is 100, want.child.i is 200`. Sequence comparisons are the
//! exception: every differing index of a sequence is reported, one per line.
//!
//! # Cycles
//!
//! Reference-like kinds (slices, maps, pointers) are recorded in a visited
//! set keyed by the unordered pair of identities plus the type. Meeting a
//! recorded pair again counts as equal, which is what makes comparison of
//! cyclic graphs terminate. Pairs whose comparison failed are removed again,
//! so the set holds only pairs in progress or found equal. The set lives
//! for one call.

mod path;

use rustc_hash::FxHashSet;
use sameness_value::{
    Identity, InterfaceValue, Kind, MapValue, PtrValue, SliceValue, StructValue, Type, Value,
};

use crate::stack::with_stack_headroom;
use path::{Path, Segment};

/// Why two values are not deeply equal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Mismatch {
    reason: String,
}

impl Mismatch {
    fn new(reason: impl Into<String>) -> Self {
        Mismatch {
            reason: reason.into(),
        }
    }

    /// The diagnostic, e.g. `got[1] is "b", want[1] is "not b"`.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn into_reason(self) -> String {
        self.reason
    }
}

/// Compare `got` and `want` structurally.
///
/// Returns `Ok(())` when the two graphs are deeply equal. Otherwise the
/// error describes the first difference found. Top-level nil and type
/// checks come first and use their own phrasing (`got is nil, but want is
/// non-nil`, `got is of type i64, want is of type f64`).
///
/// Floating-point values compare with `==`, so `NaN` is never equal to
/// itself. Channels, functions and raw pointers compare by identity.
#[tracing::instrument(level = "debug", skip_all)]
pub fn deep_equal(got: &Value, want: &Value) -> Result<(), Mismatch> {
    match (got.is_untyped_nil(), want.is_untyped_nil()) {
        (true, true) => return Ok(()),
        (true, false) => return Err(Mismatch::new("got is nil, but want is non-nil")),
        (false, true) => return Err(Mismatch::new("got is non-nil, but want is nil")),
        (false, false) => {}
    }

    let (got_ty, want_ty) = (got.ty(), want.ty());
    if got_ty != want_ty {
        return Err(Mismatch::new(format!(
            "got is of type {got_ty}, want is of type {want_ty}"
        )));
    }

    Comparator::default()
        .compare(got, want)
        .map_err(Mismatch::new)
}

/// `true` when [`deep_equal`] succeeds.
pub fn equals(got: &Value, want: &Value) -> bool {
    deep_equal(got, want).is_ok()
}

/// Unordered pair of identities under comparison, qualified by type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Visit {
    lo: Identity,
    hi: Identity,
    ty: Type,
}

impl Visit {
    fn new(a: Identity, b: Identity, ty: Type) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Visit { lo, hi, ty }
    }
}

/// State of one comparison: pairs already entered and the current path.
#[derive(Debug, Default)]
struct Comparator {
    visited: FxHashSet<Visit>,
    path: Path,
}

type Outcome = Result<(), String>;

impl Comparator {
    fn compare(&mut self, got: &Value, want: &Value) -> Outcome {
        with_stack_headroom(|| self.compare_values(got, want))
    }

    fn descend(&mut self, segment: Segment, got: &Value, want: &Value) -> Outcome {
        self.path.push(segment);
        let outcome = self.compare(got, want);
        self.path.pop();
        outcome
    }

    fn compare_values(&mut self, got: &Value, want: &Value) -> Outcome {
        if got.is_untyped_nil() || want.is_untyped_nil() {
            return self.flags(!got.is_untyped_nil(), !want.is_untyped_nil(), "valid");
        }

        let ty = got.ty();
        let want_ty = want.ty();
        if ty != want_ty {
            let p = &self.path;
            return Err(format!("got{p} has type {ty}, want{p} has type {want_ty}"));
        }

        let visit = match (got.identity(), want.identity()) {
            (Some(a), Some(b)) if ty.kind().is_tracked() => Some(Visit::new(a, b, ty.clone())),
            _ => None,
        };
        if let Some(visit) = &visit {
            if !self.visited.insert(visit.clone()) {
                tracing::trace!(path = %self.path, %ty, "pair already entered");
                return Ok(());
            }
        }

        let outcome = self.compare_kinds(got, want, &ty);
        // A failed pair is forgotten so that another slot holding the same
        // pair is compared, and reported, on its own.
        if let (Err(_), Some(visit)) = (&outcome, &visit) {
            self.visited.remove(visit);
        }
        outcome
    }

    fn compare_kinds(&mut self, got: &Value, want: &Value, ty: &Type) -> Outcome {
        match (got, want) {
            (Value::Slice(a), Value::Slice(b)) => self.compare_slices(a, b),
            (Value::Array(a), Value::Array(b)) => self.compare_sequences(a.items(), b.items()),
            (Value::Interface(a), Value::Interface(b)) => self.compare_interfaces(a, b),
            (Value::Struct(a), Value::Struct(b)) => self.compare_structs(a, b),
            (Value::Ptr(a), Value::Ptr(b)) => self.compare_ptrs(a, b),
            (Value::Map(a), Value::Map(b)) => self.compare_maps(a, b, ty),
            (Value::Chan(a), Value::Chan(b)) => self.handles(Kind::Chan, a.handle(), b.handle()),
            (Value::Func(a), Value::Func(b)) => self.handles(Kind::Func, a.handle(), b.handle()),
            (Value::RawPtr(a), Value::RawPtr(b)) => self.handles(Kind::RawPtr, *a, *b),
            (Value::Bool(a), Value::Bool(b)) => self.scalars(a == b, got, want),
            (Value::Int(_, a), Value::Int(_, b)) => self.scalars(a == b, got, want),
            (Value::Uint(_, a), Value::Uint(_, b)) => self.scalars(a == b, got, want),
            (Value::Float(_, a), Value::Float(_, b)) => self.scalars(float_eq(*a, *b), got, want),
            (Value::Complex(_, a), Value::Complex(_, b)) => self.scalars(a == b, got, want),
            (Value::Str(a), Value::Str(b)) => self.scalars(a == b, got, want),
            _ => unreachable!("values of type {ty} with different representations"),
        }
    }

    /// Equal flags pass. Otherwise names which side has the property.
    fn flags(&self, got: bool, want: bool, property: &str) -> Outcome {
        let p = &self.path;
        match (got, want) {
            (true, false) => Err(format!(
                "got{p} is {property}, want{p} is not {property}"
            )),
            (false, true) => Err(format!(
                "got{p} is not {property}, want{p} is {property}"
            )),
            _ => Ok(()),
        }
    }

    fn scalars(&self, equal: bool, got: &Value, want: &Value) -> Outcome {
        if equal {
            return Ok(());
        }
        let p = &self.path;
        Err(format!("got{p} is {got}, want{p} is {want}"))
    }

    fn handles(&self, kind: Kind, got: usize, want: usize) -> Outcome {
        if got == want {
            return Ok(());
        }
        let p = &self.path;
        Err(format!("got{p} is {kind} {got:#x}, want{p} is {kind} {want:#x}"))
    }

    fn compare_slices(&mut self, got: &SliceValue, want: &SliceValue) -> Outcome {
        if got.is_nil() != want.is_nil() {
            return self.flags(got.is_nil(), want.is_nil(), "nil");
        }
        // Same window over the same buffer.
        if got.identity() == want.identity() {
            return Ok(());
        }
        self.compare_sequences(got.items(), want.items())
    }

    /// Every differing index of the shared prefix, then every index present
    /// on one side only, one message per line.
    fn compare_sequences(&mut self, got: &[Value], want: &[Value]) -> Outcome {
        let mut reasons = Vec::new();
        for (i, (g, w)) in got.iter().zip(want).enumerate() {
            if let Err(reason) = self.descend(Segment::Index(i), g, w) {
                reasons.push(reason);
            }
        }

        let shared = got.len().min(want.len());
        let p = &self.path;
        for (j, g) in got.iter().enumerate().skip(shared) {
            reasons.push(format!("got{p}[{j}] is {g}, no want{p}[{j}] given"));
        }
        for (j, w) in want.iter().enumerate().skip(shared) {
            reasons.push(format!("got{p}[{j}] missing, want{p}[{j}] is {w}"));
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(reasons.join("\n").trim().to_owned())
        }
    }

    fn compare_interfaces(&mut self, got: &InterfaceValue, want: &InterfaceValue) -> Outcome {
        match (got.inner(), want.inner()) {
            (Some(g), Some(w)) => self.descend(Segment::Unwrap(g.ty()), g, w),
            (g, w) => self.flags(g.is_none(), w.is_none(), "nil"),
        }
    }

    fn compare_structs(&mut self, got: &StructValue, want: &StructValue) -> Outcome {
        let names = got.layout().fields();
        for ((name, g), w) in names.iter().zip(got.values()).zip(want.values()) {
            self.descend(Segment::Field(name.clone()), g, w)?;
        }
        Ok(())
    }

    fn compare_ptrs(&mut self, got: &PtrValue, want: &PtrValue) -> Outcome {
        if got.same_target(want) {
            return Ok(());
        }
        match (got.deref(), want.deref()) {
            (Some(g), Some(w)) => self.compare(&g, &w),
            (g, w) => self.flags(g.is_none(), w.is_none(), "nil"),
        }
    }

    fn compare_maps(&mut self, got: &MapValue, want: &MapValue, ty: &Type) -> Outcome {
        if got.is_nil() || want.is_nil() {
            return self.flags(got.is_nil(), want.is_nil(), "nil");
        }
        if got.len() != want.len() {
            let p = &self.path;
            return Err(format!(
                "got{p} is a {ty} with {} entries, want has {} entries",
                got.len(),
                want.len()
            ));
        }
        if got.identity() == want.identity() {
            return Ok(());
        }

        // Only got's keys are scanned. With equal sizes and unique keys,
        // every got key found in want leaves no key of want unmatched.
        for (key, g) in got.iter() {
            let Some(w) = want.get(key) else {
                let p = &self.path;
                return Err(format!("got{p}[{key}] is {g}, want{p}[{key}] is missing"));
            };
            self.descend(Segment::Key(key.clone()), g, w)?;
        }
        Ok(())
    }
}

#[allow(clippy::float_cmp, reason = "exact equality; NaN is unequal to itself")]
fn float_eq(a: f64, b: f64) -> bool {
    a == b
}
