//! Stack growth for recursive comparison.
//!
//! Value graphs can be nested arbitrarily deep (long linked lists built
//! from pointer cells, deeply nested slices). The comparator recurses once
//! per level, so every recursive step runs under
//! [`with_stack_headroom`], which moves onto a freshly allocated stack
//! segment when the current one runs low.
//!
//! On `wasm32` the guard is a passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the remaining stack
/// is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    f()
}
