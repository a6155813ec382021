//! Sameness Check - structural equality and multiset matching.
//!
//! Two operations over [`sameness_value::Value`] graphs:
//!
//! - [`deep_equal`] decides structural equality and, on failure, names the
//!   first mismatch with an access path (`got.child.i is 100, want.child.i
//!   is 200`). Cyclic graphs terminate.
//! - [`has_same_elements`] decides whether a sequence or a channel holds the
//!   same multiset of elements as an expected sequence, ignoring order but
//!   respecting multiplicity.
//!
//! [`is_nil`] is the nil predicate shared by both.
//!
//! # Tracing
//!
//! Both operations emit `tracing` spans at `debug` and short-circuit events
//! at `trace`. Call [`init_tracing`] and set `RUST_LOG` to see them:
//!
//! ```bash
//! RUST_LOG=sameness_check=trace cargo test
//! ```

use std::sync::Once;

mod deep_equal;
mod elements;
mod nil;
mod stack;

pub use deep_equal::{deep_equal, equals, Mismatch};
pub use elements::{
    has_same_elements, has_same_elements_with, ElementsError, ElementsReport, RenderOptions,
};
pub use nil::is_nil;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once;
/// only the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
