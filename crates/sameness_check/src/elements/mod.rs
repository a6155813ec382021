//! Order-independent element matching.
//!
//! [`has_same_elements`] compares a container (array, slice or receivable
//! channel) against an expected array or slice as multisets: order is
//! ignored, multiplicity is not. Elements are matched with [`equals`].

use std::fmt;

use sameness_value::{ChanValue, Type, Value};

use crate::deep_equal::equals;

/// Knobs for rendering element lists in an [`ElementsReport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Longest total rendering, in bytes, of any one list that is still
    /// printed on one line. Past it every list goes one element per line.
    pub inline_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { inline_limit: 40 }
    }
}

/// Why `got` and `want` do not hold the same elements.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ElementsError {
    #[error("got type '{got}', can only compare arrays, slices, or channels")]
    UnsupportedGot { got: Type },

    #[error("got type '{got}', a non-receiving channel")]
    NonReceivingChannel { got: Type },

    #[error("got type '{got}', want type must be an array or slice of {elem}, not '{want}'")]
    UnsupportedWant { got: Type, elem: Type, want: Type },

    #[error("got type '{got}', wanted type '{want}': contained types do not match")]
    ElementTypeMismatch { got: Type, want: Type },

    /// Both containers were comparable but their contents differ.
    #[error("{0}")]
    Different(ElementsReport),
}

/// Contents of two containers that differ as multisets.
#[derive(Clone, Debug)]
pub struct ElementsReport {
    got: Vec<Value>,
    want: Vec<Value>,
    missing: Vec<Value>,
    extra: Vec<Value>,
    options: RenderOptions,
}

impl ElementsReport {
    /// Elements taken from `got`, in order.
    pub fn got(&self) -> &[Value] {
        &self.got
    }

    pub fn want(&self) -> &[Value] {
        &self.want
    }

    /// Elements of `want` left without a counterpart in `got`.
    pub fn missing(&self) -> &[Value] {
        &self.missing
    }

    /// Elements of `got` left without a counterpart in `want`.
    pub fn extra(&self) -> &[Value] {
        &self.extra
    }
}

impl fmt::Display for ElementsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limit = self.options.inline_limit;
        let [got, want] = render_lists([self.got.as_slice(), self.want.as_slice()], limit);
        write!(
            f,
            "got {got} (len {}),\nwanted {want} (len {})",
            self.got.len(),
            self.want.len()
        )?;
        if !self.missing.is_empty() {
            let [missing] = render_lists([self.missing.as_slice()], limit);
            write!(f, ";\n missing elements: {missing}")?;
        }
        if !self.extra.is_empty() {
            let [extra] = render_lists([self.extra.as_slice()], limit);
            write!(f, ";\nextra elements: {extra}")?;
        }
        Ok(())
    }
}

/// Render each list as `[(type) value, ...]`. Lists laid out together
/// share one layout: if any of them exceeds `limit`, all go multiline.
fn render_lists<const N: usize>(lists: [&[Value]; N], limit: usize) -> [String; N] {
    let rendered = lists.map(|items| {
        items
            .iter()
            .map(|v| format!("({}) {v}", v.ty()))
            .collect::<Vec<_>>()
    });
    let inline = rendered
        .iter()
        .all(|strs| strs.iter().map(String::len).sum::<usize>() <= limit);
    rendered.map(|strs| {
        if inline {
            format!("[{}]", strs.join(", "))
        } else {
            format!("[\n{}\n]", strs.join(",\n"))
        }
    })
}

/// [`has_same_elements_with`] under default [`RenderOptions`].
pub fn has_same_elements(got: &Value, want: &Value) -> Result<(), ElementsError> {
    has_same_elements_with(got, want, &RenderOptions::default())
}

/// Check that `got` and `want` hold the same elements, ignoring order.
///
/// `got` may be an array, a slice or a channel that can receive; `want`
/// must be an array or slice with the same element type. A channel is
/// drained of the items available right now without blocking, whether or
/// not it has been closed; items sent afterwards are not seen. A nil
/// slice holds no elements.
#[tracing::instrument(level = "debug", skip_all)]
pub fn has_same_elements_with(
    got: &Value,
    want: &Value,
    options: &RenderOptions,
) -> Result<(), ElementsError> {
    check_container_types(&got.ty(), &want.ty())?;

    let got_items = match got {
        Value::Chan(chan) => drain(chan),
        _ => got.elements().map(<[Value]>::to_vec).unwrap_or_default(),
    };
    let want_items = want.elements().map(<[Value]>::to_vec).unwrap_or_default();

    let (missing, extra) = unmatched(&got_items, &want_items);
    if got_items.len() == want_items.len() && missing.is_empty() && extra.is_empty() {
        return Ok(());
    }

    tracing::debug!(
        missing = missing.len(),
        extra = extra.len(),
        "element multisets differ"
    );
    Err(ElementsError::Different(ElementsReport {
        got: got_items,
        want: want_items,
        missing,
        extra,
        options: *options,
    }))
}

fn check_container_types(got: &Type, want: &Type) -> Result<(), ElementsError> {
    let elem = match got {
        Type::Array { elem, .. } | Type::Slice(elem) => elem,
        Type::Chan { dir, elem } => {
            if !dir.can_recv() {
                return Err(ElementsError::NonReceivingChannel { got: got.clone() });
            }
            elem
        }
        _ => return Err(ElementsError::UnsupportedGot { got: got.clone() }),
    };

    let want_elem = match want {
        Type::Array { elem, .. } | Type::Slice(elem) => elem,
        _ => {
            return Err(ElementsError::UnsupportedWant {
                got: got.clone(),
                elem: Type::clone(elem),
                want: want.clone(),
            })
        }
    };

    if elem != want_elem {
        return Err(ElementsError::ElementTypeMismatch {
            got: got.clone(),
            want: want.clone(),
        });
    }
    Ok(())
}

/// Receive until the channel is empty or closed.
fn drain(chan: &ChanValue) -> Vec<Value> {
    let items: Vec<Value> = std::iter::from_fn(|| chan.try_recv()).collect();
    tracing::trace!(count = items.len(), "drained channel");
    items
}

/// Greedy matching: each got element claims the first unclaimed equal want
/// element. Returns `(missing, extra)`.
fn unmatched(got: &[Value], want: &[Value]) -> (Vec<Value>, Vec<Value>) {
    let mut claimed = vec![false; want.len()];
    let mut extra = Vec::new();

    for g in got {
        let slot = want
            .iter()
            .zip(claimed.iter_mut())
            .find(|(w, taken)| !**taken && equals(g, w));
        match slot {
            Some((_, taken)) => *taken = true,
            None => extra.push(g.clone()),
        }
    }

    let missing = want
        .iter()
        .zip(&claimed)
        .filter(|(_, taken)| !**taken)
        .map(|(w, _)| w.clone())
        .collect();
    (missing, extra)
}
