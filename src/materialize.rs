//! Call-site substitution: materializes a form body into a flat string by
//! filling numbered markers from caller-supplied arguments.
//!
//! This is the `cl` primitive's core (`crate::primitives::cl` looks up the
//! form and the caller's arguments and hands both to [`fill`]). The returned
//! string is handed back to the processor unevaluated; whether it gets
//! rescanned is decided by the calling `#(`/`##(` mode, not by this module.

use crate::part::{Form, Part};

/// Emit `form`'s body with `Marker(k)` replaced by `args[k - 1]` (1-based),
/// or the empty string if `k` exceeds `args`. Excess arguments are ignored.
pub fn fill(form: &Form, args: &[String]) -> String {
    let mut out = String::new();
    for part in form.parts() {
        match part {
            Part::Literal(text) => out.push_str(text),
            Part::Marker(n) => {
                let idx = (*n as usize).wrapping_sub(1);
                if let Some(value) = args.get(idx) {
                    out.push_str(value);
                }
            }
        }
    }
    out
}
