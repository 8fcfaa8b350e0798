//! Interpreter-wide configuration, threaded through `new_interpreter`.
//!
//! A small, constant-for-the-lifetime-of-the-interpreter bag of knobs,
//! rather than per-call parameters.

/// Configuration for a single [`crate::Interpreter`] instance.
#[derive(Debug, Clone)]
pub struct InterpreterOptions {
    /// Maximum nesting depth of pending `#(`/`##(` frames before a record is
    /// treated as aborted. This exists so that a runaway recursive form
    /// (e.g. `cl`-ing itself with a non-shrinking argument) fails as a
    /// bounded, diagnosable record abort instead of growing the frame stack
    /// without limit.
    pub recursion_limit: usize,
    /// Raise the processor's scan-loop log calls (frame push/pop, dispatch,
    /// abort) from `log::Level::Trace` to `Debug`, for interactive
    /// debugging of a macro program without turning on trace logging
    /// globally.
    pub trace_scan: bool,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        InterpreterOptions {
            recursion_limit: 4096,
            trace_scan: false,
        }
    }
}
