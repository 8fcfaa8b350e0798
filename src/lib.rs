//! An interpreter for a TRAC T64-style text-rewriting macro language.
//!
//! A program is a character stream that is repeatedly scanned and
//! rewritten until no invocations remain. There is no fixed grammar for
//! "arithmetic" or "conditionals" — every construct, including recursion,
//! is a macro call (`#(name,arg,arg,...)` or `##(name,arg,arg,...)`) whose
//! arguments are unevaluated text until a primitive demands them.
//!
//! ## Active and neutral buffers
//!
//! The processor (`crate::processor`) holds two character buffers. `active`
//! is what remains to be scanned; `neutral` accumulates output and,
//! crucially, doubles as working storage for in-progress call arguments —
//! when a call's argument boundary (`,`) or terminator (`)`) is reached, the
//! processor slices the argument text directly out of `neutral` rather than
//! keeping a separate argument buffer. A call's result is then delivered
//! one of two ways: an active call (`#(`) splices its result back onto the
//! front of `active`, so the result is itself rescanned — this is how
//! recursion works; a neutral call (`##(`) appends its result straight onto
//! `neutral`, where it is never rescanned — this is how a program recovers
//! macro syntax as inert data (see the test suite for the canonical
//! example: printing `#(cl,AA)` literally versus printing its expansion).
//!
//! `active` is represented as a growing `Vec<char>` plus an index cursor
//! rather than, say, a rope with a true head-pointer: invocation depth is
//! bounded by the calling program (and, defensively, by
//! `options::InterpreterOptions::recursion_limit`), so the O(n) splice on
//! every call delivery is bounded by the size of the value just produced,
//! which no representation can avoid.
//!
//! ## Persistent vs. transient state
//!
//! The form store (`crate::store`) is the interpreter's persistent
//! namespace: it survives across calls to [`Interpreter::execute`] exactly
//! like a database surviving across query calls. The scanner's buffers,
//! frame stack, and current argument list are transient — reset at the
//! start of every `execute` call and torn down (logically; `Vec`s are
//! reused) at its end. An aborted record (stray `)`, unmatched `(`) clears
//! only the transient state; any form-store mutations already committed by
//! completed calls within that record persist.

mod bignum;
mod frame;
mod materialize;
mod options;
mod part;
mod primitives;
mod processor;
mod segment;
mod store;

pub use options::InterpreterOptions;
pub use primitives::{PrimitiveFn, PrimitiveRegistry};

use frame::Frame;
use store::FormStore;
use tinyvec::TinyVec;

/// A callback the host binds to receive everything `ps` writes. No
/// newline is ever appended by the interpreter.
pub type Sink = Box<dyn FnMut(&str) + Send>;

/// A single interpreter instance: a form store, a primitive registry, an
/// output sink, and the processor's transient scan state.
///
/// Construct one with [`Interpreter::new`] or the free function
/// [`new_interpreter`], then call [`Interpreter::execute`] once per
/// top-level record. The form store persists between calls; everything
/// else is reset at the start of each `execute`.
pub struct Interpreter {
    options: InterpreterOptions,
    primitives: PrimitiveRegistry,
    forms: FormStore,
    sink: Sink,

    // Transient processor state, reset by `reset_with`.
    active: Vec<char>,
    neutral: Vec<char>,
    scan: usize,
    frames: Vec<Frame>,
    args: TinyVec<[String; 4]>,
}

impl Interpreter {
    /// A fresh interpreter with default options, the ten built-in
    /// primitives, and a no-op `ps` sink.
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Interpreter {
            options,
            primitives: primitives::default_registry(),
            forms: FormStore::new(),
            sink: Box::new(|_: &str| {}),
            active: Vec::new(),
            neutral: Vec::new(),
            scan: 0,
            frames: Vec::new(),
            args: TinyVec::new(),
        }
    }

    /// Bind the callback that `ps` writes to. Replaces any previous sink.
    pub fn set_sink(&mut self, sink: Sink) {
        self.sink = sink;
    }

    /// Register or override a primitive after construction.
    pub fn register_primitive(&mut self, name: impl Into<String>, handler: PrimitiveFn) {
        self.primitives.insert(name.into(), handler);
    }

    /// Scan and rewrite `source` to completion, returning the residual
    /// `neutral` text. Never panics: unknown primitives, unknown forms,
    /// malformed arithmetic, and unbalanced parentheses all degrade to
    /// silent-empty or record-abort rather than an error.
    pub fn execute(&mut self, source: &str) -> String {
        log::info!("execute: {} byte(s) of source", source.len());
        self.reset_with(source);
        self.run();
        let output: String = self.neutral.iter().collect();
        log::info!("execute: produced {} byte(s) of output", output.len());
        output
    }

    /// The `k`th positional argument of the primitive currently executing,
    /// or the empty string if absent. Index 0 is the first argument after
    /// the primitive's own name.
    pub(crate) fn arg(&self, k: usize) -> String {
        self.args.get(k).cloned().unwrap_or_default()
    }

    pub(crate) fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub(crate) fn write_to_sink(&mut self, text: &str) {
        log::info!("ps: {} byte(s)", text.len());
        (self.sink)(text);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Construct an interpreter, optionally overriding or extending the
/// built-in primitives. Primitives in `extra_primitives` replace any
/// built-in of the same name.
pub fn new_interpreter(extra_primitives: Option<PrimitiveRegistry>) -> Interpreter {
    let mut interpreter = Interpreter::new();
    if let Some(extra) = extra_primitives {
        for (name, handler) in extra {
            interpreter.register_primitive(name, handler);
        }
    }
    interpreter
}
