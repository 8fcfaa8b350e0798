//! The processor: the scanning/rewriting state machine that drives macro
//! expansion.
//!
//! The loop consumes `active` from the front (tracked by `scan`, an index
//! rather than a pointer — see the module doc on `crate::Interpreter` for
//! why a growing `Vec<char>` plus cursor is the chosen representation
//! instead of a rope), emitting ordinary text to `neutral` and pushing a
//! [`Frame`] for every `#(`/`##(`. When a `)` closes the innermost frame,
//! the just-completed call's arguments are sliced out of `neutral`, the
//! call's body region is excised, the named primitive runs, and its result
//! is delivered back into either buffer depending on the frame's mode.

use crate::frame::{CallMode, Frame};
use crate::Interpreter;

impl Interpreter {
    /// Reset all transient scan state and load `source` into `active`. The
    /// form store is untouched — it is the interpreter's persistent
    /// namespace, not part of this reset.
    pub(crate) fn reset_with(&mut self, source: &str) {
        self.neutral.clear();
        self.active = source.chars().collect();
        self.scan = 0;
        self.frames.clear();
        self.args.clear();
    }

    /// Run the scan loop to completion (either active empties out, or an
    /// abort clears it). Returns nothing; the residual text is read back
    /// out of `neutral` by `Interpreter::execute`.
    pub(crate) fn run(&mut self) {
        loop {
            if self.scan >= self.active.len() {
                break;
            }
            let ch = self.active[self.scan];
            match ch {
                '\t' | '\n' | '\r' | '\'' => self.delete_active_char(),
                '(' => {
                    if !self.consume_balanced_parens() {
                        self.abort("unmatched '('");
                        break;
                    }
                }
                ',' => {
                    self.delete_active_char();
                    self.mark_argument_boundary();
                }
                '#' => {
                    if self.peek("(") {
                        self.delete_active_char();
                        self.delete_active_char();
                        if !self.begin_frame(CallMode::Active) {
                            self.abort("recursion limit exceeded");
                            break;
                        }
                    } else if self.peek("#(") {
                        self.delete_active_char();
                        self.delete_active_char();
                        self.delete_active_char();
                        if !self.begin_frame(CallMode::Neutral) {
                            self.abort("recursion limit exceeded");
                            break;
                        }
                    } else {
                        self.move_active_char_to_neutral();
                    }
                }
                ')' => {
                    self.delete_active_char();
                    if self.frames.is_empty() {
                        self.abort("stray ')'");
                        break;
                    }
                    self.end_frame_and_evaluate();
                }
                _ => self.move_active_char_to_neutral(),
            }
        }
    }

    fn delete_active_char(&mut self) {
        if self.scan < self.active.len() {
            self.active.remove(self.scan);
        }
    }

    fn move_active_char_to_neutral(&mut self) {
        self.neutral.push(self.active[self.scan]);
        self.delete_active_char();
    }

    /// True if the characters of `expect` immediately follow the current
    /// scan position (not including the character at `scan` itself).
    fn peek(&self, expect: &str) -> bool {
        let start = self.scan + 1;
        expect
            .chars()
            .enumerate()
            .all(|(i, c)| self.active.get(start + i) == Some(&c))
    }

    /// Consume a balanced `(...)` pair, copying the interior to `neutral`
    /// verbatim. Returns `false` if `active` runs out before the matching
    /// `)` is found, signalling an abort to the caller.
    fn consume_balanced_parens(&mut self) -> bool {
        self.delete_active_char(); // the opening '('
        let mut depth = 1usize;
        while self.scan < self.active.len() {
            let ch = self.active[self.scan];
            match ch {
                '(' => {
                    depth += 1;
                    self.neutral.push(ch);
                    self.delete_active_char();
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.delete_active_char();
                        return true;
                    }
                    self.neutral.push(ch);
                    self.delete_active_char();
                }
                _ => {
                    self.neutral.push(ch);
                    self.delete_active_char();
                }
            }
        }
        false
    }

    fn mark_argument_boundary(&mut self) {
        let end = self.neutral.len();
        if let Some(frame) = self.frames.last_mut() {
            frame.close_argument(end);
        }
    }

    /// The level scan-loop tracing logs at: `Debug` when
    /// `options.trace_scan` is set, `Trace` otherwise.
    fn scan_log_level(&self) -> log::Level {
        if self.options.trace_scan {
            log::Level::Debug
        } else {
            log::Level::Trace
        }
    }

    fn begin_frame(&mut self, mode: CallMode) -> bool {
        if self.frames.len() >= self.options.recursion_limit {
            log::log!(
                self.scan_log_level(),
                "recursion_limit {} reached, aborting record",
                self.options.recursion_limit
            );
            return false;
        }
        let begin = self.neutral.len();
        self.frames.push(Frame::new(mode, begin));
        log::log!(
            self.scan_log_level(),
            "pushed frame mode={:?} depth={} begin={}",
            mode,
            self.frames.len(),
            begin
        );
        true
    }

    /// Clear all transient processor state. The form store is left intact
    /// (side effects already committed persist across an abort).
    fn abort(&mut self, reason: &str) {
        log::log!(self.scan_log_level(), "record aborted: {reason}");
        self.active.clear();
        self.neutral.clear();
        self.scan = 0;
        self.frames.clear();
        self.args.clear();
    }

    /// Close the innermost frame, extract its arguments, excise its body
    /// region from `neutral`, dispatch the named primitive, and deliver the
    /// result per the frame's mode.
    fn end_frame_and_evaluate(&mut self) {
        let mut frame = self.frames.pop().expect("caller checked non-empty");
        let final_end = self.neutral.len();
        frame.close_argument(final_end);

        let call_args: Vec<String> = frame
            .slices
            .iter()
            .map(|&(start, end)| self.neutral[start..end].iter().collect::<String>())
            .collect();

        self.neutral.drain(frame.begin..final_end);

        let mut args_iter = call_args.into_iter();
        let name = args_iter.next().unwrap_or_default();
        self.args = args_iter.collect();

        let value = self.dispatch(&name);
        self.args.clear();

        log::log!(
            self.scan_log_level(),
            "call {name:?} mode={:?} -> {} byte(s)",
            frame.mode,
            value.len()
        );

        match frame.mode {
            CallMode::Neutral => self.neutral.extend(value.chars()),
            CallMode::Active => {
                let mut spliced: Vec<char> = value.chars().collect();
                spliced.extend(self.active[self.scan..].iter().cloned());
                self.active = spliced;
                self.scan = 0;
            }
        }
    }

    /// Look up and run `name` in the primitive registry, returning the
    /// empty string for an unknown or empty name.
    fn dispatch(&mut self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        match self.primitives.remove(name) {
            Some(primitive) => {
                let result = primitive(self);
                self.primitives.insert(name.to_string(), primitive);
                result
            }
            None => {
                log::log!(self.scan_log_level(), "unknown primitive {name:?}, yielding empty");
                String::new()
            }
        }
    }
}
