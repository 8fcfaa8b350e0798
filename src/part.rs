//! The form body representation.
//!
//! A form's body is a sequence of [`Part`]s: literal text chunks interleaved
//! with numbered [`Marker`](Part::Marker)s created by the segment engine
//! (`ss`, see `crate::segment`) and filled in by call-site substitution
//! (`cl`, see `crate::materialize`). Markers are opaque placeholders; they
//! are never split or merged, only literal chunks are.

/// One element of a form body: a run of literal text, or a numbered marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Literal text, copied verbatim when a form is materialized.
    Literal(String),
    /// A segment marker with ordinal `n` (n >= 1), created by `ss` and
    /// resolved against a call's arguments by `cl`.
    Marker(u32),
}

impl Part {
    pub fn is_literal(&self) -> bool {
        matches!(self, Part::Literal(_))
    }
}

/// A form's body: an ordered sequence of [`Part`]s.
///
/// Invariant: no two adjacent parts are both `Part::Literal` — literal runs
/// are always merged on construction and after every `ss` pass. This keeps
/// matching in `crate::segment` simple (one literal chunk is scanned at a
/// time) without changing observable behavior, since markers never merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form(Vec<Part>);

impl Form {
    /// A form body consisting of a single literal chunk (possibly empty).
    pub fn literal(text: impl Into<String>) -> Self {
        Form(vec![Part::Literal(text.into())])
    }

    pub fn parts(&self) -> &[Part] {
        &self.0
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.0
    }

    pub fn from_parts(parts: Vec<Part>) -> Self {
        let mut form = Form(Vec::with_capacity(parts.len()));
        for part in parts {
            form.push(part);
        }
        form
    }

    /// Append a part, merging it into the trailing literal run if both the
    /// new part and the current tail are literal text.
    pub fn push(&mut self, part: Part) {
        if let (Part::Literal(new), Some(Part::Literal(tail))) = (&part, self.0.last_mut()) {
            if new.is_empty() {
                return;
            }
            tail.push_str(new);
            return;
        }
        if let Part::Literal(ref text) = part {
            if text.is_empty() {
                return;
            }
        }
        self.0.push(part);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_merges_on_push() {
        let mut form = Form::literal("ab");
        form.push(Part::Literal("cd".into()));
        assert_eq!(form.parts(), &[Part::Literal("abcd".into())]);
    }

    #[test]
    fn empty_literal_push_is_noop() {
        let mut form = Form::literal("ab");
        form.push(Part::Literal(String::new()));
        assert_eq!(form.parts(), &[Part::Literal("ab".into())]);
    }

    #[test]
    fn markers_never_merge_with_literals() {
        let mut form = Form::literal("a");
        form.push(Part::Marker(1));
        form.push(Part::Literal("b".into()));
        assert_eq!(
            form.parts(),
            &[
                Part::Literal("a".into()),
                Part::Marker(1),
                Part::Literal("b".into())
            ]
        );
    }
}
