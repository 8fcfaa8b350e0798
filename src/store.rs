//! Form store: the persistent, insertion-order-preserving mapping from form
//! name to form body.
//!
//! Lifecycle: a form is created (or replaced) by `ds`, mutated in place by
//! `ss` (via `crate::segment`), and destroyed by `dd`. The store survives
//! across top-level `execute` invocations — it is the interpreter's
//! persistent namespace, as opposed to the processor's transient scan state.

use crate::part::Form;
use crate::segment;
use fnv::FnvHashMap;

/// Insertion-order-preserving name -> form body mapping.
///
/// `fnv::FnvHashMap` gives fast lookup for the (typically short, ASCII) form
/// names; a side `Vec<String>` tracks insertion order for `ln`, since
/// `ds`-on-an-existing-name replaces the body but must not move the name's
/// position in that order.
#[derive(Debug, Default)]
pub struct FormStore {
    forms: FnvHashMap<String, Form>,
    order: Vec<String>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ds(N, B)`: set the body of `N` to the single literal chunk `B`,
    /// dropping any markers the form previously had. Empty `N` is a no-op.
    pub fn define(&mut self, name: &str, body: &str) {
        if name.is_empty() {
            return;
        }
        if !self.forms.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.forms.insert(name.to_string(), Form::literal(body));
        log::debug!("ds: defined form {name:?} ({} bytes)", body.len());
    }

    /// `ss(N, P1, P2, ...)`: for each non-empty `Pi`, replace its
    /// occurrences in `N`'s literal chunks with `Marker(i)`. Empty `Pi` are
    /// skipped but still consume an ordinal position. Unknown `N` is a
    /// no-op.
    pub fn apply_segments(&mut self, name: &str, patterns: &[String]) {
        let Some(form) = self.forms.get(name) else {
            return;
        };
        let mut form = form.clone();
        let mut markers = 0u32;
        for (i, pattern) in patterns.iter().enumerate() {
            let ordinal = (i + 1) as u32;
            if pattern.is_empty() {
                continue;
            }
            form = segment::substitute_pattern(&form, pattern, ordinal);
            markers += 1;
        }
        log::debug!("ss: {name:?} gained markers from {markers} pattern(s)");
        self.forms.insert(name.to_string(), form);
    }

    /// Look up a form's current body, for `cl` to materialize.
    pub fn get(&self, name: &str) -> Option<&Form> {
        self.forms.get(name)
    }

    /// `dd(N)`: delete `N` if present. No-op for an empty or unknown name.
    pub fn delete(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        if self.forms.remove(name).is_some() {
            self.order.retain(|n| n != name);
            log::debug!("dd: deleted form {name:?}");
        }
    }

    /// Form names in insertion order, for `ln`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_lookup_roundtrips_literal_body() {
        let mut store = FormStore::new();
        store.define("Greeting", "hi");
        assert_eq!(store.get("Greeting"), Some(&Form::literal("hi")));
    }

    #[test]
    fn redefine_keeps_insertion_position() {
        let mut store = FormStore::new();
        store.define("A", "1");
        store.define("B", "2");
        store.define("A", "3");
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(store.get("A"), Some(&Form::literal("3")));
    }

    #[test]
    fn define_with_empty_name_is_noop() {
        let mut store = FormStore::new();
        store.define("", "x");
        assert_eq!(store.names().count(), 0);
    }

    #[test]
    fn apply_segments_on_unknown_name_is_noop() {
        let mut store = FormStore::new();
        store.apply_segments("Nope", &["x".to_string()]);
        assert!(store.get("Nope").is_none());
    }

    #[test]
    fn delete_removes_from_order_and_map() {
        let mut store = FormStore::new();
        store.define("A", "1");
        store.define("B", "2");
        store.delete("A");
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["B"]);
        assert!(store.get("A").is_none());
    }

    #[test]
    fn ordinal_position_preserved_across_empty_patterns() {
        let mut store = FormStore::new();
        store.define("F", "XaYbX");
        store.apply_segments(
            "F",
            &["X".to_string(), "".to_string(), "Y".to_string()],
        );
        let form = store.get("F").unwrap();
        use crate::part::Part;
        assert_eq!(
            form.parts(),
            &[
                Part::Marker(1),
                Part::Literal("a".into()),
                Part::Marker(3),
                Part::Literal("b".into()),
                Part::Marker(1),
            ]
        );
    }
}
