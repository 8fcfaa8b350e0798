//! Primitive registry and built-in handlers.
//!
//! A primitive is a function over `&mut Interpreter`: it reads its
//! arguments through [`Interpreter::arg`] (index 0 is the call's first
//! argument *after* the primitive name — the name itself is consumed by the
//! processor before dispatch, see `crate::processor`) and returns the
//! replacement text. Handlers must not retain references to argument
//! storage across the call, since the interpreter reuses that storage for
//! the next invocation.

use crate::bignum;
use crate::materialize;
use fnv::FnvHashMap;
use itertools::Itertools;

use crate::Interpreter;

/// A built-in or host-supplied primitive. Boxed so that both plain
/// functions and closures over host state can be registered.
pub type PrimitiveFn = Box<dyn Fn(&mut Interpreter) -> String + Send + Sync>;

/// Dispatch table from primitive name to handler.
pub type PrimitiveRegistry = FnvHashMap<String, PrimitiveFn>;

/// The ten built-ins every fresh interpreter starts with: `ds`, `ss`, `cl`,
/// `eq`, `ml`, `ad`, `su`, `ln`, `dd`, `ps`.
pub fn default_registry() -> PrimitiveRegistry {
    let mut registry: PrimitiveRegistry = FnvHashMap::default();
    registry.insert("ds".into(), Box::new(ds));
    registry.insert("ss".into(), Box::new(ss));
    registry.insert("cl".into(), Box::new(cl));
    registry.insert("eq".into(), Box::new(eq));
    registry.insert("ml".into(), Box::new(ml));
    registry.insert("ad".into(), Box::new(ad));
    registry.insert("su".into(), Box::new(su));
    registry.insert("ln".into(), Box::new(ln));
    registry.insert("dd".into(), Box::new(dd));
    registry.insert("ps".into(), Box::new(ps));
    registry
}

/// `#(ds,N,B)` — define or replace form `N` with literal body `B`.
fn ds(interp: &mut Interpreter) -> String {
    let name = interp.arg(0);
    let body = interp.arg(1);
    interp.forms.define(&name, &body);
    String::new()
}

/// `#(ss,N,P1,P2,...)` — create ordinal segment markers in form `N`.
fn ss(interp: &mut Interpreter) -> String {
    let name = interp.arg(0);
    let patterns: Vec<String> = (1..interp.arg_count()).map(|i| interp.arg(i)).collect();
    interp.forms.apply_segments(&name, &patterns);
    String::new()
}

/// `#(cl,N,A1,A2,...)` — materialize form `N` with markers filled from
/// `A1,A2,...`. This is the recursion mechanism: the processor rescans the
/// returned text when the enclosing call was `#(`.
fn cl(interp: &mut Interpreter) -> String {
    let name = interp.arg(0);
    let Some(form) = interp.forms.get(&name) else {
        return String::new();
    };
    let args: Vec<String> = (1..interp.arg_count()).map(|i| interp.arg(i)).collect();
    materialize::fill(form, &args)
}

/// `#(eq,A,B,T,F)` — `T` if `A == B` character-wise, else `F`.
fn eq(interp: &mut Interpreter) -> String {
    if interp.arg(0) == interp.arg(1) {
        interp.arg(2)
    } else {
        interp.arg(3)
    }
}

/// `#(ml,A,B)` — arbitrary-precision `A * B`.
fn ml(interp: &mut Interpreter) -> String {
    arithmetic(interp, |a, b| a * b)
}

/// `#(ad,A,B)` — arbitrary-precision `A + B`.
fn ad(interp: &mut Interpreter) -> String {
    arithmetic(interp, |a, b| a + b)
}

/// `#(su,A,B)` — arbitrary-precision `A - B`.
fn su(interp: &mut Interpreter) -> String {
    arithmetic(interp, |a, b| a - b)
}

fn arithmetic(
    interp: &mut Interpreter,
    op: impl Fn(num_bigint::BigInt, num_bigint::BigInt) -> num_bigint::BigInt,
) -> String {
    let a = bignum::parse_integer(&interp.arg(0));
    let b = bignum::parse_integer(&interp.arg(1));
    match (a, b) {
        (Some(a), Some(b)) => op(a, b).to_string(),
        _ => String::new(),
    }
}

/// `#(ln,S)` — all form names, in insertion order, joined by `S`.
fn ln(interp: &mut Interpreter) -> String {
    let sep = interp.arg(0);
    interp.forms.names().join(&sep)
}

/// `#(dd,N1,N2,...)` — delete each named form if present.
fn dd(interp: &mut Interpreter) -> String {
    let names: Vec<String> = (0..interp.arg_count()).map(|i| interp.arg(i)).collect();
    for name in names {
        interp.forms.delete(&name);
    }
    String::new()
}

/// `#(ps,X)` — write `X` to the host sink, with no trailing newline.
fn ps(interp: &mut Interpreter) -> String {
    let text = interp.arg(0);
    interp.write_to_sink(&text);
    String::new()
}

#[cfg(test)]
mod tests {
    use crate::Interpreter;

    #[test]
    fn eq_picks_true_branch_on_match() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.execute("#(eq,a,a,yes,no)'"), "yes");
    }

    #[test]
    fn eq_picks_false_branch_on_mismatch() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.execute("#(eq,a,b,yes,no)'"), "no");
    }

    #[test]
    fn ad_su_ml_are_arbitrary_precision() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.execute("#(ml,3,4)'"), "12");
        assert_eq!(interp.execute("#(ad,3,4)'"), "7");
        assert_eq!(interp.execute("#(su,3,4)'"), "-1");
    }

    #[test]
    fn arithmetic_parse_failure_yields_empty() {
        let mut interp = Interpreter::new();
        assert_eq!(interp.execute("#(ad,x,1)'"), "");
    }

    #[test]
    fn arithmetic_tolerates_a_leading_space_preserved_by_the_scanner() {
        // ' ' is not an idle character, so it survives into the argument
        // as literal text; parse_integer trims it before the literal check.
        let mut interp = Interpreter::new();
        assert_eq!(interp.execute("#(ad, 3,4)'"), "7");
    }

    #[test]
    fn dd_deletes_named_forms() {
        let mut interp = Interpreter::new();
        interp.execute("#(ds,A,1)#(ds,B,2)'");
        interp.execute("#(dd,A)'");
        assert_eq!(interp.execute("#(ln,,)'"), "B");
    }
}
