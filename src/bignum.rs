//! Arbitrary-precision integer support for the `ad`/`su`/`ml` primitives.
//!
//! Missing arguments are treated as `0` and any non-numeric argument is a
//! parse failure that the primitive turns into an empty result. `num-bigint`
//! is used because the primitives must support integers wider than 64 bits —
//! `Factorial(50)` is on the order of 2·10^64.

use lazy_static::lazy_static;
use num_bigint::BigInt;
use regex::Regex;

lazy_static! {
    /// A signed decimal integer literal, once surrounding whitespace has
    /// been trimmed. No interior whitespace or other junk is tolerated.
    static ref INTEGER_LITERAL: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
}

/// Parse a signed integer literal. An empty string parses as zero.
/// Surrounding whitespace is trimmed before the literal check, since a
/// macro argument like `#(ad, 3,4)` preserves the leading space (space is
/// not an idle character) and still denotes the plain integer `3`. A
/// string that is nothing but whitespace is a parse failure, not zero.
/// Anything else that doesn't match a plain decimal literal after
/// trimming is also a parse failure.
pub fn parse_integer(text: &str) -> Option<BigInt> {
    if text.is_empty() {
        return Some(BigInt::from(0));
    }
    let trimmed = text.trim();
    if !INTEGER_LITERAL.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<BigInt>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_parses_as_zero() {
        assert_eq!(parse_integer(""), Some(BigInt::from(0)));
    }

    #[test]
    fn parses_negative_literals() {
        assert_eq!(parse_integer("-7"), Some(BigInt::from(-7)));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("1.5"), None);
        assert_eq!(parse_integer("1 2"), None);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_integer(" 3"), Some(BigInt::from(3)));
        assert_eq!(parse_integer("3 "), Some(BigInt::from(3)));
        assert_eq!(parse_integer(" -3 "), Some(BigInt::from(-3)));
    }

    #[test]
    fn whitespace_only_is_not_zero() {
        assert_eq!(parse_integer(" "), None);
    }
}
