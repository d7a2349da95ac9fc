//! Type-string grammar.
//!
//! ```text
//! type  := inner '?'?
//! inner := '[' type ']' | NAME
//! ```
//!
//! Nullability is local to the level it is written on: `[int?]` is a non-nullable array of
//! nullable ints, `[int]?` a nullable array of ints.

use crate::ast::TypeRef;

/// Deepest array nesting the line parser accepts in one type string.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Parse a type string such as `int`, `User?` or `[[int]]?`.
///
/// Whitespace inside brackets is ignored. A string that is not a well-formed array (unbalanced
/// or adjacent brackets, `[]`) parses as a named reference and is left for the validator to
/// reject.
///
/// ## Notes
/// - Levels are peeled in a loop and the reference is built from the inside out, so parsing does
///   not recurse. Callers should still bound the depth with [`nesting_depth`]: the resulting
///   [`TypeRef`] is a recursive value.
pub fn parse_type(s: &str) -> TypeRef {
    // Nullability of each array level, outermost first
    let mut levels = Vec::new();
    let mut rest = s.trim();
    let leaf = loop {
        let (body, nullable) = match rest.strip_suffix('?') {
            Some(body) if !body.is_empty() => (body, true),
            _ => (rest, false),
        };
        match array_interior(body) {
            Some(inner) => {
                levels.push(nullable);
                rest = inner.trim();
            }
            None => break TypeRef::named(body).with_nullable(nullable),
        }
    };
    levels
        .into_iter()
        .rev()
        .fold(leaf, |item, nullable| TypeRef::array(item).with_nullable(nullable))
}

/// Deepest bracket nesting in `s` (`[[int]?]` → 2).
pub fn nesting_depth(s: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for c in s.chars() {
        match c {
            '[' => {
                depth += 1;
                max = max.max(depth);
            }
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Return the interior of `[...]` when the first `[` is closed by the final `]`.
fn array_interior(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return None;
    }
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

/// Whether every `[` in `s` is closed within `s`.
pub fn brackets_balanced(s: &str) -> bool {
    let mut depth = 0i64;
    for c in s.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
