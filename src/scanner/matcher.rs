//! Vector Literal Matcher
//!
//! Line-level detection of `vector3(x, y, z)` and `vector4(x, y, z, w)` literals.
//! A numeric component is an optionally negative run of ASCII digits with an optional
//! fractional part (`-1`, `2.25`); exponents, leading `+` and bare decimal points
//! such as `3.` or `.5` are rejected. Spaces and tabs may surround every component.
//!
//! Matching is a substring search: text before or after the literal is ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

const NUMBER: &str = r"-?[0-9]+(?:\.[0-9]+)?";
const BLANK: &str = r"[ \t]*";

/// Builds the pattern for a literal with `arity` components, e.g. `vector3(` + 3 fields
fn literal_pattern(arity: usize) -> String {
    let field = format!("{BLANK}{NUMBER}{BLANK}");
    let fields = vec![field; arity].join(",");
    format!(r"vector{arity}\({fields}\)")
}

static VECTOR_LITERAL: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "(?P<vector3>{})|(?P<vector4>{})",
        literal_pattern(3),
        literal_pattern(4)
    );
    Regex::new(&pattern).expect("vector literal pattern is a valid regex")
});

/// Kind of vector literal found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum VectorKind {
    Vector3,
    Vector4,
}

impl VectorKind {
    /// Number of numeric components in this literal kind
    pub fn arity(self) -> usize {
        match self {
            VectorKind::Vector3 => 3,
            VectorKind::Vector4 => 4,
        }
    }
}

/// A vector literal located inside a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorLiteral {
    pub kind: VectorKind,
    /// Byte range of the literal within the searched line
    pub span: Range<usize>,
}

impl VectorLiteral {
    /// The literal text, sliced out of the line it was found in
    pub fn as_str<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.clone()]
    }
}

/// Returns true if `line` contains at least one vector literal
pub fn matches(line: &str) -> bool {
    VECTOR_LITERAL.is_match(line)
}

/// Locate the first (leftmost) vector literal in `line`
pub fn find(line: &str) -> Option<VectorLiteral> {
    let captures = VECTOR_LITERAL.captures(line)?;
    let (kind, m) = match (captures.name("vector3"), captures.name("vector4")) {
        (Some(m), _) => (VectorKind::Vector3, m),
        (None, Some(m)) => (VectorKind::Vector4, m),
        (None, None) => return None,
    };
    Some(VectorLiteral {
        kind,
        span: m.range(),
    })
}

/// Line predicate used by the scanner worker
///
/// Implementations must be pure: the worker calls `is_match` once per line and
/// shares the matcher across threads.
pub trait LineMatcher: Send + Sync {
    fn is_match(&self, line: &str) -> bool;
}

/// Default matcher for `vector3(...)` / `vector4(...)` literals
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorLiteralMatcher;

impl LineMatcher for VectorLiteralMatcher {
    fn is_match(&self, line: &str) -> bool {
        matches(line)
    }
}
