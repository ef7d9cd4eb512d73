// crates/addressing-core/src/pattern.rs

//! Postal pattern compilation.
//!
//! Stored patterns are anchor-free. A match is only valid when the whole
//! trimmed postal code matches, so the body is wrapped as `^(?:body)$`. The
//! group keeps top-level alternations (`A|B`) inside the anchors.

use regex::{Regex, RegexBuilder};

/// Upper bound on compiled program size; source patterns are small.
const SIZE_LIMIT: usize = 1 << 20;

/// Compiles a raw postal pattern into a fully anchored, case-insensitive matcher.
///
/// Returns `None` when there is no pattern (blank body).
///
/// ```rust
/// use addressing_core::pattern::compile;
///
/// let rx = compile(r"\d{5}(-\d{4})?").unwrap().unwrap();
/// assert!(rx.is_match("94043-1351"));
/// assert!(!rx.is_match("x94043"));
/// assert!(compile("  ").unwrap().is_none());
/// ```
pub fn compile(raw: &str) -> Result<Option<Regex>, regex::Error> {
    let body = raw.trim();
    if body.is_empty() {
        return Ok(None);
    }
    RegexBuilder::new(&anchored(body))
        .case_insensitive(true)
        .size_limit(SIZE_LIMIT)
        .build()
        .map(Some)
}

fn anchored(body: &str) -> String {
    format!("^(?:{body})$")
}
