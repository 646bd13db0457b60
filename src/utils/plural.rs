//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 holes)
/// - `plural_s(1)` -> `""` (1 hole)
/// - `plural_s(5)` -> `"s"` (5 holes)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "sprite")` -> `"0 sprites"`
/// - `plural_count(1, "sprite")` -> `"1 sprite"`
/// - `plural_count(5, "sprite")` -> `"5 sprites"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
