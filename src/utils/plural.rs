//! Pluralization utilities.

/// Return "s" suffix for plural counts
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "post")` -> `"0 posts"`
/// - `plural_count(1, "post")` -> `"1 post"`
/// - `plural_count(5, "image")` -> `"5 images"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "post"), "0 posts");
        assert_eq!(plural_count(1, "post"), "1 post");
        assert_eq!(plural_count(2, "image"), "2 images");
    }
}
