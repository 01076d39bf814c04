//! Slugification for post file names.

use deunicode::deunicode;

/// Full slugify: Unicode to ASCII, lowercase, runs of anything that is not
/// alphanumeric collapse to one `-`, no leading or trailing `-`.
///
/// # Examples
///
/// - `slugify("Hello, World!")` -> `"hello-world"`
/// - `slugify("Ünïcödé Post")` -> `"unicode-post"`
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
