use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").expect("slug pattern should compile"));

/// Lowercase `s` and collapse every run of characters outside `[0-9a-zA-Z]`
/// into a single `_`. Leading and trailing runs collapse too.
pub fn slug(s: &str) -> String {
    NON_ALNUM.replace_all(&s.to_lowercase(), "_").into_owned()
}
