//! Slug derivation from project titles.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("non-word pattern is valid"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("separator pattern is valid"));

/// Convert a title into a URL-safe slug.
///
/// Lowercases, strips characters that are neither word characters, whitespace
/// nor hyphens, then collapses runs of whitespace and hyphens into one hyphen.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    SEPARATOR_RE.replace_all(&stripped, "-").into_owned()
}

/// True if `candidate` is a slug `slugify` could have produced.
///
/// Slugs name files and directories, so anything else is refused before it
/// reaches the filesystem.
pub fn is_slug(candidate: &str) -> bool {
    !candidate.is_empty() && slugify(candidate) == candidate
}
