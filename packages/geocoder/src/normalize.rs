//! Query normalization shared by gazetteer keys and search input.
//!
//! Applied symmetrically when the gazetteer is built and when a query is
//! looked up, so `"  New   York "` and `"new york"` meet on the same key.

use regex::Regex;
use std::sync::LazyLock;

/// Regex to collapse runs of whitespace into a single space.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Regex for US ZIP and ZIP+4 codes.
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").expect("valid regex"));

/// Normalizes a place query or gazetteer key.
///
/// The pipeline:
/// 1. Trim
/// 2. Lowercase
/// 3. Collapse whitespace
#[must_use]
pub fn normalize(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    WHITESPACE_RE.replace_all(&lower, " ").into_owned()
}

/// Whether a normalized query looks like a US ZIP code.
#[must_use]
pub fn is_zip_code(query: &str) -> bool {
    ZIP_RE.is_match(query)
}
