//! Common utility functions shared across the codebase.

use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Make a canonical key safe to use as a file name.
///
/// Every run of characters outside `[A-Za-z0-9._-]` becomes a single `_`.
///
/// # Examples
///
/// ```
/// use dlgsheet::utils::sanitize_filename;
///
/// assert_eq!(sanitize_filename("ac#test"), "ac_test");
/// assert_eq!(sanitize_filename("01 intro.v2"), "01_intro.v2");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}
