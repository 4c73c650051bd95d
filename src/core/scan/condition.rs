/// Quote delimiter wrapping guards in dialogue scripts.
const QUOTE: char = '~';

/// Guard that always holds: `IF ~~ THEN ...`.
const EMPTY_GUARD: &str = "~~";

/// Strip the `~...~` wrapper from a guard.
///
/// `~~` collapses to the empty string. Only the outermost pair is removed, and
/// input that is not wrapped passes through unchanged.
pub fn normalize_condition(cond: &str) -> String {
    let cond = cond.trim();
    if cond == EMPTY_GUARD {
        return String::new();
    }

    match cond
        .strip_prefix(QUOTE)
        .and_then(|inner| inner.strip_suffix(QUOTE))
    {
        Some(inner) => inner.trim().to_string(),
        None => cond.to_string(),
    }
}
