//! Line shapes recognised by the dialogue parser.
//!
//! Every pattern is matched against comment-free, trimmed code. Identifiers
//! are `[A-Za-z0-9_#.-]+`; dialogue names may be wrapped in `~`.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::Target;

/// `BEGIN name [nonPausing]`
pub(super) static DIALOGUE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^BEGIN\s+~?([A-Za-z0-9_#.\-]+)~?(?:\s+\d+)?$").unwrap()
});

/// `EXTEND_TOP name state ...` / `EXTEND_BOTTOM name state ...`
pub(super) static PATCH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^EXTEND_(?:TOP|BOTTOM)\s+~?([A-Za-z0-9_#.\-]+)~?\s+([A-Za-z0-9_#.\-]+)(?:\s.*)?$")
        .unwrap()
});

/// `IF [WEIGHT #n] ~guard~ [THEN] BEGIN state`
pub(super) static STATE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^IF\s*(?:WEIGHT\s*#-?\d+\s*)?(~.*?~)\s*(?:THEN\s*)?BEGIN\s+~?([A-Za-z0-9_#.\-]+)~?$",
    )
    .unwrap()
});

/// `CHAIN [IF [WEIGHT #n] ~guard~ THEN] dialogue state`
pub(super) static CHAIN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^CHAIN\s+(?:IF\s*(?:WEIGHT\s*#-?\d+\s*)?~.*?~\s*THEN\s+)?~?([A-Za-z0-9_#.\-]+)~?\s+([A-Za-z0-9_#.\-]+)$",
    )
    .unwrap()
});

pub(super) static SAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^SAY\s+@(\d+)$").unwrap());

/// `IF ~guard~ [THEN] REPLY @id rest`
pub(super) static REPLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^IF\s*(~.*?~)\s*(?:THEN\s*)?REPLY\s+@(\d+)(.*)$").unwrap()
});

/// Bare `@id`.
pub(super) static TEXT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\d+)$").unwrap());

/// `= @id`
pub(super) static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=\s*@(\d+)$").unwrap());

/// `== speaker IF ~guard~ THEN @id`
pub(super) static INTERJECTION_IF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^==\s*~?([A-Za-z0-9_#.\-]+)~?\s+IF\s*(~.*?~)\s*(?:THEN\s*)?@(\d+)$").unwrap()
});

/// `== speaker @id`
pub(super) static INTERJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^==\s*~?([A-Za-z0-9_#.\-]+)~?\s+@(\d+)$").unwrap()
});

/// `END dialogue state` closing a chain body.
pub(super) static END_WITH_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^END\s+~?([A-Za-z0-9_#.\-]+)~?\s+([A-Za-z0-9_#.\-]+)$").unwrap()
});

pub(super) static CHAIN_EXTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^EXTERN\s+~?([A-Za-z0-9_#.\-]+)~?\s+([A-Za-z0-9_#.\-]+)$").unwrap()
});

pub(super) static CHAIN_EXIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^EXIT$").unwrap());

pub(super) static COPY_TRANS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^COPY_TRANS(?:_LATE)?\s+(?:SAFE\s+)?~?([A-Za-z0-9_#.\-]+)~?\s+([A-Za-z0-9_#.\-]+)$")
        .unwrap()
});

/// `[IF ~guard~ THEN] DO ~action~ EXIT`
pub(super) static DO_EXIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:IF\s*~.*?~\s*(?:THEN\s*)?)?DO\s*~.*~\s*EXIT$").unwrap()
});

/// Statements whose guard may continue on the next line.
pub(super) static GUARDED_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:IF\b|CHAIN\b|==)").unwrap());

// Reply targets.
static ACTION_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:DO|JOURNAL|SOLVED_JOURNAL|UNSOLVED_JOURNAL)\s*~[^~]*~").unwrap()
});
static TARGET_EXTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bEXTERN\s+~?([A-Za-z0-9_#.\-]+)~?\s+([A-Za-z0-9_#.\-]+)").unwrap()
});
static TARGET_GOTO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bGOTO\s+([A-Za-z0-9_#.\-]+)").unwrap());
static TARGET_EXIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bEXIT\b").unwrap());

const SCRIPT_KEYWORDS: &[&str] = &[
    "IF",
    "CHAIN",
    "BEGIN",
    "SAY",
    "DO",
    "EXTERN",
    "EXIT",
    "EXTEND_TOP",
    "EXTEND_BOTTOM",
];

/// Resolve the target of a reply from the text after its `@id`.
///
/// Action and journal literals are dropped first, then `EXTERN`, `GOTO` and
/// `EXIT` are tried in that order.
pub(super) fn parse_target(rest: &str) -> Target {
    let rest = ACTION_TEXT.replace_all(rest, " ");

    if let Some(caps) = TARGET_EXTERN.captures(&rest) {
        return Target::Extern {
            dialogue: caps[1].to_string(),
            state: caps[2].to_string(),
        };
    }
    if let Some(caps) = TARGET_GOTO.captures(&rest) {
        return Target::Goto {
            state: caps[1].to_string(),
        };
    }
    if TARGET_EXIT.is_match(&rest) {
        return Target::Exit;
    }
    Target::None
}

/// Whether a comment is disabled script rather than prose.
pub(super) fn looks_like_script_syntax(comment: &str) -> bool {
    let comment = comment.trim();
    if comment.starts_with("==") || comment.starts_with('@') {
        return true;
    }

    let word_len = comment
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '_'))
        .unwrap_or(comment.len());
    let word = comment[..word_len].to_ascii_uppercase();
    SCRIPT_KEYWORDS.contains(&word.as_str())
}
