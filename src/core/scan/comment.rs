//! Quote-aware comment splitting.
//!
//! WeiDU sources use `//` line comments and `/* */` block comments, but both
//! markers are plain text inside a `~...~` literal (and, in `.tra` files, inside
//! a `"..."` literal). The scanner walks a line once, left to right, with one
//! character of lookahead, separating code from comment text.

/// Quote delimiters recognised in dialogue scripts.
pub const DIALOGUE_QUOTES: &[char] = &['~'];

/// Quote delimiters recognised in string tables.
pub const STRING_TABLE_QUOTES: &[char] = &['~', '"'];

/// A raw line split into trimmed code and trimmed comment text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitLine {
    pub code: String,
    pub comment: String,
}

/// Splits lines into code and comment while tracking open block comments.
///
/// A block comment opened on one line keeps swallowing content on the
/// following lines until `*/`. The quoted-region flag resets on every
/// [`split`](Self::split) and is carried over only by
/// [`split_continued`](Self::split_continued).
#[derive(Debug, Clone)]
pub struct CommentScanner {
    quotes: &'static [char],
    in_block_comment: bool,
    open_quote: Option<char>,
}

impl CommentScanner {
    pub fn new(quotes: &'static [char]) -> Self {
        Self {
            quotes,
            in_block_comment: false,
            open_quote: None,
        }
    }

    pub fn for_dialogue() -> Self {
        Self::new(DIALOGUE_QUOTES)
    }

    pub fn for_string_table() -> Self {
        Self::new(STRING_TABLE_QUOTES)
    }

    /// Split a line that starts outside any quoted region.
    pub fn split(&mut self, raw: &str) -> SplitLine {
        self.open_quote = None;
        self.scan(raw)
    }

    /// Split a line that continues a statement whose quoted region is still open.
    pub fn split_continued(&mut self, raw: &str) -> SplitLine {
        self.scan(raw)
    }

    /// Whether the last scanned line ended inside a quoted region.
    pub fn in_quote(&self) -> bool {
        self.open_quote.is_some()
    }

    pub fn in_block_comment(&self) -> bool {
        self.in_block_comment
    }

    fn scan(&mut self, raw: &str) -> SplitLine {
        let mut code = String::with_capacity(raw.len());
        let mut comment = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            if self.in_block_comment {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                    push_separator(&mut comment);
                } else {
                    comment.push(ch);
                }
                continue;
            }

            if let Some(open) = self.open_quote {
                if ch == open {
                    self.open_quote = None;
                }
                code.push(ch);
                continue;
            }

            if self.quotes.contains(&ch) {
                self.open_quote = Some(ch);
                code.push(ch);
                continue;
            }

            if ch == '/' {
                match chars.peek() {
                    Some('/') => {
                        chars.next();
                        let rest: String = chars.collect();
                        push_separator(&mut comment);
                        comment.push_str(rest.trim());
                        break;
                    }
                    Some('*') => {
                        chars.next();
                        self.in_block_comment = true;
                        continue;
                    }
                    _ => {}
                }
            }

            code.push(ch);
        }

        SplitLine {
            code: code.trim().to_string(),
            comment: comment.trim().to_string(),
        }
    }
}

fn push_separator(comment: &mut String) {
    if !comment.is_empty() && !comment.ends_with(' ') {
        comment.push(' ');
    }
}
